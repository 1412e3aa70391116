use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::behavior::chart::{ChartState, sort_by_domain_distance};
use crate::behavior::{ChartBehavior, GestureEvent, GestureKind};
use crate::core::domain::DomainValue;
use crate::core::series::{DatumDetails, SeriesDatum};
use crate::core::types::{AxisDirection, Point};
use crate::error::{ChartError, ChartResult};
use crate::selection::SelectionRole;

/// Input gesture that drives a [`SelectNearest`] selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionTrigger {
    Hover,
    Tap,
    PressHold,
    LongPressHold,
    TapAndDrag,
}

impl SelectionTrigger {
    fn select_kinds(self) -> &'static [GestureKind] {
        match self {
            SelectionTrigger::Hover => &[GestureKind::Hover],
            SelectionTrigger::Tap => &[GestureKind::Tap],
            SelectionTrigger::PressHold => &[GestureKind::PressHold, GestureKind::Drag],
            SelectionTrigger::LongPressHold => &[GestureKind::LongPressHold, GestureKind::Drag],
            SelectionTrigger::TapAndDrag => &[GestureKind::Tap, GestureKind::Drag],
        }
    }
}

/// How the candidate set grows from the single nearest datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Only the nearest datum.
    Single,
    /// Every candidate returned by the nearest lookup, unchanged order.
    SelectOverlapping,
    /// The nearest datum plus every datum across all non-overlay series whose
    /// domain equals the nearest domain or whose bound interval contains it.
    #[default]
    ExpandToDomain,
}

/// Resolves the nearest datum at the input point and updates the target
/// selection model.
///
/// Candidates are sorted by ascending domain distance, optionally discarded
/// beyond `maximum_domain_distance`, then expanded per [`SelectionMode`].
/// A gesture cancel (and, for the hover trigger, pointer exit) deselects.
pub struct SelectNearest {
    role: SelectionRole,
    role_id: String,
    trigger: SelectionTrigger,
    mode: SelectionMode,
    select_closest_series: bool,
    maximum_domain_distance_px: Option<f64>,
    hover_throttle_seconds: Option<f64>,
    pending_hover: Option<Point>,
    hover_waited: f64,
}

impl SelectNearest {
    #[must_use]
    pub fn new(role: SelectionRole, trigger: SelectionTrigger) -> Self {
        Self {
            role,
            role_id: format!("select-nearest-{}", role.name()),
            trigger,
            mode: SelectionMode::default(),
            select_closest_series: true,
            maximum_domain_distance_px: None,
            hover_throttle_seconds: None,
            pending_hover: None,
            hover_waited: 0.0,
        }
    }

    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_select_closest_series(mut self, enabled: bool) -> Self {
        self.select_closest_series = enabled;
        self
    }

    /// Discards candidates farther than `pixels` along the domain axis.
    #[must_use]
    pub fn with_maximum_domain_distance(mut self, pixels: f64) -> Self {
        self.maximum_domain_distance_px = Some(pixels);
        self
    }

    /// Defers hover selection until no new hover event arrives within
    /// `seconds` of deterministic time stepping; superseded hovers are
    /// discarded (last event wins). Requires the hover trigger.
    #[must_use]
    pub fn with_hover_throttle(mut self, seconds: f64) -> Self {
        self.hover_throttle_seconds = Some(seconds);
        self
    }

    fn deselect<D: DomainValue>(&mut self, state: &mut ChartState<D>) {
        self.pending_hover = None;
        state.update_selection(self.role, &[], &[]);
    }

    fn run_select<D: DomainValue>(&self, state: &mut ChartState<D>, point: Point) {
        let coordinate = match state.axis().direction() {
            AxisDirection::Horizontal => point.x,
            AxisDirection::Vertical => point.y,
        };

        let mut candidates = state.nearest_datum_per_series(point, false);
        sort_by_domain_distance(&mut candidates);
        if let Some(max) = self.maximum_domain_distance_px {
            candidates.retain(|c| c.domain_distance <= max);
        }

        let Some(nearest) = candidates.first().cloned() else {
            state.update_selection(self.role, &[], &[]);
            return;
        };

        let details: Vec<DatumDetails<D>> = match self.mode {
            SelectionMode::Single => vec![nearest.clone()],
            SelectionMode::SelectOverlapping => candidates,
            SelectionMode::ExpandToDomain => expand_to_domain(state, &nearest, coordinate),
        };

        let data: Vec<SeriesDatum> = details.iter().map(DatumDetails::datum).collect();
        let series_ids = self.selected_series_ids(&nearest, &details);
        state.update_selection(self.role, &data, &series_ids);
    }

    /// Series marked as wholly selected, when `select_closest_series` is on:
    /// the nearest candidate's series, unless that series is an overlay, in
    /// which case a re-sorted copy of the final set yields the closest
    /// non-overlay series.
    fn selected_series_ids<D: DomainValue>(
        &self,
        nearest: &DatumDetails<D>,
        details: &[DatumDetails<D>],
    ) -> Vec<String> {
        if !self.select_closest_series {
            return Vec::new();
        }
        if !nearest.overlay {
            return vec![nearest.series_id.clone()];
        }

        let mut copy: Vec<&DatumDetails<D>> = details.iter().collect();
        copy.sort_by_key(|d| OrderedFloat(d.domain_distance));
        copy.iter()
            .find(|d| !d.overlay)
            .map(|d| vec![d.series_id.clone()])
            .unwrap_or_default()
    }
}

impl<D: DomainValue> ChartBehavior<D> for SelectNearest {
    fn role(&self) -> &str {
        &self.role_id
    }

    fn attach(&mut self, _state: &mut ChartState<D>) -> ChartResult<()> {
        if let Some(seconds) = self.hover_throttle_seconds {
            if self.trigger != SelectionTrigger::Hover {
                return Err(ChartError::InvalidConfig(
                    "hover throttle requires the hover trigger".to_owned(),
                ));
            }
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "hover throttle delay must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(())
    }

    fn dispose(&mut self, _state: &mut ChartState<D>) {
        self.pending_hover = None;
        self.hover_waited = 0.0;
    }

    fn wants_gesture(&self, kind: GestureKind) -> bool {
        self.trigger.select_kinds().contains(&kind)
            || kind == GestureKind::Cancel
            || (self.trigger == SelectionTrigger::Hover && kind == GestureKind::Exit)
    }

    fn on_gesture(&mut self, event: GestureEvent, state: &mut ChartState<D>) -> bool {
        match event {
            GestureEvent::Cancel => {
                self.deselect(state);
                true
            }
            GestureEvent::Exit => {
                if self.trigger == SelectionTrigger::Hover {
                    self.deselect(state);
                    true
                } else {
                    false
                }
            }
            _ => {
                if !self.trigger.select_kinds().contains(&event.kind()) {
                    return false;
                }
                let Some(point) = event.point() else {
                    return false;
                };

                if self.trigger == SelectionTrigger::Hover && self.hover_throttle_seconds.is_some()
                {
                    self.pending_hover = Some(point);
                    self.hover_waited = 0.0;
                } else {
                    self.run_select(state, point);
                }
                true
            }
        }
    }

    fn on_advance(&mut self, state: &mut ChartState<D>, elapsed_seconds: f64) {
        let Some(delay) = self.hover_throttle_seconds else {
            return;
        };
        let Some(point) = self.pending_hover else {
            return;
        };

        self.hover_waited += elapsed_seconds;
        if self.hover_waited >= delay {
            self.pending_hover = None;
            self.hover_waited = 0.0;
            self.run_select(state, point);
        }
    }
}

/// Every datum across all non-overlay series matching the nearest domain by
/// equality, or whose lower/upper bound interval contains it (inclusive).
/// The two tests are independent; either match includes the datum.
fn expand_to_domain<D: DomainValue>(
    state: &ChartState<D>,
    nearest: &DatumDetails<D>,
    coordinate: f64,
) -> Vec<DatumDetails<D>> {
    let mut expanded = Vec::new();
    for series in state.series_list() {
        if series.overlay() {
            continue;
        }
        for index in 0..series.len() {
            let domain = series.domain(index);
            let equals = domain == nearest.domain;
            let contained = match (series.domain_lower(index), series.domain_upper(index)) {
                (Some(lower), Some(upper)) => nearest.domain.within(&lower, &upper),
                _ => false,
            };
            if equals || contained {
                expanded.push(DatumDetails {
                    series_id: series.id().to_owned(),
                    index,
                    domain_distance: state.domain_distance(&domain, coordinate),
                    domain,
                    measure: series.measure(index),
                    overlay: false,
                });
            }
        }
    }
    expanded
}
