use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::a11y::A11yNode;
use crate::behavior::{ChartBehavior, GestureEvent};
use crate::core::axis::DomainAxis;
use crate::core::domain::DomainValue;
use crate::core::series::{DatumDetails, Series, SeriesDatum};
use crate::core::types::{AxisDirection, PixelRange, Point, Rect};
use crate::error::ChartResult;
use crate::selection::{SelectionModel, SelectionRole};

/// Chart variant, used for attach-time capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Cartesian,
    Radial,
}

/// Pending redraw raised by behaviors, consumed by the render host.
///
/// Merging two requests keeps the stronger one: a full redraw wins over a
/// repaint that skips layout or animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedrawRequest {
    pub skip_layout: bool,
    pub skip_animation: bool,
}

/// Shared chart state exposed to behaviors.
///
/// Owns the domain axis, the current series list, and one selection model per
/// role. Only the chart host replaces the series list; only behaviors mutate
/// selection models.
pub struct ChartState<D: DomainValue> {
    kind: ChartKind,
    rtl: bool,
    axis: DomainAxis<D>,
    draw_bounds: Rect,
    series: Vec<Series<D>>,
    selections: IndexMap<SelectionRole, SelectionModel>,
    pending_changes: IndexSet<SelectionRole>,
    redraw: Option<RedrawRequest>,
}

impl<D: DomainValue> ChartState<D> {
    #[must_use]
    pub fn new(axis: DomainAxis<D>) -> Self {
        let mut selections = IndexMap::new();
        selections.insert(SelectionRole::Info, SelectionModel::new());
        selections.insert(SelectionRole::Action, SelectionModel::new());
        Self {
            kind: ChartKind::Cartesian,
            rtl: false,
            axis,
            draw_bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            series: Vec::new(),
            selections,
            pending_changes: IndexSet::new(),
            redraw: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    #[must_use]
    pub fn axis(&self) -> &DomainAxis<D> {
        &self.axis
    }

    pub fn axis_mut(&mut self) -> &mut DomainAxis<D> {
        &mut self.axis
    }

    /// Mutates pan/zoom state and raises a full redraw.
    pub fn set_viewport(&mut self, scale_factor: f64, translate_px: f64) -> ChartResult<()> {
        self.axis.set_viewport(scale_factor, translate_px)?;
        debug!(scale_factor, translate_px, "viewport updated");
        self.request_redraw(false, false);
        Ok(())
    }

    /// Replaces the series list wholesale and prunes selections whose series
    /// disappeared. Roles whose selection shrank are queued for notification.
    pub fn set_series(&mut self, series: Vec<Series<D>>) {
        self.series = series;

        let lens: IndexMap<String, usize> = self
            .series
            .iter()
            .map(|s| (s.id().to_owned(), s.len()))
            .collect();
        for (role, model) in &mut self.selections {
            if model.prune_missing(&lens) {
                debug!(role = role.name(), "selection pruned after series update");
                self.pending_changes.insert(*role);
            }
        }
    }

    #[must_use]
    pub fn series_list(&self) -> &[Series<D>] {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut [Series<D>] {
        &mut self.series
    }

    #[must_use]
    pub fn series_by_id(&self, series_id: &str) -> Option<&Series<D>> {
        self.series.iter().find(|s| s.id() == series_id)
    }

    #[must_use]
    pub fn draw_bounds(&self) -> Rect {
        self.draw_bounds
    }

    /// Runs the layout pass: binds the domain extent from the current series
    /// and assigns the axis pixel range from the draw area.
    pub fn lay_out(&mut self, draw_bounds: Rect) {
        self.draw_bounds = draw_bounds;

        let mut domains = Vec::new();
        for series in &self.series {
            for index in 0..series.len() {
                domains.push(series.domain(index));
            }
        }
        self.axis.bind_domains(&domains);

        let range = match self.axis.direction() {
            AxisDirection::Horizontal => PixelRange::new(draw_bounds.left, draw_bounds.width),
            AxisDirection::Vertical => PixelRange::new(draw_bounds.top, draw_bounds.height),
        };
        self.axis.lay_out(range);
    }

    #[must_use]
    pub fn selection_model(&self, role: SelectionRole) -> &SelectionModel {
        &self.selections[&role]
    }

    /// Replaces the selection for `role`, queueing a change notification when
    /// the state actually changed. Returns the changed flag.
    pub fn update_selection(
        &mut self,
        role: SelectionRole,
        data: &[SeriesDatum],
        series_ids: &[String],
    ) -> bool {
        let model = self.selections.get_mut(&role).expect("role model exists");
        let changed = model.update_selection(data, series_ids);
        if changed {
            debug!(role = role.name(), data_len = data.len(), "selection updated");
            self.pending_changes.insert(role);
        }
        changed
    }

    /// Clears the selection for `role`, queueing a notification when it was
    /// non-empty. Permitted even while locked.
    pub fn clear_selection(&mut self, role: SelectionRole) {
        let model = self.selections.get_mut(&role).expect("role model exists");
        if model.clear() {
            debug!(role = role.name(), "selection cleared");
            self.pending_changes.insert(role);
        }
    }

    pub fn set_locked(&mut self, role: SelectionRole, locked: bool) {
        let model = self.selections.get_mut(&role).expect("role model exists");
        model.set_locked(locked);
        debug!(role = role.name(), locked, "selection lock toggled");
    }

    /// Raises a redraw request, merged with any pending request.
    pub fn request_redraw(&mut self, skip_layout: bool, skip_animation: bool) {
        let merged = match self.redraw {
            Some(current) => RedrawRequest {
                skip_layout: current.skip_layout && skip_layout,
                skip_animation: current.skip_animation && skip_animation,
            },
            None => RedrawRequest {
                skip_layout,
                skip_animation,
            },
        };
        self.redraw = Some(merged);
    }

    /// Consumes the pending redraw request, if any. Called by the host once
    /// per frame.
    pub fn take_redraw(&mut self) -> Option<RedrawRequest> {
        self.redraw.take()
    }

    /// Nearest datum per series at `point`, measured in pixels along the
    /// domain axis. Series with no resolvable geometry this frame are
    /// skipped.
    ///
    /// `_cross_component` exists for interface parity with multi-component
    /// hosts; a single domain axis makes it a no-op.
    #[must_use]
    pub fn nearest_datum_per_series(
        &self,
        point: Point,
        _cross_component: bool,
    ) -> Vec<DatumDetails<D>> {
        let coordinate = match self.axis.direction() {
            AxisDirection::Horizontal => point.x,
            AxisDirection::Vertical => point.y,
        };

        let mut results = Vec::new();
        for series in &self.series {
            let mut best: Option<(usize, f64)> = None;
            for index in 0..series.len() {
                let Some(location) = self.axis.location_of(&series.domain(index)) else {
                    continue;
                };
                let distance = (location - coordinate).abs();
                if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                    best = Some((index, distance));
                }
            }

            if let Some((index, distance)) = best {
                results.push(DatumDetails {
                    series_id: series.id().to_owned(),
                    index,
                    domain: series.domain(index),
                    measure: series.measure(index),
                    domain_distance: distance,
                    overlay: series.overlay(),
                });
            }
        }
        results
    }

    /// Pixel distance from `coordinate` to `domain`, or infinity when the
    /// domain has no resolvable location this frame.
    pub(crate) fn domain_distance(&self, domain: &D, coordinate: f64) -> f64 {
        self.axis
            .location_of(domain)
            .map_or(f64::INFINITY, |location| (location - coordinate).abs())
    }

    fn take_pending_changes(&mut self) -> SmallVec<[SelectionRole; 2]> {
        self.pending_changes.drain(..).collect()
    }
}

/// Chart host harness: owns the chart state and the behavior chain, and runs
/// the per-frame lifecycle on behalf of the rendering host.
///
/// Hooks receive the chart state but never the behavior registry, so
/// behaviors cannot observe one another.
pub struct CartesianChart<D: DomainValue> {
    state: ChartState<D>,
    behaviors: IndexMap<String, Box<dyn ChartBehavior<D>>>,
}

impl<D: DomainValue> CartesianChart<D> {
    #[must_use]
    pub fn new(axis: DomainAxis<D>) -> Self {
        Self::from_state(ChartState::new(axis))
    }

    #[must_use]
    pub fn from_state(state: ChartState<D>) -> Self {
        Self {
            state,
            behaviors: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ChartState<D> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ChartState<D> {
        &mut self.state
    }

    /// Registers a behavior under its role.
    ///
    /// An existing behavior with the same role is disposed before the new one
    /// attaches; a failed attach leaves no registration behind.
    pub fn attach_behavior(&mut self, mut behavior: Box<dyn ChartBehavior<D>>) -> ChartResult<()> {
        let role = behavior.role().to_owned();
        if let Some(mut previous) = self.behaviors.shift_remove(&role) {
            debug!(role = %role, "replacing behavior");
            previous.dispose(&mut self.state);
        }

        behavior.attach(&mut self.state)?;
        debug!(role = %role, "behavior attached");
        self.behaviors.insert(role, behavior);
        self.dispatch_selection_changes();
        Ok(())
    }

    /// Disposes and removes the behavior registered under `role`.
    pub fn detach_behavior(&mut self, role: &str) -> bool {
        let Some(mut behavior) = self.behaviors.shift_remove(role) else {
            return false;
        };
        behavior.dispose(&mut self.state);
        debug!(role, "behavior detached");
        self.dispatch_selection_changes();
        true
    }

    #[must_use]
    pub fn behavior_roles(&self) -> Vec<&str> {
        self.behaviors.keys().map(String::as_str).collect()
    }

    /// Replaces the series list. The host is expected to follow up with
    /// `postprocess` and `lay_out` before the next paint.
    pub fn set_series(&mut self, series: Vec<Series<D>>) {
        self.state.set_series(series);
    }

    pub fn lay_out(&mut self, draw_bounds: Rect) {
        self.state.lay_out(draw_bounds);
    }

    /// Runs every behavior's postprocess hook in registration order, then
    /// delivers any resulting selection changes.
    pub fn postprocess(&mut self) {
        for behavior in self.behaviors.values_mut() {
            behavior.on_postprocess(&mut self.state);
        }
        self.dispatch_selection_changes();
    }

    /// Offers a gesture event to behaviors in registration order until one
    /// consumes it, then delivers any resulting selection changes.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> bool {
        let kind = event.kind();
        let mut handled = false;
        for behavior in self.behaviors.values_mut() {
            if behavior.wants_gesture(kind) && behavior.on_gesture(event, &mut self.state) {
                handled = true;
                break;
            }
        }
        self.dispatch_selection_changes();
        handled
    }

    /// Advances deterministic timers (hover debounce) by `elapsed_seconds`.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        for behavior in self.behaviors.values_mut() {
            behavior.on_advance(&mut self.state, elapsed_seconds);
        }
        self.dispatch_selection_changes();
    }

    /// Rebuilds the focus-target list from every attached behavior.
    #[must_use]
    pub fn a11y_nodes(&mut self) -> Vec<A11yNode> {
        let mut nodes = Vec::new();
        for behavior in self.behaviors.values_mut() {
            nodes.extend(behavior.build_a11y_nodes(&self.state));
        }
        nodes
    }

    /// Applies the focus action of an accessibility node, if it carries one.
    pub fn focus_node(&mut self, node: &A11yNode) {
        let Some(focus) = &node.focus else {
            return;
        };

        let mut series_ids: Vec<String> = Vec::new();
        for datum in &focus.data {
            if !series_ids.contains(&datum.series_id) {
                series_ids.push(datum.series_id.clone());
            }
        }
        self.state
            .update_selection(focus.role, &focus.data, &series_ids);
        self.dispatch_selection_changes();
    }

    /// Delivers queued selection changes to every behavior, in registration
    /// order, at most once per role per external trigger.
    ///
    /// Changes raised from within a listener (for another role) are delivered
    /// in the same pass; a role already notified this trigger is not
    /// re-notified, which breaks notification cycles.
    fn dispatch_selection_changes(&mut self) {
        let mut notified: IndexSet<SelectionRole> = IndexSet::new();
        loop {
            let pending = self.state.take_pending_changes();
            let fresh: SmallVec<[SelectionRole; 2]> = pending
                .into_iter()
                .filter(|role| !notified.contains(role))
                .collect();
            if fresh.is_empty() {
                break;
            }

            for role in fresh {
                notified.insert(role);
                for behavior in self.behaviors.values_mut() {
                    behavior.on_selection_change(role, &mut self.state);
                }
            }
        }
    }
}

/// Sorts nearest-candidate details by ascending domain distance, preserving
/// discovery order between equal distances.
pub(crate) fn sort_by_domain_distance<D: DomainValue>(details: &mut [DatumDetails<D>]) {
    details.sort_by_key(|d| OrderedFloat(d.domain_distance));
}
