use std::rc::Rc;

use indexmap::IndexMap;

use crate::a11y::{A11yNode, FocusSelection, order_nodes};
use crate::behavior::ChartBehavior;
use crate::behavior::chart::ChartState;
use crate::core::domain::DomainValue;
use crate::core::series::SeriesDatum;
use crate::core::types::{AxisDirection, Rect};
use crate::selection::SelectionRole;

const DEFAULT_MINIMUM_WIDTH: f64 = 1.0;

/// Builds one focusable strip per domain value.
///
/// All series data is grouped by domain value (keyed by value, so sparse
/// series align), each group resolves a pixel location and a step-sized
/// bounding strip from the axis, and focusing a node selects the group's data
/// on the `Info` model. Domains without resolvable geometry this frame are
/// skipped. Node order follows [`crate::a11y::order_nodes`].
pub struct DomainA11yExploreBehavior<D: DomainValue> {
    role_id: String,
    vocalization: Rc<dyn Fn(&D) -> String>,
    minimum_width: f64,
}

impl<D: DomainValue> DomainA11yExploreBehavior<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            role_id: "domain-a11y-explore".to_owned(),
            vocalization: Rc::new(|domain: &D| domain.describe()),
            minimum_width: DEFAULT_MINIMUM_WIDTH,
        }
    }

    /// Replaces the label formatter used for screen-reader output.
    #[must_use]
    pub fn with_vocalization(mut self, f: impl Fn(&D) -> String + 'static) -> Self {
        self.vocalization = Rc::new(f);
        self
    }

    /// Lower bound for strip width, for touch targets on dense charts.
    #[must_use]
    pub fn with_minimum_width(mut self, width: f64) -> Self {
        self.minimum_width = width.max(0.0);
        self
    }
}

impl<D: DomainValue> Default for DomainA11yExploreBehavior<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomainValue> ChartBehavior<D> for DomainA11yExploreBehavior<D> {
    fn role(&self) -> &str {
        &self.role_id
    }

    fn build_a11y_nodes(&mut self, state: &ChartState<D>) -> Vec<A11yNode> {
        let mut groups: IndexMap<D::Key, (D, Vec<SeriesDatum>)> = IndexMap::new();
        for series in state.series_list() {
            for index in 0..series.len() {
                let domain = series.domain(index);
                groups
                    .entry(domain.key())
                    .or_insert_with(|| (domain.clone(), Vec::new()))
                    .1
                    .push(SeriesDatum::new(series.id(), index));
            }
        }

        let vertical = state.axis().direction() == AxisDirection::Vertical;
        let rtl = state.is_rtl();
        let step = state.axis().step_size().max(self.minimum_width);
        let draw_bounds = state.draw_bounds();

        let mut nodes: Vec<A11yNode> = groups
            .into_values()
            .filter_map(|(domain, data)| {
                let location = state.axis().location_of(&domain)?;
                let bounds = if vertical {
                    Rect::new(
                        draw_bounds.left,
                        location - step / 2.0,
                        draw_bounds.width,
                        step,
                    )
                } else {
                    Rect::new(
                        location - step / 2.0,
                        draw_bounds.top,
                        step,
                        draw_bounds.height,
                    )
                };
                Some(A11yNode {
                    label: (self.vocalization)(&domain),
                    bounds,
                    location,
                    rendered_vertically: vertical,
                    is_rtl: rtl,
                    focus: Some(FocusSelection {
                        role: SelectionRole::Info,
                        data,
                    }),
                })
            })
            .collect();

        order_nodes(&mut nodes);
        nodes
    }
}
