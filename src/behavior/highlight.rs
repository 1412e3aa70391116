use indexmap::IndexSet;

use crate::behavior::ChartBehavior;
use crate::behavior::chart::ChartState;
use crate::core::domain::DomainValue;
use crate::core::types::Color;
use crate::error::ChartResult;
use crate::selection::SelectionRole;

const DEFAULT_SHADE_FACTOR: f64 = 0.7;
const DEFAULT_STROKE: f64 = 2.0;
const DEFAULT_STROKE_PADDING: f64 = 1.0;

/// Darkens the draw color of selected datums.
///
/// On every postprocess pass the current selection snapshot is installed as a
/// color-accessor layer keyed by this behavior's role, so repeated passes and
/// reattachment never compound the shade. Selection changes refresh the layer
/// and request a repaint that skips layout and animation.
pub struct DomainHighlighter {
    role: SelectionRole,
    role_id: String,
    shade_factor: f64,
}

impl DomainHighlighter {
    #[must_use]
    pub fn new(role: SelectionRole) -> Self {
        Self {
            role,
            role_id: format!("domain-highlighter-{}", role.name()),
            shade_factor: DEFAULT_SHADE_FACTOR,
        }
    }

    #[must_use]
    pub fn with_shade_factor(mut self, factor: f64) -> Self {
        self.shade_factor = factor;
        self
    }

    fn refresh<D: DomainValue>(&self, state: &mut ChartState<D>) {
        let snapshots = selection_snapshots(state, self.role);
        let shade = self.shade_factor;
        for (series, selected) in state.series_mut().iter_mut().zip(snapshots) {
            series
                .color_stack_mut()
                .set_layer(&self.role_id, move |index, color: Color| {
                    if selected.contains(&index) {
                        color.darker(shade)
                    } else {
                        color
                    }
                });
        }
    }
}

impl<D: DomainValue> ChartBehavior<D> for DomainHighlighter {
    fn role(&self) -> &str {
        &self.role_id
    }

    fn attach(&mut self, state: &mut ChartState<D>) -> ChartResult<()> {
        self.refresh(state);
        Ok(())
    }

    fn dispose(&mut self, state: &mut ChartState<D>) {
        for series in state.series_mut() {
            series.color_stack_mut().remove_layer(&self.role_id);
        }
    }

    fn on_postprocess(&mut self, state: &mut ChartState<D>) {
        self.refresh(state);
    }

    fn on_selection_change(&mut self, role: SelectionRole, state: &mut ChartState<D>) {
        if role != self.role {
            return;
        }
        self.refresh(state);
        state.request_redraw(true, true);
    }
}

/// Darkens the draw color and widens the stroke of selected datums.
///
/// Stroke decoration uses `default_stroke` when the series carries no stroke
/// accessor of its own, otherwise the existing width plus `stroke_padding`.
pub struct DomainOutliner {
    role: SelectionRole,
    role_id: String,
    shade_factor: f64,
    default_stroke: f64,
    stroke_padding: f64,
}

impl DomainOutliner {
    #[must_use]
    pub fn new(role: SelectionRole) -> Self {
        Self {
            role,
            role_id: format!("domain-outliner-{}", role.name()),
            shade_factor: DEFAULT_SHADE_FACTOR,
            default_stroke: DEFAULT_STROKE,
            stroke_padding: DEFAULT_STROKE_PADDING,
        }
    }

    #[must_use]
    pub fn with_shade_factor(mut self, factor: f64) -> Self {
        self.shade_factor = factor;
        self
    }

    #[must_use]
    pub fn with_default_stroke(mut self, width: f64) -> Self {
        self.default_stroke = width;
        self
    }

    #[must_use]
    pub fn with_stroke_padding(mut self, padding: f64) -> Self {
        self.stroke_padding = padding;
        self
    }

    fn refresh<D: DomainValue>(&self, state: &mut ChartState<D>) {
        let snapshots = selection_snapshots(state, self.role);
        let shade = self.shade_factor;
        let default_stroke = self.default_stroke;
        let padding = self.stroke_padding;

        for (series, selected) in state.series_mut().iter_mut().zip(snapshots) {
            let custom_stroke = series.has_custom_stroke();
            let stroke_selected = selected.clone();

            series
                .color_stack_mut()
                .set_layer(&self.role_id, move |index, color: Color| {
                    if selected.contains(&index) {
                        color.darker(shade)
                    } else {
                        color
                    }
                });
            series
                .stroke_width_stack_mut()
                .set_layer(&self.role_id, move |index, width: f64| {
                    if !stroke_selected.contains(&index) {
                        width
                    } else if custom_stroke {
                        width + padding
                    } else {
                        default_stroke
                    }
                });
        }
    }
}

impl<D: DomainValue> ChartBehavior<D> for DomainOutliner {
    fn role(&self) -> &str {
        &self.role_id
    }

    fn attach(&mut self, state: &mut ChartState<D>) -> ChartResult<()> {
        self.refresh(state);
        Ok(())
    }

    fn dispose(&mut self, state: &mut ChartState<D>) {
        for series in state.series_mut() {
            series.color_stack_mut().remove_layer(&self.role_id);
            series.stroke_width_stack_mut().remove_layer(&self.role_id);
        }
    }

    fn on_postprocess(&mut self, state: &mut ChartState<D>) {
        self.refresh(state);
    }

    fn on_selection_change(&mut self, role: SelectionRole, state: &mut ChartState<D>) {
        if role != self.role {
            return;
        }
        self.refresh(state);
        state.request_redraw(true, true);
    }
}

/// Per-series selected-index snapshots, in series-list order.
fn selection_snapshots<D: DomainValue>(
    state: &ChartState<D>,
    role: SelectionRole,
) -> Vec<IndexSet<usize>> {
    let model = state.selection_model(role);
    state
        .series_list()
        .iter()
        .map(|series| model.selected_indices(series.id()))
        .collect()
}
