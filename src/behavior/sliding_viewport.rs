use tracing::warn;

use crate::behavior::ChartBehavior;
use crate::behavior::chart::{ChartKind, ChartState};
use crate::core::domain::DomainValue;
use crate::error::{ChartError, ChartResult};
use crate::selection::SelectionRole;

/// Centers the viewport on the domain of the first selected datum.
///
/// On selection change the behavior converts the domain to its pixel
/// location, computes the current viewport center, and shifts the translate
/// by the difference; the resulting viewport mutation raises a full redraw
/// (layout and animation included). Cartesian charts only; attach fails fast
/// elsewhere.
pub struct SlidingViewport {
    role: SelectionRole,
    role_id: String,
}

impl SlidingViewport {
    #[must_use]
    pub fn new(role: SelectionRole) -> Self {
        Self {
            role,
            role_id: format!("sliding-viewport-{}", role.name()),
        }
    }
}

impl<D: DomainValue> ChartBehavior<D> for SlidingViewport {
    fn role(&self) -> &str {
        &self.role_id
    }

    fn attach(&mut self, state: &mut ChartState<D>) -> ChartResult<()> {
        if state.kind() != ChartKind::Cartesian {
            return Err(ChartError::InvalidConfig(
                "sliding viewport requires a cartesian chart".to_owned(),
            ));
        }
        Ok(())
    }

    fn on_selection_change(&mut self, role: SelectionRole, state: &mut ChartState<D>) {
        if role != self.role {
            return;
        }

        let Some(datum) = state.selection_model(self.role).first_selected_datum() else {
            return;
        };
        let Some(series) = state.series_by_id(&datum.series_id) else {
            return;
        };
        if datum.index >= series.len() {
            return;
        }
        let domain = series.domain(datum.index);

        // Missing geometry (not laid out yet, filtered out) skips this frame.
        let Some(location) = state.axis().location_of(&domain) else {
            return;
        };

        let center = state.axis().range().center();
        let translate = state.axis().viewport_translate() + (center - location);
        let scale_factor = state.axis().viewport_scale_factor();
        if let Err(error) = state.set_viewport(scale_factor, translate) {
            warn!(%error, "sliding viewport update rejected");
        }
    }
}
