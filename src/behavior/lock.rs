use crate::behavior::chart::ChartState;
use crate::behavior::{ChartBehavior, GestureEvent, GestureKind};
use crate::core::domain::DomainValue;
use crate::selection::SelectionRole;

/// Tap-toggled selection lock.
///
/// Two states: Unlocked and Locked. A tap locks only when the target model
/// has an active selection (locking "nothing" is refused as not-handled); a
/// tap while locked always unlocks and clears the selection.
pub struct LockSelection {
    role: SelectionRole,
    role_id: String,
}

impl LockSelection {
    #[must_use]
    pub fn new(role: SelectionRole) -> Self {
        Self {
            role,
            role_id: format!("lock-selection-{}", role.name()),
        }
    }
}

impl<D: DomainValue> ChartBehavior<D> for LockSelection {
    fn role(&self) -> &str {
        &self.role_id
    }

    fn wants_gesture(&self, kind: GestureKind) -> bool {
        kind == GestureKind::Tap
    }

    fn on_gesture(&mut self, event: GestureEvent, state: &mut ChartState<D>) -> bool {
        if event.kind() != GestureKind::Tap {
            return false;
        }

        let model = state.selection_model(self.role);
        if model.locked() {
            state.set_locked(self.role, false);
            state.clear_selection(self.role);
            true
        } else if model.is_empty() {
            false
        } else {
            state.set_locked(self.role, true);
            true
        }
    }
}
