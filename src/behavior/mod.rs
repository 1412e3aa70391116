pub mod chart;
pub mod highlight;
pub mod lock;
pub mod select_nearest;
pub mod sliding_viewport;
pub mod sunburst;

use serde::{Deserialize, Serialize};

use crate::a11y::A11yNode;
use crate::core::domain::DomainValue;
use crate::core::types::Point;
use crate::error::ChartResult;

pub use chart::{CartesianChart, ChartKind, ChartState, RedrawRequest};
pub use highlight::{DomainHighlighter, DomainOutliner};
pub use lock::LockSelection;
pub use select_nearest::{SelectNearest, SelectionMode, SelectionTrigger};
pub use sliding_viewport::SlidingViewport;
pub use sunburst::SunburstRingExpander;

/// Kind of a gesture event, used for dispatch filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Hover,
    Tap,
    PressHold,
    LongPressHold,
    Drag,
    Cancel,
    Exit,
}

/// A single pointer/gesture event in chart-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Hover(Point),
    Tap(Point),
    PressHold(Point),
    LongPressHold(Point),
    Drag(Point),
    /// Gesture recognizer cancelled an in-flight gesture.
    Cancel,
    /// Pointer left the chart area.
    Exit,
}

impl GestureEvent {
    #[must_use]
    pub fn kind(self) -> GestureKind {
        match self {
            GestureEvent::Hover(_) => GestureKind::Hover,
            GestureEvent::Tap(_) => GestureKind::Tap,
            GestureEvent::PressHold(_) => GestureKind::PressHold,
            GestureEvent::LongPressHold(_) => GestureKind::LongPressHold,
            GestureEvent::Drag(_) => GestureKind::Drag,
            GestureEvent::Cancel => GestureKind::Cancel,
            GestureEvent::Exit => GestureKind::Exit,
        }
    }

    #[must_use]
    pub fn point(self) -> Option<Point> {
        match self {
            GestureEvent::Hover(p)
            | GestureEvent::Tap(p)
            | GestureEvent::PressHold(p)
            | GestureEvent::LongPressHold(p)
            | GestureEvent::Drag(p) => Some(p),
            GestureEvent::Cancel | GestureEvent::Exit => None,
        }
    }
}

/// A composable unit of chart interaction logic.
///
/// Behaviors observe lifecycle hooks and selection-model changes, and mutate
/// series accessors, selection models, or the viewport. No behavior is aware
/// of any other behavior; every hook receives the chart state for the
/// duration of the call and must not retain it.
///
/// Behaviors are keyed by `role`: attaching a behavior whose role is already
/// registered disposes and replaces the previous instance.
pub trait ChartBehavior<D: DomainValue> {
    /// Registry key. Attaching another behavior with the same role replaces
    /// this one.
    fn role(&self) -> &str;

    /// Called once when the behavior is registered. Integration
    /// misconfiguration (wrong chart kind, unsupported trigger) must fail
    /// here rather than degrade later.
    fn attach(&mut self, _state: &mut ChartState<D>) -> ChartResult<()> {
        Ok(())
    }

    /// Called once when the behavior is removed or replaced. Must undo every
    /// decoration installed by `attach`/`on_postprocess`.
    fn dispose(&mut self, _state: &mut ChartState<D>) {}

    /// Lifecycle hook: series data finalized for the frame, layout not yet
    /// run.
    fn on_postprocess(&mut self, _state: &mut ChartState<D>) {}

    /// A selection model changed as the result of one external trigger.
    ///
    /// Implementations must not call `update_selection` on the model for
    /// `role` from within this hook; the dispatch loop fires each listener at
    /// most once per trigger and re-entrant updates would be dropped.
    fn on_selection_change(
        &mut self,
        _role: crate::selection::SelectionRole,
        _state: &mut ChartState<D>,
    ) {
    }

    /// Whether this behavior wants events of `kind`.
    fn wants_gesture(&self, _kind: GestureKind) -> bool {
        false
    }

    /// Handles a gesture event. Returns whether the event was consumed.
    fn on_gesture(&mut self, _event: GestureEvent, _state: &mut ChartState<D>) -> bool {
        false
    }

    /// Deterministic time stepping for debounced work.
    fn on_advance(&mut self, _state: &mut ChartState<D>, _elapsed_seconds: f64) {}

    /// Focusable accessibility nodes contributed by this behavior.
    fn build_a11y_nodes(&mut self, _state: &ChartState<D>) -> Vec<A11yNode> {
        Vec::new()
    }
}
