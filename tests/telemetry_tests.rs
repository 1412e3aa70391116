#![cfg(feature = "telemetry")]

use chartkit::behavior::{GestureEvent, SelectNearest, SelectionTrigger};
use chartkit::core::{AxisDirection, DomainAxis, Point, Rect, Series};
use chartkit::selection::SelectionRole;
use chartkit::telemetry::init_default_tracing;
use chartkit::CartesianChart;

#[test]
fn init_claims_the_global_subscriber_exactly_once() {
    assert!(init_default_tracing());
    // The global slot is taken now; a second init is refused.
    assert!(!init_default_tracing());

    // Run an instrumented interaction end to end under the subscriber.
    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Info,
            SelectionTrigger::Tap,
        )))
        .expect("attach select nearest");
    let series = Series::builder("s", vec![1.0, 2.0, 3.0], |d: &f64| *d)
        .measure(|d| Some(*d))
        .build();
    chart.set_series(vec![series]);
    chart.postprocess();
    chart.lay_out(Rect::new(0.0, 0.0, 300.0, 200.0));

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(150.0, 100.0))));
    assert!(!chart.state().selection_model(SelectionRole::Info).is_empty());
}
