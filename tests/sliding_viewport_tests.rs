use chartkit::behavior::{
    ChartKind, GestureEvent, SelectNearest, SelectionTrigger, SlidingViewport,
};
use chartkit::core::{AxisDirection, DomainAxis, Point, Rect, Series, SeriesDatum};
use chartkit::selection::SelectionRole;
use chartkit::{CartesianChart, ChartError, ChartState};

fn chart() -> CartesianChart<f64> {
    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Info,
            SelectionTrigger::Tap,
        )))
        .expect("attach select nearest");
    chart
        .attach_behavior(Box::new(SlidingViewport::new(SelectionRole::Info)))
        .expect("attach sliding viewport");

    let series = Series::builder("s", vec![0.0, 80.0, 100.0], |d: &f64| *d)
        .measure(|d| Some(*d))
        .build();
    chart.set_series(vec![series]);
    chart.postprocess();
    // Extent [0,100] over 1000px: domain 80 sits at x=800, center at x=500.
    chart.lay_out(Rect::new(0.0, 0.0, 1000.0, 200.0));
    chart
}

#[test]
fn selection_centers_the_viewport_on_the_selected_domain() {
    let mut chart = chart();
    let _ = chart.state_mut().take_redraw();

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(800.0, 100.0))));

    assert_eq!(chart.state().axis().viewport_translate(), -300.0);
    assert_eq!(chart.state().axis().viewport_scale_factor(), 1.0);
}

#[test]
fn viewport_shift_raises_a_full_redraw() {
    let mut chart = chart();
    let _ = chart.state_mut().take_redraw();

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(800.0, 100.0))));

    let redraw = chart.state_mut().take_redraw().expect("redraw requested");
    assert!(!redraw.skip_layout);
    assert!(!redraw.skip_animation);
}

#[test]
fn centering_an_already_centered_domain_is_a_no_op_shift() {
    let mut chart = chart();

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(800.0, 100.0))));
    assert_eq!(chart.state().axis().viewport_translate(), -300.0);

    // Domain 80 now renders at x=500; reselecting it is not a selection
    // change, so the translate stays put.
    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(500.0, 100.0))));
    assert_eq!(chart.state().axis().viewport_translate(), -300.0);
}

#[test]
fn attach_fails_on_non_cartesian_charts() {
    let state = ChartState::new(DomainAxis::<f64>::numeric(AxisDirection::Horizontal))
        .with_kind(ChartKind::Radial);
    let mut chart = CartesianChart::from_state(state);

    let err = chart
        .attach_behavior(Box::new(SlidingViewport::new(SelectionRole::Info)))
        .expect_err("radial charts are rejected");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
    assert!(chart.behavior_roles().is_empty());
}

#[test]
fn missing_geometry_skips_the_frame() {
    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SlidingViewport::new(SelectionRole::Info)))
        .expect("attach sliding viewport");
    let series = Series::builder("s", vec![10.0], |d: &f64| *d)
        .measure(|d| Some(*d))
        .build();
    chart.set_series(vec![series]);
    // No layout pass: the axis has no extent, locations are unresolvable.

    chart
        .state_mut()
        .update_selection(SelectionRole::Info, &[SeriesDatum::new("s", 0)], &[]);
    chart.postprocess();

    assert_eq!(chart.state().axis().viewport_translate(), 0.0);
    assert!(chart.state_mut().take_redraw().is_none());
}
