use std::cell::RefCell;
use std::rc::Rc;

use chartkit::behavior::{
    ChartBehavior, DomainHighlighter, GestureEvent, SelectNearest, SelectionTrigger,
};
use chartkit::core::{AxisDirection, Color, DomainAxis, Point, Rect, Series, SeriesDatum};
use chartkit::selection::SelectionRole;
use chartkit::{CartesianChart, ChartState};

fn sales_series() -> Series<f64> {
    let data = vec![(2014.0, 5.0), (2015.0, 25.0), (2016.0, 100.0), (2017.0, 75.0)];
    Series::builder("sales", data, |d: &(f64, f64)| d.0)
        .measure(|d| Some(d.1))
        .color(Color::BLUE)
        .build()
}

/// Test listener that counts change notifications per role and optionally
/// mirrors `Info` changes onto the `Action` model.
struct ChangeProbe {
    info_count: Rc<RefCell<usize>>,
    action_count: Rc<RefCell<usize>>,
    mirror_to_action: bool,
}

impl ChartBehavior<f64> for ChangeProbe {
    fn role(&self) -> &str {
        "change-probe"
    }

    fn on_selection_change(&mut self, role: SelectionRole, state: &mut ChartState<f64>) {
        match role {
            SelectionRole::Info => {
                *self.info_count.borrow_mut() += 1;
                if self.mirror_to_action {
                    let data = state.selection_model(SelectionRole::Info).selected_data();
                    state.update_selection(SelectionRole::Action, &data, &[]);
                }
            }
            SelectionRole::Action => *self.action_count.borrow_mut() += 1,
        }
    }
}

#[test]
fn tap_selects_and_highlights_one_datum_end_to_end() {
    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Info,
            SelectionTrigger::Tap,
        )))
        .expect("attach select nearest");
    chart
        .attach_behavior(Box::new(
            DomainHighlighter::new(SelectionRole::Info).with_shade_factor(0.5),
        ))
        .expect("attach highlighter");

    chart.set_series(vec![sales_series()]);
    chart.postprocess();
    // Extent [2014, 2017] over 300px: 2016 sits at x=200.
    chart.lay_out(Rect::new(0.0, 0.0, 300.0, 150.0));

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(200.0, 75.0))));

    let model = chart.state().selection_model(SelectionRole::Info);
    assert_eq!(model.selected_data(), vec![SeriesDatum::new("sales", 2)]);
    assert!(model.is_series_selected("sales"));

    let series = &chart.state().series_list()[0];
    for index in 0..4 {
        let expected = if index == 2 {
            Color::BLUE.darker(0.5)
        } else {
            Color::BLUE
        };
        assert_eq!(series.color(index), expected, "datum {index}");
    }
}

#[test]
fn each_external_trigger_notifies_a_role_at_most_once() {
    let info_count = Rc::new(RefCell::new(0));
    let action_count = Rc::new(RefCell::new(0));

    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Info,
            SelectionTrigger::Tap,
        )))
        .expect("attach select nearest");
    chart
        .attach_behavior(Box::new(ChangeProbe {
            info_count: info_count.clone(),
            action_count: action_count.clone(),
            mirror_to_action: true,
        }))
        .expect("attach probe");

    chart.set_series(vec![sales_series()]);
    chart.postprocess();
    chart.lay_out(Rect::new(0.0, 0.0, 300.0, 150.0));

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(200.0, 75.0))));

    // One trigger: Info fires once, and the mirrored Action change raised
    // from inside the listener is delivered in the same pass, also once.
    assert_eq!(*info_count.borrow(), 1);
    assert_eq!(*action_count.borrow(), 1);
    assert!(
        chart
            .state()
            .selection_model(SelectionRole::Action)
            .is_datum_selected("sales", 2)
    );

    // Re-tapping the same point changes nothing and notifies nobody.
    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(200.0, 75.0))));
    assert_eq!(*info_count.borrow(), 1);
    assert_eq!(*action_count.borrow(), 1);
}

#[test]
fn replacing_series_prunes_stale_selection_and_notifies() {
    let info_count = Rc::new(RefCell::new(0));
    let action_count = Rc::new(RefCell::new(0));

    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Info,
            SelectionTrigger::Tap,
        )))
        .expect("attach select nearest");
    chart
        .attach_behavior(Box::new(ChangeProbe {
            info_count: info_count.clone(),
            action_count: action_count.clone(),
            mirror_to_action: false,
        }))
        .expect("attach probe");

    chart.set_series(vec![sales_series()]);
    chart.postprocess();
    chart.lay_out(Rect::new(0.0, 0.0, 300.0, 150.0));
    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(200.0, 75.0))));
    assert_eq!(*info_count.borrow(), 1);

    // The replacement data keeps only two rows; index 2 no longer exists.
    let shorter = Series::builder("sales", vec![(2014.0, 5.0), (2015.0, 25.0)], |d: &(f64, f64)| d.0)
        .measure(|d| Some(d.1))
        .build();
    chart.set_series(vec![shorter]);
    chart.postprocess();
    chart.lay_out(Rect::new(0.0, 0.0, 300.0, 150.0));

    assert!(
        chart
            .state()
            .selection_model(SelectionRole::Info)
            .selected_data()
            .is_empty()
    );
    assert_eq!(*info_count.borrow(), 2);
}

#[test]
fn redraw_requests_merge_toward_the_full_redraw() {
    let mut state: ChartState<f64> =
        ChartState::new(DomainAxis::numeric(AxisDirection::Horizontal));

    state.request_redraw(true, true);
    state.request_redraw(false, true);

    let merged = state.take_redraw().expect("pending redraw");
    assert!(!merged.skip_layout);
    assert!(merged.skip_animation);
    assert!(state.take_redraw().is_none());
}

#[test]
fn gesture_dispatch_stops_at_the_first_consumer() {
    let mut chart = CartesianChart::new(DomainAxis::numeric(AxisDirection::Horizontal));
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Info,
            SelectionTrigger::Tap,
        )))
        .expect("attach info selector");
    chart
        .attach_behavior(Box::new(SelectNearest::new(
            SelectionRole::Action,
            SelectionTrigger::Tap,
        )))
        .expect("attach action selector");

    chart.set_series(vec![sales_series()]);
    chart.postprocess();
    chart.lay_out(Rect::new(0.0, 0.0, 300.0, 150.0));

    assert!(chart.handle_gesture(GestureEvent::Tap(Point::new(200.0, 75.0))));

    // Registration order: the info selector consumes the tap before the
    // action selector sees it.
    assert!(!chart.state().selection_model(SelectionRole::Info).is_empty());
    assert!(chart.state().selection_model(SelectionRole::Action).is_empty());
}
