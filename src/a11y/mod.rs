pub mod explore;

use std::cmp::Ordering;

use crate::core::series::SeriesDatum;
use crate::core::types::Rect;
use crate::selection::SelectionRole;

pub use explore::DomainA11yExploreBehavior;

/// Selection update applied when a node receives accessibility focus.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSelection {
    pub role: SelectionRole,
    pub data: Vec<SeriesDatum>,
}

/// One focusable region derived from chart geometry.
///
/// Nodes are recomputed from scratch every postprocess cycle; ordering is a
/// total order on pixel location with the vertical/RTL reversal below.
#[derive(Debug, Clone, PartialEq)]
pub struct A11yNode {
    pub label: String,
    /// Bounding region in chart-local pixel space.
    pub bounds: Rect,
    /// Pixel location along the domain axis, used for focus ordering.
    pub location: f64,
    pub rendered_vertically: bool,
    pub is_rtl: bool,
    pub focus: Option<FocusSelection>,
}

impl A11yNode {
    /// Focus-order comparison: ascending pixel location, reversed when
    /// rendering vertically under right-to-left layout so traversal follows
    /// natural reading order. Equal locations compare equal, keeping
    /// discovery order under a stable sort.
    #[must_use]
    pub fn focus_order(&self, other: &A11yNode) -> Ordering {
        let ascending = self
            .location
            .partial_cmp(&other.location)
            .unwrap_or(Ordering::Equal);
        if self.rendered_vertically && self.is_rtl {
            ascending.reverse()
        } else {
            ascending
        }
    }
}

/// Stable-sorts nodes into focus order.
pub fn order_nodes(nodes: &mut [A11yNode]) {
    nodes.sort_by(A11yNode::focus_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(location: f64, vertical: bool, rtl: bool) -> A11yNode {
        A11yNode {
            label: format!("{location}"),
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
            location,
            rendered_vertically: vertical,
            is_rtl: rtl,
            focus: None,
        }
    }

    #[test]
    fn default_order_is_ascending_location() {
        let mut nodes = vec![node(10.0, false, false), node(50.0, false, false), node(30.0, false, false)];
        order_nodes(&mut nodes);
        let locations: Vec<f64> = nodes.iter().map(|n| n.location).collect();
        assert_eq!(locations, [10.0, 30.0, 50.0]);
    }

    #[test]
    fn vertical_rtl_reverses_order() {
        let mut nodes = vec![node(10.0, true, true), node(50.0, true, true), node(30.0, true, true)];
        order_nodes(&mut nodes);
        let locations: Vec<f64> = nodes.iter().map(|n| n.location).collect();
        assert_eq!(locations, [50.0, 30.0, 10.0]);
    }

    #[test]
    fn vertical_ltr_keeps_ascending_order() {
        let mut nodes = vec![node(50.0, true, false), node(10.0, true, false)];
        order_nodes(&mut nodes);
        assert_eq!(nodes[0].location, 10.0);
    }

    #[test]
    fn equal_locations_keep_discovery_order() {
        let mut nodes = vec![node(10.0, false, false), node(10.0, false, false)];
        nodes[0].label = "first".to_owned();
        nodes[1].label = "second".to_owned();
        order_nodes(&mut nodes);
        assert_eq!(nodes[0].label, "first");
    }
}
