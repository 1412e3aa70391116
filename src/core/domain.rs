use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;

/// Domain value of a datum: the independent-variable side of a series.
///
/// Implementations exist for numeric (`f64`, `i64`), ordinal (`String`) and
/// time (`DateTime<Utc>`) domains. Continuous domains additionally support
/// inclusive interval containment, used when a series carries lower/upper
/// domain bound accessors.
pub trait DomainValue: Clone + PartialEq + fmt::Debug + 'static {
    /// Hashable identity used to group data by domain value.
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;

    /// Inclusive containment test against a bound interval.
    ///
    /// Discrete domains report no containment; behaviors then fall back to
    /// exact equality only.
    fn within(&self, _lower: &Self, _upper: &Self) -> bool {
        false
    }

    /// Human-readable form used for accessibility vocalization.
    fn describe(&self) -> String;
}

impl DomainValue for f64 {
    type Key = OrderedFloat<f64>;

    fn key(&self) -> Self::Key {
        OrderedFloat(*self)
    }

    fn within(&self, lower: &Self, upper: &Self) -> bool {
        lower <= self && self <= upper
    }

    fn describe(&self) -> String {
        format!("{self}")
    }
}

impl DomainValue for i64 {
    type Key = i64;

    fn key(&self) -> Self::Key {
        *self
    }

    fn within(&self, lower: &Self, upper: &Self) -> bool {
        lower <= self && self <= upper
    }

    fn describe(&self) -> String {
        format!("{self}")
    }
}

impl DomainValue for String {
    type Key = String;

    fn key(&self) -> Self::Key {
        self.clone()
    }

    fn describe(&self) -> String {
        self.clone()
    }
}

impl DomainValue for DateTime<Utc> {
    type Key = i64;

    fn key(&self) -> Self::Key {
        self.timestamp_millis()
    }

    fn within(&self, lower: &Self, upper: &Self) -> bool {
        lower <= self && self <= upper
    }

    fn describe(&self) -> String {
        self.to_rfc3339()
    }
}
