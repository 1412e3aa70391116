use crate::behavior::ChartBehavior;
use crate::core::domain::DomainValue;

/// Placeholder for expand-on-select on sunburst rings.
///
/// Hierarchical ring expansion has no stable semantics yet, so this variant
/// registers under its role and does nothing. Hosts can attach it today and
/// pick up the real behavior once it lands.
pub struct SunburstRingExpander {
    role_id: String,
}

impl SunburstRingExpander {
    #[must_use]
    pub fn new() -> Self {
        Self {
            role_id: "sunburst-ring-expander".to_owned(),
        }
    }
}

impl Default for SunburstRingExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DomainValue> ChartBehavior<D> for SunburstRingExpander {
    fn role(&self) -> &str {
        &self.role_id
    }
}
