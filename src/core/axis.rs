use crate::core::domain::DomainValue;
use crate::core::scale::Scale;
use crate::core::types::{AxisDirection, PixelRange};
use crate::error::ChartResult;

/// Domain axis: a scale plus its render orientation.
///
/// The axis is passive; layout and viewport mutation are driven by the chart
/// state, which also raises the matching redraw signal.
pub struct DomainAxis<D: DomainValue> {
    scale: Box<dyn Scale<D>>,
    direction: AxisDirection,
}

impl<D: DomainValue> DomainAxis<D> {
    pub fn new(scale: Box<dyn Scale<D>>, direction: AxisDirection) -> Self {
        Self { scale, direction }
    }

    #[must_use]
    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    #[must_use]
    pub fn location_of(&self, domain: &D) -> Option<f64> {
        self.scale.location_of(domain)
    }

    #[must_use]
    pub fn domain_at(&self, pixel: f64) -> Option<D> {
        self.scale.domain_at(pixel)
    }

    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.scale.step_size()
    }

    #[must_use]
    pub fn range(&self) -> PixelRange {
        self.scale.range()
    }

    #[must_use]
    pub fn viewport_scale_factor(&self) -> f64 {
        self.scale.viewport_scale_factor()
    }

    #[must_use]
    pub fn viewport_translate(&self) -> f64 {
        self.scale.viewport_translate()
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<D> {
        self.scale.ticks()
    }

    pub fn lay_out(&mut self, range: PixelRange) {
        self.scale.lay_out(range);
    }

    pub fn bind_domains(&mut self, domains: &[D]) {
        self.scale.bind_domains(domains);
    }

    pub(crate) fn set_viewport(&mut self, scale_factor: f64, translate_px: f64) -> ChartResult<()> {
        self.scale.set_viewport(scale_factor, translate_px)
    }
}

impl DomainAxis<f64> {
    /// Horizontal numeric domain axis with default tick policy.
    #[must_use]
    pub fn numeric(direction: AxisDirection) -> Self {
        Self::new(
            Box::new(crate::core::scale::NumericScale::new()),
            direction,
        )
    }
}

impl DomainAxis<String> {
    /// Banded ordinal domain axis.
    #[must_use]
    pub fn ordinal(direction: AxisDirection) -> Self {
        Self::new(
            Box::new(crate::core::ordinal::OrdinalScale::new()),
            direction,
        )
    }
}

impl DomainAxis<chrono::DateTime<chrono::Utc>> {
    /// Continuous time domain axis over unix seconds.
    #[must_use]
    pub fn time(direction: AxisDirection) -> Self {
        Self::new(Box::new(crate::core::time::TimeScale::new()), direction)
    }
}
