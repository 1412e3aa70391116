use indexmap::IndexMap;

use crate::core::domain::DomainValue;
use crate::core::scale::{Scale, validate_viewport};
use crate::core::types::PixelRange;
use crate::error::ChartResult;

/// Banded scale over a discrete, ordered domain list.
///
/// Each domain value receives an equal-width band; `location_of` yields band
/// centers and unknown domains yield `None`. Domain order is first-seen order
/// from the most recent `bind_domains` pass.
#[derive(Clone)]
pub struct OrdinalScale<D: DomainValue> {
    domains: Vec<D>,
    index_by_key: IndexMap<D::Key, usize>,
    range: PixelRange,
    scale_factor: f64,
    translate_px: f64,
}

impl<D: DomainValue> Default for OrdinalScale<D> {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            index_by_key: IndexMap::new(),
            range: PixelRange::new(0.0, 0.0),
            scale_factor: 1.0,
            translate_px: 0.0,
        }
    }
}

impl<D: DomainValue> OrdinalScale<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn domains(&self) -> &[D] {
        &self.domains
    }

    fn band_width(&self) -> f64 {
        if self.domains.is_empty() {
            return 0.0;
        }
        self.range.width * self.scale_factor / self.domains.len() as f64
    }
}

impl<D: DomainValue> Scale<D> for OrdinalScale<D> {
    fn location_of(&self, domain: &D) -> Option<f64> {
        let index = *self.index_by_key.get(&domain.key())?;
        let band = self.band_width();
        Some(self.range.start + self.translate_px + band * (index as f64 + 0.5))
    }

    fn domain_at(&self, pixel: f64) -> Option<D> {
        let band = self.band_width();
        if band <= 0.0 || !pixel.is_finite() {
            return None;
        }
        let offset = pixel - self.range.start - self.translate_px;
        if offset < 0.0 {
            return None;
        }
        let index = (offset / band).floor() as usize;
        self.domains.get(index).cloned()
    }

    fn step_size(&self) -> f64 {
        self.band_width()
    }

    fn range(&self) -> PixelRange {
        self.range
    }

    fn lay_out(&mut self, range: PixelRange) {
        self.range = range;
    }

    fn bind_domains(&mut self, domains: &[D]) {
        self.domains.clear();
        self.index_by_key.clear();
        for domain in domains {
            let key = domain.key();
            if self.index_by_key.contains_key(&key) {
                continue;
            }
            self.index_by_key.insert(key, self.domains.len());
            self.domains.push(domain.clone());
        }
    }

    fn set_viewport(&mut self, scale_factor: f64, translate_px: f64) -> ChartResult<()> {
        validate_viewport(scale_factor, translate_px)?;
        self.scale_factor = scale_factor;
        self.translate_px = translate_px;
        Ok(())
    }

    fn viewport_scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn viewport_translate(&self) -> f64 {
        self.translate_px
    }

    fn ticks(&self) -> Vec<D> {
        self.domains.clone()
    }
}
