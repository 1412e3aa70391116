use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::core::domain::DomainValue;
use crate::core::types::PixelRange;
use crate::error::{ChartError, ChartResult};

/// Mapping between a data domain and a 1-D pixel range.
///
/// `location_of` is defined only for domains inside the currently resolved
/// extent; everything else yields `None` so callers can skip the datum for
/// the current frame. The viewport (scale factor + pixel translate) pans and
/// zooms the mapping without changing the bound extent.
pub trait Scale<D: DomainValue> {
    /// Pixel location of `domain`, or `None` when the domain is outside the
    /// resolved extent or no layout pass has happened yet.
    fn location_of(&self, domain: &D) -> Option<f64>;

    /// Inverse of `location_of`.
    fn domain_at(&self, pixel: f64) -> Option<D>;

    /// Pixel width allotted to one domain bucket at the current viewport.
    fn step_size(&self) -> f64;

    /// Range endpoints of the most recent layout pass.
    fn range(&self) -> PixelRange;

    /// Assigns the output pixel range. Called during layout.
    fn lay_out(&mut self, range: PixelRange);

    /// Rebuilds the domain extent from the current series data.
    fn bind_domains(&mut self, domains: &[D]);

    /// Mutates pan/zoom state. Translate is expressed in pixels along the
    /// domain axis; converting domain deltas to pixel deltas is the caller's
    /// responsibility.
    fn set_viewport(&mut self, scale_factor: f64, translate_px: f64) -> ChartResult<()>;

    fn viewport_scale_factor(&self) -> f64;

    fn viewport_translate(&self) -> f64;

    /// Tick domains for the current extent.
    fn ticks(&self) -> Vec<D>;
}

pub(crate) fn validate_viewport(scale_factor: f64, translate_px: f64) -> ChartResult<()> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 || !translate_px.is_finite() {
        return Err(ChartError::InvalidViewport {
            scale_factor,
            translate_px,
        });
    }
    Ok(())
}

/// Linear scale over a continuous numeric extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericScale {
    extent: Option<(f64, f64)>,
    sample_count: usize,
    range: PixelRange,
    scale_factor: f64,
    translate_px: f64,
    tick_count: usize,
}

impl Default for NumericScale {
    fn default() -> Self {
        Self {
            extent: None,
            sample_count: 0,
            range: PixelRange::new(0.0, 0.0),
            scale_factor: 1.0,
            translate_px: 0.0,
            tick_count: 5,
        }
    }
}

impl NumericScale {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the extent instead of fitting it from data.
    pub fn set_extent(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.extent = Some(normalize_extent(min, max)?);
        Ok(())
    }

    #[must_use]
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.extent
    }

    pub fn set_tick_count(&mut self, count: usize) {
        self.tick_count = count.max(2);
    }

    fn scaled_width(&self) -> f64 {
        self.range.width * self.scale_factor
    }
}

impl Scale<f64> for NumericScale {
    fn location_of(&self, domain: &f64) -> Option<f64> {
        let (min, max) = self.extent?;
        if !domain.is_finite() || *domain < min || *domain > max {
            return None;
        }
        let normalized = (domain - min) / (max - min);
        Some(self.range.start + self.translate_px + normalized * self.scaled_width())
    }

    fn domain_at(&self, pixel: f64) -> Option<f64> {
        let (min, max) = self.extent?;
        let width = self.scaled_width();
        if !pixel.is_finite() || width == 0.0 {
            return None;
        }
        let normalized = (pixel - self.range.start - self.translate_px) / width;
        let value = min + normalized * (max - min);
        (min..=max).contains(&value).then_some(value)
    }

    fn step_size(&self) -> f64 {
        match self.sample_count {
            0 | 1 => self.scaled_width(),
            n => self.scaled_width() / (n - 1) as f64,
        }
    }

    fn range(&self) -> PixelRange {
        self.range
    }

    fn lay_out(&mut self, range: PixelRange) {
        self.range = range;
    }

    fn bind_domains(&mut self, domains: &[f64]) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        // Distinct values, so shared domains across series keep the step
        // sized to one bucket.
        let mut distinct: IndexSet<OrderedFloat<f64>> = IndexSet::new();
        for value in domains {
            if !value.is_finite() {
                continue;
            }
            min = min.min(*value);
            max = max.max(*value);
            distinct.insert(OrderedFloat(*value));
        }

        self.sample_count = distinct.len();
        self.extent = match self.sample_count {
            0 => None,
            _ => normalize_extent(min, max).ok(),
        };
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

    fn ticks(&self) -> Vec<f64> {
        let Some((min, max)) = self.extent else {
            return Vec::new();
        };

        let step = nice_step((max - min) / (self.tick_count - 1) as f64);
        if step <= 0.0 {
            return vec![min];
        }

        let mut ticks = Vec::new();
        let mut tick = (min / step).ceil() * step;
        while tick <= max + step * 1e-9 {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }
}

fn normalize_extent(min: f64, max: f64) -> ChartResult<(f64, f64)> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "scale extent must be finite".to_owned(),
        ));
    }

    if min == max {
        // Degenerate single-value extent still maps to a usable window.
        return Ok((min - 0.5, max + 0.5));
    }

    Ok((min.min(max), min.max(max)))
}

/// Rounds a raw step to the nearest 1/2/5 decade multiple.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }

    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out_scale(min: f64, max: f64, width: f64) -> NumericScale {
        let mut scale = NumericScale::new();
        scale.set_extent(min, max).expect("valid extent");
        scale.lay_out(PixelRange::new(0.0, width));
        scale
    }

    #[test]
    fn location_maps_extent_to_range() {
        let scale = laid_out_scale(0.0, 100.0, 500.0);
        assert_eq!(scale.location_of(&0.0), Some(0.0));
        assert_eq!(scale.location_of(&100.0), Some(500.0));
        assert_eq!(scale.location_of(&50.0), Some(250.0));
    }

    #[test]
    fn location_outside_extent_is_none() {
        let scale = laid_out_scale(0.0, 100.0, 500.0);
        assert_eq!(scale.location_of(&-1.0), None);
        assert_eq!(scale.location_of(&101.0), None);
        assert_eq!(scale.location_of(&f64::NAN), None);
    }

    #[test]
    fn unbound_scale_has_no_locations() {
        let scale = NumericScale::new();
        assert_eq!(scale.location_of(&10.0), None);
        assert_eq!(scale.domain_at(10.0), None);
    }

    #[test]
    fn viewport_translate_shifts_locations() {
        let mut scale = laid_out_scale(0.0, 100.0, 500.0);
        scale.set_viewport(1.0, 50.0).expect("valid viewport");
        assert_eq!(scale.location_of(&0.0), Some(50.0));
    }

    #[test]
    fn viewport_rejects_invalid_settings() {
        let mut scale = laid_out_scale(0.0, 1.0, 100.0);
        assert!(scale.set_viewport(0.0, 0.0).is_err());
        assert!(scale.set_viewport(1.0, f64::NAN).is_err());
        assert!(scale.set_viewport(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn bind_domains_fits_extent_and_sample_count() {
        let mut scale = NumericScale::new();
        scale.bind_domains(&[3.0, 1.0, 2.0, f64::NAN]);
        scale.lay_out(PixelRange::new(0.0, 100.0));
        assert_eq!(scale.extent(), Some((1.0, 3.0)));
        assert_eq!(scale.step_size(), 50.0);
    }

    #[test]
    fn duplicate_domains_do_not_shrink_the_step() {
        let mut scale = NumericScale::new();
        scale.bind_domains(&[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        scale.lay_out(PixelRange::new(0.0, 100.0));
        assert_eq!(scale.step_size(), 50.0);
    }

    #[test]
    fn nice_step_rounds_to_decade_multiples() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(3.9), 5.0);
        assert_eq!(nice_step(70.0), 100.0);
    }

    #[test]
    fn ticks_cover_extent_with_nice_steps() {
        let scale = laid_out_scale(0.0, 10.0, 100.0);
        let ticks = scale.ticks();
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| (0.0..=10.0).contains(t)));
    }
}
