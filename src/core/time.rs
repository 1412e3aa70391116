use chrono::{DateTime, Utc};

use crate::core::scale::{NumericScale, Scale};
use crate::core::types::PixelRange;
use crate::error::ChartResult;

/// Continuous time scale backed by a numeric scale over unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeScale {
    inner: NumericScale,
}

impl TimeScale {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_extent(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<()> {
        self.inner.set_extent(unix_seconds(&start), unix_seconds(&end))
    }
}

impl Scale<DateTime<Utc>> for TimeScale {
    fn location_of(&self, domain: &DateTime<Utc>) -> Option<f64> {
        self.inner.location_of(&unix_seconds(domain))
    }

    fn domain_at(&self, pixel: f64) -> Option<DateTime<Utc>> {
        let seconds = self.inner.domain_at(pixel)?;
        from_unix_seconds(seconds)
    }

    fn step_size(&self) -> f64 {
        self.inner.step_size()
    }

    fn range(&self) -> PixelRange {
        self.inner.range()
    }

    fn lay_out(&mut self, range: PixelRange) {
        self.inner.lay_out(range);
    }

    fn bind_domains(&mut self, domains: &[DateTime<Utc>]) {
        let seconds: Vec<f64> = domains.iter().map(unix_seconds).collect();
        self.inner.bind_domains(&seconds);
    }

    fn set_viewport(&mut self, scale_factor: f64, translate_px: f64) -> ChartResult<()> {
        self.inner.set_viewport(scale_factor, translate_px)
    }

    fn viewport_scale_factor(&self) -> f64 {
        self.inner.viewport_scale_factor()
    }

    fn viewport_translate(&self) -> f64 {
        self.inner.viewport_translate()
    }

    fn ticks(&self) -> Vec<DateTime<Utc>> {
        self.inner
            .ticks()
            .into_iter()
            .filter_map(|seconds| from_unix_seconds(seconds))
            .collect()
    }
}

pub(crate) fn unix_seconds(time: &DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9
}

fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}
