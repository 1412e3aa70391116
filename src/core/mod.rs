pub mod axis;
pub mod domain;
pub mod ordinal;
pub mod scale;
pub mod series;
pub mod time;
pub mod types;

pub use axis::DomainAxis;
pub use domain::DomainValue;
pub use ordinal::OrdinalScale;
pub use scale::{NumericScale, Scale};
pub use series::{AccessorStack, DatumDetails, Series, SeriesBuilder, SeriesDatum};
pub use time::TimeScale;
pub use types::{AxisDirection, Color, PixelRange, Point, Rect};
