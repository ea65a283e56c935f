pub mod host;
pub mod primitives;
pub mod scale;
pub mod types;

pub use host::{CandleViewport, LastCandle, StaticViewport, ViewportSource};
pub use primitives::{datetime_to_unix_millis, decimal_to_f64};
pub use scale::PriceAxis;
pub use types::{AnchorPoint, AxisBounds, PointerPosition, Viewport};
