//! Domain types — price bars, series, forecasts.

pub mod bar;
pub mod forecast;
pub mod series;

pub use bar::{DomainError, PriceBar};
pub use forecast::{ForecastMethod, ForecastResult};
pub use series::{PriceSeries, SourceRecord};
