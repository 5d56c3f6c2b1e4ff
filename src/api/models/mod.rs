pub mod forecast;
pub mod readings;

pub use forecast::{DayForecastResponse, PointForecastResponse, SlotForecastResponse};
pub use readings::UsageResponse;
