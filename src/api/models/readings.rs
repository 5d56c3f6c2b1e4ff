use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire format for `GET /api/v1/kwh`: the metered value closest to the
/// requested instant, or a zero result with a message.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub success: bool,
    pub kwh: f64,
    pub unit: &'static str,
    pub time: DateTime<Utc>,
    pub requested_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UsageResponse {
    pub fn not_found(requested_time: DateTime<Utc>) -> Self {
        Self {
            success: true,
            kwh: 0.0,
            unit: "kWh",
            time: requested_time,
            requested_time,
            message: Some("No data found for this time".to_string()),
        }
    }
}
