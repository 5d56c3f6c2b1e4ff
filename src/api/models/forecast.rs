use crate::forecast::{DayForecast, PointForecast, SlotForecast};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire format for `GET /api/v1/kwh/forecast`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointForecastResponse {
    pub success: bool,
    pub kwh: f64,
    pub unit: &'static str,
    pub time: DateTime<Utc>,
    pub requested_time: DateTime<Utc>,
    pub rounded_time: DateTime<Utc>,
    pub sample_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<PointForecast> for PointForecastResponse {
    fn from(forecast: PointForecast) -> Self {
        let message = (forecast.aggregate.sample_count == 0)
            .then(|| "No historical data found for this time slot".to_string());

        Self {
            success: true,
            kwh: forecast.aggregate.average_kwh,
            unit: "kWh",
            time: forecast.rounded_time,
            requested_time: forecast.requested_time,
            rounded_time: forecast.rounded_time,
            sample_count: forecast.aggregate.sample_count,
            message,
        }
    }
}

/// One emitted slot of `GET /api/v1/kwh/forecast/date/{date}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotForecastResponse {
    pub time: DateTime<Utc>,
    pub average_kwh: f64,
    pub min_kwh: f64,
    pub max_kwh: f64,
    pub sample_count: usize,
}

impl From<&SlotForecast> for SlotForecastResponse {
    fn from(slot: &SlotForecast) -> Self {
        Self {
            time: slot.time,
            average_kwh: slot.aggregate.average_kwh,
            // Emitted slots always have samples, so min/max are present
            min_kwh: slot.aggregate.min_kwh.unwrap_or(0.0),
            max_kwh: slot.aggregate.max_kwh.unwrap_or(0.0),
            sample_count: slot.aggregate.sample_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecastResponse {
    pub success: bool,
    pub date: String,
    pub day_of_week: &'static str,
    pub forecasts: Vec<SlotForecastResponse>,
    pub total_slots: usize,
}

impl From<DayForecast> for DayForecastResponse {
    fn from(forecast: DayForecast) -> Self {
        let forecasts: Vec<SlotForecastResponse> =
            forecast.slots.iter().map(SlotForecastResponse::from).collect();

        Self {
            success: true,
            date: forecast.date.format("%Y-%m-%d").to_string(),
            day_of_week: forecast.day_of_week_name(),
            total_slots: forecasts.len(),
            forecasts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_point_response_camel_case_wire_format() {
        let forecast = forecast::forecast_at(&[], "2024-01-15T14:10:00Z".parse().unwrap());
        let json = serde_json::to_value(PointForecastResponse::from(forecast)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["unit"], "kWh");
        assert_eq!(json["kwh"], 0.0);
        assert_eq!(json["sampleCount"], 0);
        assert_eq!(json["requestedTime"], "2024-01-15T14:10:00Z");
        assert_eq!(json["roundedTime"], "2024-01-15T14:30:00Z");
        assert_eq!(json["message"], "No historical data found for this time slot");
    }

    #[test]
    fn test_point_response_omits_message_with_samples() {
        use crate::repositories::energy::EnergyReading;

        let start_time = "2024-01-08T14:00:00Z".parse().unwrap();
        let history = vec![EnergyReading {
            start_time,
            end_time: start_time + chrono::Duration::minutes(30),
            kwh: 0.5,
            hour: 14,
            minute: 0,
        }];

        let forecast = forecast::forecast_at(&history, "2024-01-15T14:00:00Z".parse().unwrap());
        let json = serde_json::to_value(PointForecastResponse::from(forecast)).unwrap();

        assert_eq!(json["sampleCount"], 1);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_day_response_shape() {
        let forecast = forecast::forecast_day(&[], forecast::parse_date("2024-01-15").unwrap());
        let json = serde_json::to_value(DayForecastResponse::from(forecast)).unwrap();

        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["dayOfWeek"], "Monday");
        assert_eq!(json["totalSlots"], 0);
        assert_eq!(json["forecasts"].as_array().unwrap().len(), 0);
    }
}
