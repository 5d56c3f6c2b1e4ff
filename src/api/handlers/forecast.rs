use crate::api::middleware::SessionUser;
use crate::api::models::{DayForecastResponse, PointForecastResponse};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::forecast;
use crate::repositories::EnergyRepository;
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use std::collections::HashMap;

/// GET /api/v1/kwh/forecast?time=<ISO-8601>
/// Predicted consumption for one half-hour slot, averaged over all
/// historical readings sharing the slot's weekday and time of day.
pub async fn get_point_forecast(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PointForecastResponse>> {
    let time = params
        .get("time")
        .ok_or_else(|| AppError::InvalidInput("Missing time parameter".to_string()))?;
    let requested_time = forecast::parse_instant(time)?;

    let readings = EnergyRepository::get_all_readings(&state.pool, session.user_id).await?;
    let point = forecast::forecast_at(&readings, requested_time);

    Ok(Json(point.into()))
}

/// GET /api/v1/kwh/forecast/date/{date}
/// Per-slot forecasts for a whole calendar day; slots without history are
/// omitted from the response.
pub async fn get_day_forecast(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(date): Path<String>,
) -> Result<Json<DayForecastResponse>> {
    let target_date = forecast::parse_date(&date)?;

    let readings = EnergyRepository::get_all_readings(&state.pool, session.user_id).await?;
    let day = forecast::forecast_day(&readings, target_date);

    Ok(Json(day.into()))
}
