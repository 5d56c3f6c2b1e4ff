use crate::api::middleware::SessionUser;
use crate::api::models::UsageResponse;
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::forecast;
use crate::repositories::EnergyRepository;
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Duration;
use std::collections::HashMap;

/// GET /api/v1/kwh?time=<ISO-8601>
/// Actual metered usage: the reading whose start lies closest to the
/// requested instant, searched within one minute either side.
pub async fn get_usage(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<UsageResponse>> {
    let time = params
        .get("time")
        .ok_or_else(|| AppError::InvalidInput("Missing time parameter".to_string()))?;
    let requested_time = forecast::parse_instant(time)?;

    let closest = EnergyRepository::get_closest_reading(
        &state.pool,
        session.user_id,
        requested_time,
        Duration::minutes(1),
    )
    .await?;

    let response = match closest {
        Some(reading) => UsageResponse {
            success: true,
            kwh: reading.kwh,
            unit: "kWh",
            time: reading.start_time,
            requested_time,
            message: None,
        },
        None => UsageResponse::not_found(requested_time),
    };

    Ok(Json(response))
}
