use crate::api::handlers::{forecast, health, readings, AppState};
use crate::api::middleware::require_session;
use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    // Health check (no auth)
    let public_routes = Router::new().route("/health", get(health::health));

    // Data routes, gated on the session cookie
    let api_routes = Router::new()
        .route("/api/v1/kwh", get(readings::get_usage))
        .route("/api/v1/kwh/forecast", get(forecast::get_point_forecast))
        .route(
            "/api/v1/kwh/forecast/date/{date}",
            get(forecast::get_day_forecast),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
