//! Route definitions for the babycare reporting server

use axum::{middleware, routing::get, Router};

use shared::filters::{
    BmiFilter, DiaperChangeFilter, FeedingFilter, HeadCircumferenceFilter, HeightFilter,
    NoteFilter, PumpingFilter, SleepFilter, TemperatureFilter, TummyTimeFilter, WeightFilter,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes
        .merge(list_routes(state.clone()))
        .merge(report_routes(state))
}

/// Filtered list endpoints (protected)
fn list_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/tags", get(handlers::list_tags))
        .route("/children", get(handlers::list_children))
        .route("/feedings", get(handlers::list_events::<FeedingFilter>))
        .route("/sleep", get(handlers::list_events::<SleepFilter>))
        .route("/changes", get(handlers::list_events::<DiaperChangeFilter>))
        .route("/weight", get(handlers::list_events::<WeightFilter>))
        .route("/height", get(handlers::list_events::<HeightFilter>))
        .route(
            "/head-circumference",
            get(handlers::list_events::<HeadCircumferenceFilter>),
        )
        .route("/bmi", get(handlers::list_events::<BmiFilter>))
        .route("/temperature", get(handlers::list_events::<TemperatureFilter>))
        .route("/tummy-times", get(handlers::list_events::<TummyTimeFilter>))
        .route("/pumping", get(handlers::list_events::<PumpingFilter>))
        .route("/notes", get(handlers::list_events::<NoteFilter>))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Report JSON endpoints (protected)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/children/:slug/reports", get(handlers::list_reports))
        .route("/children/:slug/reports/*report", get(handlers::get_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Server-rendered report pages (protected)
pub fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/children/:slug/reports", get(handlers::report_list_page))
        .route("/children/:slug/reports/*report", get(handlers::report_page))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
