//! Babycare reporting server
//!
//! Filtered lists of a child's care events and per-child chart reports,
//! served as JSON under `/api/v1` and as HTML pages.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod middleware;
mod routes;
mod services;
mod templates;

pub use config::Config;
use templates::Templates;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub templates: Arc<Templates>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "babycare_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting babycare reporting server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        templates: Arc::new(Templates::new()?),
    };

    let app = create_app(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::page_routes(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Babycare Reports API v1"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::{DatabaseConfig, JwtConfig, ReportsConfig, ServerConfig};
    use crate::middleware::auth::tests::{token, SECRET};

    // The pool never connects; every request here is answered before a query runs.
    fn app() -> Router {
        let config = Config {
            environment: "test".into(),
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".into(),
            },
            database: DatabaseConfig {
                url: "postgres://babycare@localhost/babycare_test".into(),
                max_connections: 1,
                min_connections: 0,
            },
            jwt: JwtConfig {
                secret: SECRET.into(),
            },
            reports: ReportsConfig {
                utc_offset_minutes: 0,
                chart_width: 1000,
            },
        };
        let db = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(&config.database.url)
            .unwrap();
        create_app(AppState {
            db,
            config: Arc::new(config),
            templates: Arc::new(Templates::new().unwrap()),
        })
    }

    fn in_an_hour() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    fn get_as(uri: &str, bearer: Option<String>) -> Request<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request.body(Body::empty()).unwrap()
    }

    async fn error_code(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_liveness_is_public() {
        let response = app().oneshot(get_as("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_lists_require_a_token() {
        let response = app().oneshot(get_as("/api/v1/feedings", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_expired_token_is_reported() {
        let expired = token(&["core.view_feeding"], chrono::Utc::now().timestamp() - 3600);
        let response = app()
            .oneshot(get_as("/api/v1/feedings", Some(expired)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn test_lists_require_the_model_permission() {
        let bearer = token(&["core.view_sleep"], in_an_hour());
        let response = app()
            .oneshot(get_as("/api/v1/changes", Some(bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(response).await, "INSUFFICIENT_PERMISSIONS");
    }

    #[tokio::test]
    async fn test_page_size_is_bounded() {
        let bearer = token(&["core.view_sleep"], in_an_hour());
        let response = app()
            .oneshot(get_as("/api/v1/sleep?per_page=500", Some(bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_filter_is_rejected() {
        let bearer = token(&["core.view_diaperchange"], in_an_hour());
        let response = app()
            .oneshot(get_as("/api/v1/changes?color=purple", Some(bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reports_require_view_child() {
        let bearer = token(&["core.view_feeding"], in_an_hour());
        for uri in [
            "/api/v1/children/ada/reports",
            "/api/v1/children/ada/reports/feeding/trend",
            "/children/ada/reports",
            "/children/ada/reports/sleep/pattern",
        ] {
            let response = app().oneshot(get_as(uri, Some(bearer.clone()))).await.unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let bearer = token(&["core.view_child"], in_an_hour());
        let response = app()
            .oneshot(get_as("/api/v1/children/ada/reports/feeding/forecast", Some(bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
