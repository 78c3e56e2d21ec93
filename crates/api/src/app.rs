use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use domain::services::{AnalysisError, AnalysisProvider};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_operator, require_user_auth,
    security_headers_middleware, trace_id,
};
use crate::routes::{
    ai, auth, health, inventory, mutations, opname, procurement, reports, rooms,
};
use crate::services::provider_from_config;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    /// `None` when AI analysis is disabled.
    pub analysis: Option<Arc<dyn AnalysisProvider>>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppBuildError {
    #[error("Invalid JWT configuration: {0}")]
    Jwt(#[from] JwtError),

    #[error("Invalid AI configuration: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Build the router with the analysis provider described by `config.ai`.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, AppBuildError> {
    let analysis = provider_from_config(&config.ai)?;
    create_app_with_analysis(config, pool, analysis)
}

/// Build the router with an explicit analysis provider.
pub fn create_app_with_analysis(
    config: Config,
    pool: PgPool,
    analysis: Option<Arc<dyn AnalysisProvider>>,
) -> Result<Router, AppBuildError> {
    let jwt = JwtConfig::new(
        &config.jwt.secret,
        config.jwt.token_expiry_secs,
        config.jwt.leeway_secs,
    )?;
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt: Arc::new(jwt),
        analysis,
    };

    let cors = if config.security.cors_origins.is_empty() {
        // Development: allow any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Any authenticated user
    let user_routes = Router::new()
        .route("/api/me", get(auth::me))
        .route("/api/inventory", get(inventory::list_assets))
        .route("/api/inventory/:id", get(inventory::get_asset))
        .route(
            "/api/inventory/barcode/:code",
            get(inventory::get_asset_by_barcode),
        )
        .route("/api/rooms", get(rooms::list_rooms))
        .route(
            "/api/procurement",
            get(procurement::list_procurement).post(procurement::submit_procurement),
        )
        .route("/api/reports/summary", get(reports::summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Operator and above. Auth runs first (outermost route layer).
    let operator_routes = Router::new()
        .route("/api/inventory", post(inventory::register_asset))
        .route("/api/inventory/:id", put(inventory::update_asset))
        .route("/api/rooms", post(rooms::create_room))
        .route(
            "/api/mutations",
            get(mutations::list_mutations).post(mutations::record_mutation),
        )
        .route(
            "/api/opname",
            get(opname::list_opname).post(opname::record_opname),
        )
        .route("/api/reports/breakdown", get(reports::breakdown))
        .route_layer(middleware::from_fn(require_operator))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    let admin_routes = Router::new()
        .route(
            "/api/procurement/:id",
            patch(procurement::set_procurement_status),
        )
        .route("/api/ai/analysis", post(ai::analyze))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/api/login", post(auth::login))
        .route("/metrics", get(metrics_handler));

    let router = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(operator_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state);

    Ok(router)
}
