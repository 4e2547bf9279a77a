use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use persistence::db::Database;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{auth, health, inventory, items, movements, root, safe_zones, warehouses};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
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
    }
}

pub fn create_app(config: Config, db: Database) -> Router {
    let config = Arc::new(config);
    let cors = cors_layer(&config);

    let state = AppState {
        db,
        config: config.clone(),
    };

    let public_routes = Router::new()
        .route("/", get(root::root))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    let resource_routes = Router::new()
        .route(
            "/api/warehouses",
            get(warehouses::list_warehouses).post(warehouses::create_warehouse),
        )
        .route("/api/warehouses/:id", get(warehouses::get_warehouse))
        .route(
            "/api/warehouses/:id/inventory",
            get(inventory::list_warehouse_inventory),
        )
        .route(
            "/api/warehouses/:id/inventory/:item_id",
            put(inventory::set_stock),
        )
        .route(
            "/api/safe-zones",
            get(safe_zones::list_safe_zones).post(safe_zones::create_safe_zone),
        )
        .route("/api/safe-zones/:id", get(safe_zones::get_safe_zone))
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route("/api/items/:id", get(items::get_item))
        .route(
            "/api/movements",
            get(movements::list_movements).post(movements::record_movement),
        );

    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    Router::new()
        .merge(public_routes)
        .merge(resource_routes)
        .merge(auth_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
