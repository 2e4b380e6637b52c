pub mod handlers;

pub use handlers::*;

use crate::service::VarianceService;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 构建路由
pub fn router(service: Arc<VarianceService>, max_upload_bytes: usize) -> Router {
    let variance_routes = Router::new()
        .route("/api/variance", post(compute_variance))
        .route("/api/report", post(build_report))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(variance_routes)
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(max_upload_bytes)))
}
