use axum::extract::State;
use axum::Router;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod db;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod persistence;
pub mod routing_utils;

/// State shared by every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    /// Key used to verify the signature on the session cookie
    pub cookie_key: Key,
}

pub type AppState = State<Arc<SharedData>>;

/// Assembles every route the service exposes, along with request tracing
pub fn build_router(shared_data: SharedData) -> Router {
    let router = Router::new()
        .merge(api::task::task_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(Arc::new(shared_data));

    logging::attach_tracing_http(router)
}
