//! HTTP routing
//!
//! Route tree, shared state, and the CORS layer. The chat frontend and
//! the dashboard are separate apps; both send credentials, so allowed
//! origins are listed explicitly rather than wildcarded.

pub mod chatbot;
pub mod dashboard;

use crate::session;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use careerchat_core::analytics::Aggregator;
use careerchat_core::chat::ChatService;
use careerchat_core::faq::FaqStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub aggregator: Arc<Aggregator>,
    pub faq: Arc<dyn FaqStore>,
}

async fn ping() -> &'static str {
    "pong"
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/ping", get(ping))
        .nest("/api/chatbot", chatbot::router())
        .nest("/api/dashboard", dashboard::router())
        .layer(axum::middleware::from_fn(session::anon_session))
        .layer(cors)
        .with_state(state)
}
