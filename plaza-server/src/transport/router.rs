use crate::SignalingService;
use crate::transport::ws_handler;
use axum::{Router, routing::get};

pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(service)
}
