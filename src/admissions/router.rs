use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;

use super::service::{AdmissionService, ConversationId};

/// Router builder exposing the conversational intake endpoint.
pub fn conversation_router(service: Arc<AdmissionService>) -> Router {
    Router::new()
        .route(
            "/api/v1/conversations/:conversation_id/messages",
            post(message_handler),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct InboundMessage {
    #[serde(default)]
    pub(crate) text: String,
}

pub(crate) async fn message_handler(
    State(service): State<Arc<AdmissionService>>,
    Path(conversation_id): Path<String>,
    axum::Json(message): axum::Json<InboundMessage>,
) -> Response {
    let id = ConversationId(conversation_id);
    let turn = service.handle_message(&id, &message.text);
    (StatusCode::OK, axum::Json(turn)).into_response()
}
