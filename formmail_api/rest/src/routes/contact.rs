use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use formmail_core_contact_contracts::{ContactSendMessageError, ContactService};
use formmail_models::contact::{ContactMessage, Submission};
use tracing::debug;

use super::{bad_request, error, internal_server_error};
use crate::models::contact::{ApiSendMessageResponse, ApiSubmission};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(send_message).fallback(unsupported_method),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Json<ApiSubmission>, JsonRejection>,
) -> Response {
    let submission = match body {
        Ok(Json(submission)) => Submission::from(submission),
        Err(err) => {
            debug!("rejecting contact request: {err}");
            return bad_request();
        }
    };

    let message = match ContactMessage::try_from(submission) {
        Ok(message) => message,
        Err(err) => {
            debug!("rejecting contact request: {err}");
            return bad_request();
        }
    };

    match service.send_message(message).await {
        Ok(()) => Json(ApiSendMessageResponse { success: true }).into_response(),
        Err(ContactSendMessageError::Transport(err)) => {
            tracing::error!("Failed to send contact message: {err:#}");
            error(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

async fn unsupported_method() -> Response {
    bad_request()
}
