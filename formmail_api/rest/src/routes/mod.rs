use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub mod contact;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn bad_request() -> Response {
    error(StatusCode::BAD_REQUEST, "Bad request")
}

fn error(code: StatusCode, message: &str) -> Response {
    (code, Json(ApiError { message })).into_response()
}
