use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use formmail_core_health_contracts::{HealthService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse { http: true, email };

    (status, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use formmail_core_health_contracts::MockHealthService;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    async fn get_health(status: HealthStatus) -> (StatusCode, serde_json::Value) {
        let health = MockHealthService::new().with_get_status(status);
        let response = router(Arc::new(health))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn healthy() {
        let (status, body) = get_health(HealthStatus { email: true }).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn email_down() {
        let (status, body) = get_health(HealthStatus { email: false }).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"http": true, "email": false}));
    }
}
