//! Pass-through proxy to the resume generation webhook.
//!
//! The body is only checked for JSON parseability; it is forwarded unmodified
//! and the upstream status is mirrored back on failure. No retries.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/generate-resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    info!("Resume generation request received");

    let resume_data: Value = serde_json::from_slice(&body)?;
    debug!("Resume data: {resume_data}");

    let webhook_url = &state.config.upstream_webhook_url;
    info!("Forwarding request to webhook: {webhook_url}");

    let response = state
        .http
        .post(webhook_url)
        .header("content-type", "application/json")
        .json(&resume_data)
        .send()
        .await?;

    let status = response.status();
    info!("Webhook response status: {}", status.as_u16());

    if !status.is_success() {
        return Err(AppError::Upstream {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let result = response.text().await?;
    debug!("Webhook response: {result}");

    Ok(Json(json!({
        "success": true,
        "message": "Resume generation started"
    })))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::test_config;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::test_support::{spawn_upstream, unreachable_url};

    fn app(upstream: &str) -> Router {
        build_router(AppState::new(test_config(upstream)))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/generate-resume")
            .header("content-type", "application/json")
            .header("origin", "http://localhost:5173")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_body_unmodified() {
        let (upstream, recorded) = spawn_upstream(StatusCode::OK).await;
        let payload = json!({
            "fullName": "Jane Doe",
            "extra": { "nested": [1, 2, 3] },
            "workExperiences": [{ "position": "Engineer" }]
        });

        let response = app(&upstream)
            .oneshot(post_json(&payload.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            response.headers()["access-control-allow-headers"],
            "authorization, x-client-info, apikey, content-type"
        );
        assert_eq!(
            body_json(response).await,
            json!({ "success": true, "message": "Resume generation started" })
        );
        assert_eq!(recorded.bodies().await, vec![payload]);
    }

    #[tokio::test]
    async fn test_mirrors_upstream_failure_status() {
        let (upstream, _) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE).await;

        let response = app(&upstream)
            .oneshot(post_json(r#"{"fullName":"Jane Doe"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert!(response
            .headers()
            .contains_key("access-control-allow-headers"));
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Failed to generate resume",
                "status": 503,
                "statusText": "Service Unavailable"
            })
        );
    }

    #[tokio::test]
    async fn test_unparseable_body_is_internal_error() {
        let (upstream, recorded) = spawn_upstream(StatusCode::OK).await;

        let response = app(&upstream)
            .oneshot(post_json("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert!(json["message"].is_string());
        assert!(recorded.bodies().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_internal_error() {
        let response = app(&unreachable_url().await)
            .oneshot(post_json(r#"{"fullName":"Jane Doe"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_preflight_returns_static_cors_headers() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/generate-resume")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type, apikey")
            .body(Body::empty())
            .unwrap();

        let response = app("http://127.0.0.1:9/hook").oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let allowed = headers["access-control-allow-headers"].to_str().unwrap();
        for name in ["authorization", "x-client-info", "apikey", "content-type"] {
            assert!(allowed.contains(name), "missing {name} in {allowed}");
        }
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app("http://127.0.0.1:9/hook").oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "resume-forge");
    }
}
