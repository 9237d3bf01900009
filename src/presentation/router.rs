// Router construction - routes, CORS and request tracing
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    air_quality, health_check, history, mock_air_quality, mock_history, submit_sensor,
};
use anyhow::Context;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// `*` allows every origin; anything else must be a single exact origin.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = if allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(allowed_origin)
            .with_context(|| format!("Invalid allowed origin: {}", allowed_origin))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

pub fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/air-quality", get(air_quality))
        .route("/api/history", get(history))
        .route("/api/sensors", post(submit_sensor))
        .route("/api/mock/air-quality", get(mock_air_quality))
        .route("/api/mock/history", get(mock_history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::air_quality_service::AirQualityService;
    use crate::application::air_quality_service::tests::FixedSource;
    use crate::application::mock_service::MockService;
    use crate::domain::reading::{SourceReading, SourceTag};
    use crate::infrastructure::sqlite_store::SqliteReadingStore;
    use crate::infrastructure::tempo_source::TempoSource;
    use axum::body::{self, Body};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt; // for `oneshot`

    async fn app() -> Router {
        let store = SqliteReadingStore::in_memory().await.unwrap();
        let service = AirQualityService::new(
            Arc::new(TempoSource::new(String::new())),
            Arc::new(FixedSource(
                SourceReading::failed(SourceTag::OpenAq, "OpenAQ fetch error"),
                SourceTag::OpenAq,
            )),
            Arc::new(FixedSource(
                SourceReading::failed(SourceTag::Weather, "Weather fetch error"),
                SourceTag::Weather,
            )),
            Arc::new(store),
        );
        let state = Arc::new(AppState {
            air_quality_service: service,
            mock_service: MockService::new(),
        });
        create_router(state, cors_layer("*").unwrap())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_sensor(app: &Router, payload: String) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/sensors")
            .header("content-type", "application/json")
            .body(Body::from(payload))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_submission_appears_in_history() {
        let app = app().await;
        let payload = json!({
            "pm25": 1, "no2": 1, "temperature": 1, "humidity": 1,
            "timestamp": "2024-01-01T00:00:00Z"
        });

        let (status, body) = post_sensor(&app, payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, history) = get_json(&app, "/api/history").await;
        assert_eq!(status, StatusCode::OK);
        let rows = history.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["timestamp"], "2024-01-01T00:00:00Z");
        assert_eq!(rows[0]["pm25"], 1.0);
        assert!(rows[0]["id"].is_number());
    }

    #[tokio::test]
    async fn test_invalid_submission_rejected_without_write() {
        let app = app().await;
        let payload = json!({
            "pm25": "bad", "no2": 1, "temperature": 1, "humidity": 1, "timestamp": "t"
        });

        let (status, body) = post_sensor(&app, payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid payload"}));

        let (status, body) = post_sensor(&app, "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid payload"}));

        let (_, history) = get_json(&app, "/api/history").await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn test_submission_without_content_type_rejected() {
        let app = app().await;
        let payload = json!({
            "pm25": 1, "no2": 1, "temperature": 1, "humidity": 1,
            "timestamp": "2024-01-01T00:00:00Z"
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/sensors")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Invalid payload"}));

        let (_, history) = get_json(&app, "/api/history").await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn test_snapshot_has_every_source() {
        let app = app().await;

        let (status, snapshot) = get_json(&app, "/api/air-quality").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["tempo"]["source"], "tempo");
        assert!(snapshot["tempo"]["pm25"].is_number());
        assert_eq!(
            snapshot["openaq"],
            json!({"source": "openaq", "error": "OpenAQ fetch error"})
        );
        assert_eq!(snapshot["weather"]["error"], "Weather fetch error");
        assert_eq!(snapshot["arduino"], json!({}));
        assert!(snapshot["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn test_snapshot_reflects_latest_submission() {
        let app = app().await;
        for (pm25, ts) in [(7, "2024-01-01T00:00:00Z"), (8, "2024-01-02T00:00:00Z")] {
            let payload = json!({
                "pm25": pm25, "no2": 2, "temperature": 3, "humidity": 4, "timestamp": ts
            });
            post_sensor(&app, payload.to_string()).await;
        }

        let (_, snapshot) = get_json(&app, "/api/air-quality").await;
        assert_eq!(snapshot["arduino"]["pm25"], 8.0);
        assert_eq!(snapshot["arduino"]["source"], "arduino");
        assert_eq!(snapshot["arduino"]["timestamp"], "2024-01-02T00:00:00Z");
    }

    #[tokio::test]
    async fn test_mock_endpoints() {
        let app = app().await;

        let (status, snapshot) = get_json(&app, "/api/mock/air-quality").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["openaq"]["pm25"], 29.0);

        let (status, history) = get_json(&app, "/api/mock/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().unwrap().len(), 24);

        // Mock routes never touch the store
        let (_, real_history) = get_json(&app, "/api/history").await;
        assert_eq!(real_history, json!([]));
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let app = app().await;
        let req = Request::builder()
            .uri("/api/mock/history")
            .header(header::ORIGIN, "http://dashboard.example")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[test]
    fn test_exact_origin_accepted() {
        assert!(cors_layer("http://localhost:3000").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
