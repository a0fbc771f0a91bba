//! Router Assembly

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{get_advice, get_history, health_check, model_status};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        // Health & status
        .route("/api/health", get(health_check))
        .route("/api/model-status", get(model_status))

        // Advice API
        .route("/api/advice", post(get_advice))
        .route("/api/advice/history", get(get_history))

        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!("Invalid CORS_ORIGIN ({}), allowing any origin", e);
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use advisor_core::{ModelGateway, ScriptedGateway, UnconfiguredGateway};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use financial_advisor::{AdvicePipeline, FallbackSelector, FixedChooser, NoopHistory};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(gateway: Arc<dyn ModelGateway>) -> Router {
        let pipeline = AdvicePipeline::new(gateway)
            .with_fallback(FallbackSelector::with_chooser(Arc::new(FixedChooser(0))));
        let state = AppState {
            pipeline: Arc::new(pipeline),
            history: Arc::new(NoopHistory),
        };
        build_router(state, None)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_advice_from_model() {
        let gateway = Arc::new(ScriptedGateway::reply("VERDICT: DO\nREASON: Great time to invest."));
        let body = json!({"question": "  Should I open a Roth IRA?  "}).to_string();

        let (status, json) = send(app(gateway), post_json("/api/advice", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["question"], "Should I open a Roth IRA?");
        assert_eq!(json["data"]["verdict"], "DO");
        assert_eq!(json["data"]["reason"], "Great time to invest.");
        assert_eq!(json["data"]["source"], "MODEL");
        assert!(json["data"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_advice_falls_back_when_model_fails() {
        let gateway = Arc::new(ScriptedGateway::failing("down"));
        let body = json!({"question": "Should I buy a new phone?"}).to_string();

        let (status, json) = send(app(gateway), post_json("/api/advice", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["source"], "FALLBACK");
        assert_eq!(json["data"]["verdict"], "DON'T");
        assert_eq!(json["data"]["model"], "fallback");
    }

    #[tokio::test]
    async fn test_blank_or_missing_question_is_bad_request() {
        for body in [r#"{"question": "   "}"#, "{}", r#"{"question": 42}"#, "not json"] {
            let gateway = Arc::new(ScriptedGateway::reply("VERDICT: DO"));
            let (status, json) = send(app(gateway.clone()), post_json("/api/advice", body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(json["success"], false);
            assert_eq!(json["error"], "Please provide a financial question");
            assert_eq!(gateway.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_history_is_empty() {
        let gateway = Arc::new(ScriptedGateway::reply(""));
        let (status, json) = send(app(gateway), get("/api/advice/history")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], json!([]));
        assert_eq!(json["message"], "History feature coming soon");
    }

    #[tokio::test]
    async fn test_model_status_reports_availability() {
        let (_, json) = send(
            app(Arc::new(UnconfiguredGateway::new("no key"))),
            get("/api/model-status"),
        )
        .await;
        assert_eq!(json["modelAvailable"], false);

        let (_, json) = send(app(Arc::new(ScriptedGateway::reply(""))), get("/api/model-status")).await;
        assert_eq!(json["modelAvailable"], true);
        assert_eq!(json["provider"], "Scripted");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = send(app(Arc::new(ScriptedGateway::reply(""))), get("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["modelAvailable"], true);
    }
}
