//! HTTP front end for Munglog.
//!
//! Exposes a health check and the v1 API over one shared
//! [`DialogueController`], so every client of a running gateway talks to the
//! same conversation session.
//!
//! Built on Axum.

pub mod api_v1;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use munglog_agent::DialogueController;
use munglog_config::GatewayConfig;

/// Request body limit for all routes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the router with all gateway routes.
///
/// Layers applied:
/// - Request body size limit (64 KiB)
/// - HTTP trace logging
pub fn build_router(controller: Arc<DialogueController>) -> Router {
    let api_state = Arc::new(api_v1::ApiV1State { controller });

    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", api_v1::v1_router(api_state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// CORS that only admits the gateway's own origin.
fn cors_layer(addr: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    match format!("http://{addr}").parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            warn!(addr = %addr, "Gateway address is not a valid origin; CORS disabled");
            cors
        }
    }
}

/// Start the gateway HTTP server and run until Ctrl-C.
pub async fn start(
    config: &GatewayConfig,
    controller: Arc<DialogueController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(controller).layer(cors_layer(&addr));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use munglog_agent::DomainFilter;
    use munglog_config::{AppConfig, DEFAULT_REFUSAL};
    use munglog_core::error::ProviderError;
    use munglog_core::message::Message;
    use munglog_core::provider::{Provider, ProviderRequest, ProviderResponse};
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Answers with queued results, then with "ok".
    struct QueueProvider {
        queue: Mutex<Vec<Result<String, ProviderError>>>,
        delay: Option<Duration>,
    }

    impl QueueProvider {
        fn new(queue: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                queue: Mutex::new(queue),
                delay: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl Provider for QueueProvider {
        fn name(&self) -> &str {
            "queue_mock"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = {
                let mut queue = self.queue.lock().unwrap();
                if queue.is_empty() {
                    Ok("ok".to_string())
                } else {
                    queue.remove(0)
                }
            };
            next.map(|text| ProviderResponse {
                message: Message::assistant(text),
                usage: None,
                model: "mock-model".into(),
            })
        }
    }

    fn app_with(provider: QueueProvider) -> (Router, Arc<DialogueController>) {
        let controller = Arc::new(DialogueController::from_config(
            Arc::new(provider),
            &AppConfig::default(),
        ));
        (build_router(controller.clone()), controller)
    }

    fn ask_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/ask")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _) = app_with(QueueProvider::new(vec![]));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn ask_returns_model_answer() {
        let (app, controller) =
            app_with(QueueProvider::new(vec![Ok("A 사료를 추천합니다".into())]));

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": "강아지 사료 추천해줘" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["answer"], "A 사료를 추천합니다");
        assert_eq!(body["refused"], false);
        assert_eq!(controller.history().await.len(), 1);
    }

    #[tokio::test]
    async fn out_of_domain_question_is_refused() {
        let (app, _) = app_with(QueueProvider::new(vec![]));

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": "오늘 날씨 어때" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["answer"], DEFAULT_REFUSAL);
        assert_eq!(body["refused"], true);
    }

    #[tokio::test]
    async fn blank_question_is_bad_request() {
        let (app, controller) = app_with(QueueProvider::new(vec![]));

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": "  " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(controller.history().await.is_empty());
    }

    #[tokio::test]
    async fn missing_question_field_is_client_error() {
        let (app, _) = app_with(QueueProvider::new(vec![]));

        let response = app
            .oneshot(ask_request(serde_json::json!({ "text": "강아지" })))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway_with_generic_body() {
        let (app, controller) = app_with(QueueProvider::new(vec![Err(
            ProviderError::ApiError {
                status_code: 500,
                message: "upstream exploded".into(),
            },
        )]));

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": "고양이 구토" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(!error.contains("upstream exploded"));
        assert_ne!(error, DEFAULT_REFUSAL);
        assert!(controller.history().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_is_gateway_timeout() {
        let provider = QueueProvider {
            queue: Mutex::new(vec![]),
            delay: Some(Duration::from_secs(600)),
        };
        let (app, _) = app_with(provider);

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": "강아지 설사" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn reset_clears_history() {
        let (app, controller) = app_with(QueueProvider::new(vec![]));
        controller.ask("강아지 산책").await.unwrap();
        assert_eq!(controller.history().await.len(), 1);

        let req = Request::builder()
            .method("POST")
            .uri("/v1/reset")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(controller.history().await.is_empty());
    }

    #[tokio::test]
    async fn history_lists_turns_oldest_first() {
        let (app, controller) = app_with(QueueProvider::new(vec![Ok("두 번".into())]));
        controller.ask("오늘 날씨 어때").await.unwrap();
        controller.ask("강아지 산책 횟수").await.unwrap();

        let req = Request::builder()
            .uri("/v1/history")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let turns = body["turns"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["question"], "오늘 날씨 어때");
        assert_eq!(turns[0]["refused"], true);
        assert_eq!(turns[1]["answer"], "두 번");
        assert_eq!(turns[1]["refused"], false);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let (app, controller) = app_with(QueueProvider::new(vec![]));
        let huge = "강아지".repeat(MAX_BODY_BYTES);

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": huge })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(controller.history().await.is_empty());
    }

    #[test]
    fn cors_layer_accepts_any_address_shape() {
        let _ = cors_layer("127.0.0.1:8787");
        let _ = cors_layer("bad host\n:1");
    }

    #[tokio::test]
    async fn filter_strategy_reaches_gateway() {
        let controller = Arc::new(DialogueController::new(
            Arc::new(QueueProvider::new(vec![Ok("맑음".into())])),
            "m",
            DomainFilter::AlwaysAccept,
            4,
        ));
        let app = build_router(controller);

        let response = app
            .oneshot(ask_request(serde_json::json!({ "question": "오늘 날씨 어때" })))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["answer"], "맑음");
        assert_eq!(body["refused"], false);
    }
}
