//! Grading endpoint tests: the full router in front of a wiremock Gemini
//! upstream, driven with tower's oneshot.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use redacao_core::GeminiConfig;
use redacao_server::{app_router, AppConfig, AppState};
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_with_upstream(upstream: Option<&MockServer>) -> AppState {
    let mut config = AppConfig::default();
    config.gemini = GeminiConfig {
        api_key: upstream.map(|_| "test-key".to_string()),
        model_name: Some("gemini-2.5-pro".to_string()),
        api_base: upstream.map(|s| s.uri()),
    };
    AppState::in_memory(config)
}

fn grading_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/corrigir")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn non_post_method_is_405_with_empty_body() {
    let app = app_router(state_with_upstream(None));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/corrigir")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn missing_or_empty_fields_are_400_with_no_outbound_call() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "topic": "", "essay": "texto" }),
        serde_json::json!({ "topic": "tema", "essay": "" }),
        serde_json::json!({ "essay": "texto" }),
    ] {
        let app = app_router(state_with_upstream(Some(&mock_server)));
        let response = app.oneshot(grading_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Tema e redação são obrigatórios.");
    }

    mock_server.verify().await;
}

#[tokio::test]
async fn missing_api_key_is_500_without_outbound_call() {
    let app = app_router(state_with_upstream(None));

    let response = app
        .oneshot(grading_request(serde_json::json!({
            "topic": "tema",
            "essay": "texto"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Chave da API Gemini não configurada.");
    assert!(json.get("detalhes").is_none());
}

#[tokio::test]
async fn successful_grading_returns_trimmed_resposta() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "\n  Nota total: 850/1000\n" } ] } }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = app_router(state_with_upstream(Some(&mock_server)));
    let response = app
        .oneshot(grading_request(serde_json::json!({
            "topic": "Educação digital",
            "essay": "O acesso à internet..."
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "resposta": "Nota total: 850/1000" }));
}

#[tokio::test]
async fn unexpected_success_shape_still_returns_200_with_fallback() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&mock_server)
        .await;

    let app = app_router(state_with_upstream(Some(&mock_server)));
    let response = app
        .oneshot(grading_request(serde_json::json!({
            "topic": "tema",
            "essay": "texto"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["resposta"], "A IA não respondeu.");
}

#[tokio::test]
async fn upstream_error_forwards_status_and_body_in_detalhes() {
    let mock_server = MockServer::start().await;
    let upstream_body = serde_json::json!({
        "error": { "code": 503, "message": "Service unavailable" }
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(upstream_body.clone()))
        .mount(&mock_server)
        .await;

    let app = app_router(state_with_upstream(Some(&mock_server)));
    let response = app
        .oneshot(grading_request(serde_json::json!({
            "topic": "tema",
            "essay": "texto"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Falha ao comunicar com a IA");
    assert_eq!(json["detalhes"], upstream_body);
}

#[tokio::test]
async fn transport_failure_is_500_with_the_error_message() {
    // Point the client at a closed port instead of a mock.
    let mut config = AppConfig::default();
    config.gemini = GeminiConfig {
        api_key: Some("test-key".to_string()),
        model_name: None,
        api_base: Some("http://127.0.0.1:9".to_string()),
    };
    let app = app_router(AppState::in_memory(config));

    let response = app
        .oneshot(grading_request(serde_json::json!({
            "topic": "tema",
            "essay": "texto"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Erro de conexão com a IA");
    assert!(json["detalhes"].as_str().unwrap().contains("Failed to send request"));
}

#[tokio::test]
async fn oversized_body_is_rejected_before_the_handler() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // 3 MB of essay against the 2 MB cap.
    let body = serde_json::json!({
        "topic": "tema",
        "essay": "a".repeat(3 * 1024 * 1024)
    });

    let app = app_router(state_with_upstream(Some(&mock_server)));
    let response = app.oneshot(grading_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    mock_server.verify().await;
}

#[tokio::test]
async fn concrete_scenario_from_the_original_app() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Nota total: 850/1000" } ] } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let app = app_router(state_with_upstream(Some(&mock_server)));
    let response = app
        .oneshot(grading_request(serde_json::json!({
            "topic": "Educação digital",
            "essay": "O acesso à internet..."
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "resposta": "Nota total: 850/1000" })
    );
}
