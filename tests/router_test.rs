//! Router 테스트
//!
//! 프론트엔드 서빙, 요청 ID, 동시 요청 처리를 라우터 단위에서 검증합니다.

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use axum_test::TestServer;
use http_body_util::BodyExt;
use serde_json::json;
use tone_server::{
    create_test_router_with_frontend, create_test_router_with_mock, CompletionClient,
    ProviderError,
};
use tower::ServiceExt;

/// 프롬프트 TEXT 부분 앞에 접두사를 붙여 돌려주는 클라이언트
struct PrefixClient;

#[async_trait::async_trait]
impl CompletionClient for PrefixClient {
    async fn complete(&self, prompt: &str, _model_id: &str) -> Result<String, ProviderError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let text = prompt.rsplit("TEXT:\n").next().unwrap_or_default();
        Ok(format!("Formal: {}", text))
    }
}

/// 임시 프론트엔드 디렉토리 (Drop 시 삭제)
struct TempFrontend {
    dir: PathBuf,
}

impl TempFrontend {
    fn with_index(html: &str) -> Self {
        Self::with_index_bytes(html.as_bytes())
    }

    fn with_index_bytes(html: &[u8]) -> Self {
        let dir = std::env::temp_dir().join(format!("tone-ui-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), html).unwrap();
        std::fs::write(dir.join("assets").join("app.js"), "console.log('tone');").unwrap();
        Self { dir }
    }
}

impl Drop for TempFrontend {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

mod frontend {
    use super::*;

    #[tokio::test]
    async fn should_return_notice_when_frontend_missing() {
        // Arrange
        let server = TestServer::new(create_test_router_with_mock(PrefixClient)).unwrap();

        // Act
        let response = server.get("/").await;

        // Assert
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("Frontend not built"));
    }

    #[tokio::test]
    async fn should_serve_index_html_when_built() {
        // Arrange
        let frontend = TempFrontend::with_index("<html><body>tone</body></html>");
        let app = create_test_router_with_frontend(PrefixClient, frontend.dir.clone());
        let server = TestServer::new(app).unwrap();

        // Act
        let response = server.get("/").await;

        // Assert
        response.assert_status_ok();
        assert!(response.text().contains("<body>tone</body>"));
        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn should_serve_index_bytes_that_are_not_utf8() {
        // Arrange
        let html: &[u8] = b"<html><body>caf\xe9</body></html>";
        let frontend = TempFrontend::with_index_bytes(html);
        let app = create_test_router_with_frontend(PrefixClient, frontend.dir.clone());
        let server = TestServer::new(app).unwrap();

        // Act
        let response = server.get("/").await;

        // Assert
        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), html);
    }

    #[tokio::test]
    async fn should_serve_static_assets() {
        // Arrange
        let frontend = TempFrontend::with_index("<html></html>");
        let app = create_test_router_with_frontend(PrefixClient, frontend.dir.clone());
        let server = TestServer::new(app).unwrap();

        // Act
        let response = server.get("/assets/app.js").await;

        // Assert
        response.assert_status_ok();
        assert_eq!(response.text(), "console.log('tone');");
    }

    #[tokio::test]
    async fn health_should_report_built_frontend() {
        // Arrange
        let frontend = TempFrontend::with_index("<html></html>");
        let app = create_test_router_with_frontend(PrefixClient, frontend.dir.clone());
        let server = TestServer::new(app).unwrap();

        // Act
        let response = server.get("/health").await;

        // Assert
        response.assert_json_contains(&json!({ "frontendBuilt": true }));
    }
}

mod request_id {
    use super::*;

    #[tokio::test]
    async fn should_generate_request_id_when_absent() {
        // Arrange
        let app = create_test_router_with_mock(PrefixClient);

        // Act
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get("x-request-id").unwrap();
        assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn should_echo_client_request_id() {
        // Arrange
        let app = create_test_router_with_mock(PrefixClient);

        // Act
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/professionalize")
                    .header("content-type", "application/json")
                    .header("x-request-id", "req-abc-123")
                    .body(Body::from(
                        json!({ "input_text": "hi", "text_type": "default" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-abc-123");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["professional_text"], "Formal: hi");
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn concurrent_requests_should_not_mix_results() {
        // Arrange
        let server = TestServer::new(create_test_router_with_mock(PrefixClient)).unwrap();
        let styles = ["academic", "corporate", "political", "default"];

        // Act
        let requests = (0..12).map(|i| {
            let style = styles[i % styles.len()];
            let request = server.post("/api/professionalize").json(&json!({
                "input_text": format!("message number {}", i),
                "text_type": style
            }));
            async move { (i, style, request.await) }
        });
        let responses = futures::future::join_all(requests).await;

        // Assert
        for (i, style, response) in responses {
            response.assert_status_ok();
            response.assert_json(&json!({
                "professional_text": format!("Formal: message number {}", i),
                "text_type": style
            }));
        }
    }
}
