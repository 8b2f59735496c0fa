pub mod config;
pub mod domain;
pub mod error;
pub mod global;
pub mod logging;
pub mod response;
pub mod shutdown;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::{AllowedOrigins, AppConfig};
use domain::frontend::{self, Frontend};
use domain::health;
use domain::tone::{self, CompletionClientRef, ModelSelection, PromptTemplate, ToneService};

pub use domain::tone::{CompletionClient, ProviderError};

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::tone::handler::professionalize,
        domain::tone::handler::refine,
        domain::tone::handler::list_tools,
        domain::health::handler::health_check,
    ),
    components(
        schemas(
            tone::ToneRequest,
            tone::ToneResult,
            tone::ToneStyle,
            health::dto::HealthStatus,
            health::dto::HealthState,
            response::ErrorResponse,
        )
    ),
    tags(
        (name = "Tone", description = "문체 변환 API"),
        (name = "Health", description = "헬스 체크")
    )
)]
pub struct ApiDoc;

/// 핸들러 공유 상태
///
/// 요청 간에 공유되는 것은 읽기 전용 서비스와 설정뿐입니다.
#[derive(Clone)]
pub struct AppState {
    pub tone_service: Arc<ToneService>,
    pub frontend: Frontend,
    pub started_at: Instant,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(tone_service: ToneService, frontend: Frontend) -> Self {
        Self {
            tone_service: Arc::new(tone_service),
            frontend,
            started_at: Instant::now(),
            metrics: None,
        }
    }

    pub fn from_config(config: &AppConfig, client: CompletionClientRef) -> Self {
        let service = ToneService::new(
            client,
            config.prompts.clone(),
            ModelSelection::from(&config.provider),
        );
        Self::new(service, Frontend::new(config.frontend_dir.clone()))
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// 라우터 바깥 레이어 설정
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub cors: AllowedOrigins,
    pub request_timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            cors: AllowedOrigins::Any,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&AppConfig> for HttpOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            cors: config.cors.clone(),
            request_timeout: config.request_timeout,
        }
    }
}

pub fn create_router(state: AppState, options: &HttpOptions) -> Router {
    let api = Router::new()
        .route("/api/professionalize", post(tone::handler::professionalize))
        .route("/api/refine", post(tone::handler::refine))
        .route("/api/tools", get(tone::handler::list_tools));

    // 구버전 프론트엔드 호환 경로
    let legacy = Router::new()
        .route("/professionalize", post(tone::handler::professionalize))
        .route("/refine", post(tone::handler::refine));

    let mut router = Router::new()
        .route("/", get(frontend::handler::serve_index))
        .route("/health", get(health::handler::health_check))
        .route("/metrics", get(global::metrics::render_metrics))
        .merge(api)
        .merge(legacy)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(assets) = state.frontend.assets_dir() {
        router = router.nest_service("/assets", ServeDir::new(assets));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(global::cors::cors_layer(&options.cors))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(middleware::from_fn(global::middleware::request_tracing))
}

/// 테스트용 라우터 (Mock 클라이언트 주입)
pub fn create_test_router_with_mock<C>(client: C) -> Router
where
    C: CompletionClient + 'static,
{
    let missing = std::env::temp_dir().join(format!("tone-server-no-frontend-{}", uuid::Uuid::new_v4()));
    create_test_router_with_frontend(client, missing)
}

/// 테스트용 라우터 (Mock 클라이언트 + 프론트엔드 디렉토리 지정)
pub fn create_test_router_with_frontend<C>(client: C, frontend_dir: impl Into<PathBuf>) -> Router
where
    C: CompletionClient + 'static,
{
    let service = ToneService::new(
        Arc::new(client),
        PromptTemplate::default(),
        ModelSelection {
            professionalize: "test-model".to_string(),
            refine: "test-refine-model".to_string(),
        },
    );
    let state = AppState::new(service, Frontend::new(frontend_dir));
    create_router(state, &HttpOptions::default())
}
