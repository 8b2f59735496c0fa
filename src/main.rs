use std::sync::Arc;

use anyhow::Context;
use tone_server::{
    config::{AllowedOrigins, AppConfig},
    create_router,
    domain::tone::{CompletionClientRef, OpenRouterClient},
    global::metrics::install_recorder,
    logging::{init_logging, LogFormat},
    shutdown::shutdown_signal,
    AppState, HttpOptions,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화
    init_logging(LogFormat::from_env());

    // 3. 설정 로드 (API 키가 없으면 여기서 종료)
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    if config.cors == AllowedOrigins::Any {
        tracing::warn!("CORS allows every origin; set CORS_ALLOWED_ORIGINS to restrict it");
    }

    let metrics = if config.metrics_enabled {
        install_recorder()
    } else {
        None
    };

    // 4. 상태 및 라우터 구성
    let client: CompletionClientRef = Arc::new(OpenRouterClient::new(&config.provider));
    let state = AppState::from_config(&config, client).with_metrics(metrics);

    if !state.frontend.index_path().is_file() {
        tracing::warn!(
            frontend_dir = %state.frontend.dir().display(),
            "Frontend not built; GET / will return a notice"
        );
    }

    let app = create_router(state, &HttpOptions::from(&config));

    // 5. 서버 실행
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        model = %config.provider.model,
        refine_model = %config.provider.refine_model,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
