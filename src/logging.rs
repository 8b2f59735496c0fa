//! 로깅 초기화 모듈
//!
//! 기본은 JSON 구조화 로그이고, `LOG_FORMAT=pretty`로 사람이 읽기 쉬운 형식을 쓸 수 있습니다.

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,tone_server=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` 환경 변수에서 읽고, 알 수 없는 값이면 JSON으로 대체
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

/// 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`로 레벨을 설정할 수 있고 기본값은 [`DEFAULT_FILTER`]입니다.
/// 이미 초기화된 경우(테스트 등)는 조용히 무시합니다.
pub fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).compact())
            .try_init(),
    };

    if let Err(err) = result {
        eprintln!("Failed to initialize tracing: {}", err);
    }
}
