use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::HeaderValue;

use crate::domain::tone::prompt::PromptTemplate;

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// OpenAI 호출 타임아웃 기본값 (초)
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 25;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

const UI_DIST_DIR: &str = "tone-ui/dist";
const LEGACY_STATIC_DIR: &str = "static";

/// 원격 모델 설정
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub api_base: String,
    /// 1차 변환 모델
    pub model: String,
    /// refine 모델 (미설정 시 `model`과 동일)
    pub refine_model: String,
    pub timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("refine_model", &self.refine_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// CORS 허용 Origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// 모든 Origin/Method/Header 허용 (개발용)
    Any,
    List(Vec<HeaderValue>),
}

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub provider: ProviderConfig,
    pub prompts: PromptTemplate,
    pub cors: AllowedOrigins,
    pub frontend_dir: PathBuf,
    pub request_timeout: Duration,
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 로드
    ///
    /// 빈 문자열은 미설정으로 취급합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let server_host = get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };

        let api_key = get("OPENROUTER_API_KEY")
            .or_else(|| get("OPENAI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;
        let model = get("TONE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let refine_model = get("TONE_REFINE_MODEL").unwrap_or_else(|| model.clone());

        let provider = ProviderConfig {
            api_key,
            api_base: get("OPENROUTER_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model,
            refine_model,
            timeout: parse_secs(
                "PROVIDER_TIMEOUT_SECS",
                get("PROVIDER_TIMEOUT_SECS"),
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )?,
        };

        let defaults = PromptTemplate::default();
        let prompts = PromptTemplate {
            instruction: get("TONE_PROMPT_INSTRUCTION").unwrap_or(defaults.instruction),
            refine_instruction: get("TONE_REFINE_INSTRUCTION")
                .unwrap_or(defaults.refine_instruction),
        };
        if !prompts.has_placeholder() {
            return Err(ConfigError::MissingPlaceholder);
        }

        let cors = parse_origins(get("CORS_ALLOWED_ORIGINS").as_deref().unwrap_or("*"))?;

        let frontend_dir = get("FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_frontend_dir(Path::new(".")));

        let request_timeout = parse_secs(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let metrics_enabled = match get("METRICS_ENABLED") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidFlag {
                key: "METRICS_ENABLED",
                value: raw,
            })?,
            None => true,
        };

        Ok(Self {
            server_host,
            server_port,
            provider,
            prompts,
            cors,
            frontend_dir,
            request_timeout,
            metrics_enabled,
        })
    }
}

/// 빌드된 UI가 있으면 그것을, 없으면 레거시 static 디렉토리를 사용
pub fn default_frontend_dir(base: &Path) -> PathBuf {
    let dist = base.join(UI_DIST_DIR);
    if dist.is_dir() {
        dist
    } else {
        base.join(LEGACY_STATIC_DIR)
    }
}

fn parse_secs(key: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { key, value: raw }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Result<AllowedOrigins, ConfigError> {
    if raw == "*" {
        return Ok(AllowedOrigins::Any);
    }

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AllowedOrigins::List)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY (or OPENAI_API_KEY) must be set")]
    MissingApiKey,
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("{key} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("{key} must be a boolean, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
    #[error("TONE_PROMPT_INSTRUCTION must contain the {{text_type}} placeholder")]
    MissingPlaceholder,
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
