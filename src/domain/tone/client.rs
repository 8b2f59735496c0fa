use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use backoff::ExponentialBackoff;
use serde_json::Value;

use crate::config::ProviderConfig;

/// 원격 모델 호출 에러
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider rejected the API credential")]
    Unauthorized,
    #[error("provider rate limit reached")]
    RateLimited,
    #[error("provider temporarily unavailable: {0}")]
    Unavailable(String),
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider returned no completion text")]
    EmptyCompletion,
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

/// OpenAI 호환 에러를 ProviderError로 분류
fn classify_openai_error(error: OpenAIError) -> ProviderError {
    match error {
        OpenAIError::ApiError(api_err) => {
            // OpenRouter는 HTTP 상태를 숫자 code로 내려주고 type은 비워둠
            let status = api_err.code.as_ref().and_then(status_code);
            let err_code = api_err
                .code
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_lowercase();
            let err_type = api_err.r#type.as_deref().unwrap_or("").to_lowercase();
            let message = api_err.message.to_lowercase();

            if matches!(status, Some(401) | Some(403))
                || err_type == "authentication_error"
                || err_code == "invalid_api_key"
                || message.contains("api key")
                || message.contains("no auth credentials")
            {
                ProviderError::Unauthorized
            } else if status == Some(429)
                || err_type == "rate_limit_error"
                || err_code == "rate_limit_exceeded"
                || message.contains("rate limit")
            {
                ProviderError::RateLimited
            } else if status.is_some_and(|s| s >= 500)
                || err_type == "server_error"
                || message.contains("overloaded")
            {
                ProviderError::Unavailable(api_err.message)
            } else {
                ProviderError::Request(api_err.message)
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if status == Some(401) || status == Some(403) {
                ProviderError::Unauthorized
            } else if status == Some(429) {
                ProviderError::RateLimited
            } else if req_err.is_timeout()
                || req_err.is_connect()
                || status.map(|s| s >= 500).unwrap_or(false)
            {
                ProviderError::Unavailable(req_err.to_string())
            } else {
                ProviderError::Request(req_err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(err) => ProviderError::MalformedResponse(err.to_string()),
        other => ProviderError::Request(other.to_string()),
    }
}

/// 숫자 또는 숫자 문자열 code를 HTTP 상태로 해석
fn status_code(code: &Value) -> Option<u16> {
    match code {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// 첫 번째 choice의 텍스트를 trim 해서 반환, 비어 있으면 에러
pub(crate) fn first_completion_text(content: Option<&str>) -> Result<String, ProviderError> {
    match content.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ProviderError::EmptyCompletion),
    }
}

/// 채팅 완성 클라이언트 인터페이스
///
/// 원격 모델 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// 프롬프트를 단일 user 메시지로 보내고 첫 번째 응답 텍스트를 반환
    async fn complete(&self, prompt: &str, model_id: &str) -> Result<String, ProviderError>;
}

/// Arc로 래핑된 CompletionClient (Clone 지원)
pub type CompletionClientRef = Arc<dyn CompletionClient>;

/// OpenRouter (OpenAI 호환 chat-completions) 클라이언트
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client<OpenAIConfig>,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.as_str())
            .with_api_base(config.api_base.as_str());

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry_backoff()),
            timeout: config.timeout,
        }
    }
}

/// 재시도 없는 백오프
///
/// async-openai는 기본적으로 429 응답을 내부에서 재시도합니다.
/// 경과 시간 한도를 0으로 두면 첫 실패가 그대로 반환됩니다.
fn no_retry_backoff() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::ZERO),
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str, model_id: &str) -> Result<String, ProviderError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model_id)
            .messages(vec![ChatCompletionRequestMessage::User(message)])
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        tracing::debug!(model = model_id, prompt_length = prompt.len(), "Calling provider");

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
            .map_err(classify_openai_error)?;

        first_completion_text(
            response
                .choices
                .first()
                .and_then(|choice| choice.message.content.as_deref()),
        )
    }
}
