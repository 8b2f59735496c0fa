use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::ValidationErrors;

use crate::domain::tone::dto::UnknownToneStyle;
use crate::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
///
/// 원격 모델 호출 실패는 여기까지 오지 않습니다 (파이프라인에서 fallback 처리).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidTextType(#[from] UnknownToneStyle),
    #[error("{0}")]
    ValidationError(String),
    #[error("malformed request body: {0}")]
    JsonParseFailed(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// 에러 코드 반환
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidTextType(_) => "TONE_001",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::Internal(_) => "COMMON500",
        }
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidTextType(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        match &self {
            AppError::Internal(msg) => tracing::error!(code, "Internal Server Error: {}", msg),
            other => tracing::warn!(code, "Request rejected: {}", other),
        }

        (status, Json(ErrorResponse::new(code, self.public_message()))).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
