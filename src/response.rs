use serde::Serialize;
use utoipa::ToSchema;

/// 에러 응답 형식
///
/// 성공 응답은 각 엔드포인트의 결과를 그대로 반환하고, 에러만 이 형식으로 감쌉니다.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// 성공 여부 (에러 시 항상 false)
    #[schema(example = false)]
    pub is_success: bool,

    /// 에러 코드
    #[schema(example = "TONE_001")]
    pub code: String,

    /// 에러 메시지
    #[schema(example = "unsupported text_type 'casual', expected one of academic, corporate, political, default")]
    pub message: String,

    /// 항상 null
    #[schema(value_type = Option<Object>)]
    pub result: Option<()>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}
