use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::response::ErrorResponse;
use crate::AppState;

use super::dto::{ToneRequest, ToneResult, ToneStyle};
use super::tool;

/// JSON 파싱, 필드 검증, 문체 라벨 검증
fn validate_request(
    request: Result<Json<ToneRequest>, JsonRejection>,
) -> Result<(ToneRequest, ToneStyle), AppError> {
    let Json(request) = request?;
    request.validate()?;
    let style = request.text_type.parse::<ToneStyle>()?;
    tracing::debug!("Request validation passed");
    Ok((request, style))
}

/// 텍스트 문체 변환
///
/// 입력 텍스트를 지정한 문체로 1차 변환합니다.
/// 원격 모델 호출이 실패하면 입력 텍스트가 그대로 반환됩니다.
#[utoipa::path(
    post,
    path = "/api/professionalize",
    tag = "Tone",
    request_body = ToneRequest,
    responses(
        (status = 200, description = "변환 성공 (모델 실패 시 입력 그대로)", body = ToneResult),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    )
)]
pub async fn professionalize(
    State(state): State<AppState>,
    request: Result<Json<ToneRequest>, JsonRejection>,
) -> Result<Json<ToneResult>, AppError> {
    let (request, style) = validate_request(request)?;

    tracing::info!(
        input_length = request.input_text.len(),
        text_type = %style,
        "Professionalize request received"
    );

    let result = state
        .tone_service
        .professionalize(&request.input_text, style)
        .await;

    tracing::info!(
        output_length = result.professional_text.len(),
        "Text professionalized"
    );

    Ok(Json(result))
}

/// 변환 결과 다듬기
///
/// 요청 본문을 이전 단계의 결과로 보고, 같은 문체를 유지한 채 명료성과 격식을 높입니다.
#[utoipa::path(
    post,
    path = "/api/refine",
    tag = "Tone",
    request_body = ToneRequest,
    responses(
        (status = 200, description = "정제 성공 (모델 실패 시 입력 그대로)", body = ToneResult),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    )
)]
pub async fn refine(
    State(state): State<AppState>,
    request: Result<Json<ToneRequest>, JsonRejection>,
) -> Result<Json<ToneResult>, AppError> {
    let (request, style) = validate_request(request)?;

    tracing::info!(
        input_length = request.input_text.len(),
        text_type = %style,
        "Refine request received"
    );

    let previous = ToneResult::new(request.input_text, style);
    let result = state.tone_service.refine(&previous).await;

    tracing::info!(
        output_length = result.professional_text.len(),
        "Text refined"
    );

    Ok(Json(result))
}

/// function calling 도구 선언 목록
#[utoipa::path(
    get,
    path = "/api/tools",
    tag = "Tone",
    responses(
        (status = 200, description = "도구 선언 목록 (JSON 스키마)")
    )
)]
pub async fn list_tools() -> Json<Vec<Value>> {
    Json(vec![tool::professionalize_declaration()])
}
