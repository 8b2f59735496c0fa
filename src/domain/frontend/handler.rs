use std::io::ErrorKind;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tower_http::services::ServeFile;

use super::FRONTEND_NOT_BUILT;
use crate::error::AppError;
use crate::AppState;

fn not_built_notice() -> Response {
    Json(json!({ "error": FRONTEND_NOT_BUILT })).into_response()
}

/// 프론트엔드 index.html 제공
///
/// 빌드 산출물이 없으면 안내 메시지를 JSON으로 반환합니다.
/// 파일 내용은 인코딩과 상관없이 그대로 전송됩니다.
pub async fn serve_index(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let index_path = state.frontend.index_path();

    match tokio::fs::metadata(&index_path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Ok(not_built_notice()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %index_path.display(), "Frontend index not found");
            return Ok(not_built_notice());
        }
        Err(e) => {
            return Err(AppError::Internal(format!(
                "failed to stat {}: {}",
                index_path.display(),
                e
            )))
        }
    }

    let response = ServeFile::new(&index_path)
        .try_call(request)
        .await
        .map_err(|e| {
            AppError::Internal(format!("failed to read {}: {}", index_path.display(), e))
        })?;

    // 확인 직후 파일이 사라진 경우
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(not_built_notice());
    }

    Ok(response.map(Body::new))
}
