use axum::{extract::State, Json};

use super::dto::{HealthState, HealthStatus};
use crate::AppState;

/// 헬스 체크
///
/// 프로세스 생존 여부만 확인합니다. 원격 모델은 호출하지 않습니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "서버 정상", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: HealthState::Healthy,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
        frontend_built: state.frontend.index_path().is_file(),
    })
}
