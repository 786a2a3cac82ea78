use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::content::models::TaskId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Records the caller's completion of a task. Safe to call any number of
/// times; every call reports success and exactly one completion is stored.
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<CompleteTaskResponseData>, ApiError> {
    let task_id = TaskId::from_string(&task_id)?;

    state
        .content
        .complete_task(&principal.user_id, &task_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                CompleteTaskResponseData {
                    status: "success".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteTaskResponseData {
    pub status: String,
}
