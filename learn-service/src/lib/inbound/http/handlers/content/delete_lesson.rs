use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::content::models::LessonId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let lesson_id = LessonId::from_string(&lesson_id)?;

    state
        .content
        .delete_lesson(&lesson_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
