use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::content::models::CourseId;
use crate::domain::content::models::LessonOverview;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Lists a course's lessons in position order. The `completed` flag is
/// specific to the calling principal.
pub async fn list_lessons(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<String>,
) -> Result<ApiSuccess<Vec<LessonData>>, ApiError> {
    let course_id = CourseId::from_string(&course_id)?;

    state
        .content
        .list_lessons(&course_id, &principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|lessons| {
            ApiSuccess::new(
                StatusCode::OK,
                lessons.iter().map(LessonData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonData {
    pub id: String,
    pub title: String,
    pub position: i32,
    pub completed: bool,
}

impl From<&LessonOverview> for LessonData {
    fn from(lesson: &LessonOverview) -> Self {
        Self {
            id: lesson.id.to_string(),
            title: lesson.title.clone(),
            position: lesson.position,
            completed: lesson.completed,
        }
    }
}
