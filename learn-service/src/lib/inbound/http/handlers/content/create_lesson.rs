use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::content::models::CourseId;
use crate::domain::content::models::CreateLessonCommand;
use crate::domain::content::models::Lesson;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Json;
use crate::inbound::http::router::AppState;

pub async fn create_lesson(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(body): Json<CreateLessonRequest>,
) -> Result<ApiSuccess<CreateLessonResponseData>, ApiError> {
    let course_id = CourseId::from_string(&course_id)?;

    state
        .content
        .create_lesson(CreateLessonCommand {
            course_id,
            title: body.title,
            content: body.content,
            position: body.position,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref lesson| ApiSuccess::new(StatusCode::CREATED, lesson.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateLessonRequest {
    title: String,
    content: String,
    position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateLessonResponseData {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub position: i32,
}

impl From<&Lesson> for CreateLessonResponseData {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.to_string(),
            course_id: lesson.course_id.to_string(),
            title: lesson.title.clone(),
            position: lesson.position,
        }
    }
}
