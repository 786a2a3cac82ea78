use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::content::models::Course;
use crate::domain::content::models::CreateCourseCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Json;
use crate::inbound::http::router::AppState;

pub async fn create_course(
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<ApiSuccess<CreateCourseResponseData>, ApiError> {
    state
        .content
        .create_course(CreateCourseCommand {
            title: body.title,
            description: body.description,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref course| ApiSuccess::new(StatusCode::CREATED, course.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCourseRequest {
    title: String,
    description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCourseResponseData {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&Course> for CreateCourseResponseData {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}
