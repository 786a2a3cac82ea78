use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::content::models::Course;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<CourseData>>, ApiError> {
    state
        .content
        .list_courses()
        .await
        .map_err(ApiError::from)
        .map(|courses| {
            ApiSuccess::new(
                StatusCode::OK,
                courses.iter().map(CourseData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseData {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&Course> for CourseData {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}
