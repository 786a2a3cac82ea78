use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::content::models::LessonId;
use crate::domain::content::models::Step;
use crate::domain::content::models::TaskWithSteps;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_task(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let lesson_id = LessonId::from_string(&lesson_id)?;

    state
        .content
        .get_task_for_lesson(&lesson_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResponseData {
    pub task_id: String,
    pub description: String,
    pub steps: Vec<StepData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepData {
    pub position: i32,
    pub command: String,
    pub expected_output: String,
}

impl From<&Step> for StepData {
    fn from(step: &Step) -> Self {
        Self {
            position: step.position,
            command: step.command.clone(),
            expected_output: step.expected_output.clone(),
        }
    }
}

impl From<&TaskWithSteps> for TaskResponseData {
    fn from(task: &TaskWithSteps) -> Self {
        Self {
            task_id: task.task.id.to_string(),
            description: task.task.description.clone(),
            steps: task.steps.iter().map(StepData::from).collect(),
        }
    }
}
