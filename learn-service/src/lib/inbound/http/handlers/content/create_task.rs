use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::content::models::CreateTaskCommand;
use crate::domain::content::models::LessonId;
use crate::domain::content::models::Step;
use crate::domain::content::models::TaskWithSteps;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Json;
use crate::inbound::http::router::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<ApiSuccess<CreateTaskResponseData>, ApiError> {
    let lesson_id = LessonId::from_string(&lesson_id)?;

    let steps = body
        .steps
        .into_iter()
        .map(|s| Step {
            position: s.position,
            command: s.command,
            expected_output: s.expected_output,
        })
        .collect();

    state
        .content
        .create_task(CreateTaskCommand {
            lesson_id,
            description: body.description,
            steps,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    description: String,
    steps: Vec<StepRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepRequest {
    position: i32,
    command: String,
    expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTaskResponseData {
    pub id: String,
    pub lesson_id: String,
    pub description: String,
}

impl From<&TaskWithSteps> for CreateTaskResponseData {
    fn from(task: &TaskWithSteps) -> Self {
        Self {
            id: task.task.id.to_string(),
            lesson_id: task.task.lesson_id.to_string(),
            description: task.task.description.clone(),
        }
    }
}
