use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Course;
use crate::domain::content::models::CourseId;
use crate::domain::content::models::CreateCourseCommand;
use crate::domain::content::models::CreateLessonCommand;
use crate::domain::content::models::CreateTaskCommand;
use crate::domain::content::models::Lesson;
use crate::domain::content::models::LessonId;
use crate::domain::content::models::LessonOverview;
use crate::domain::content::models::Task;
use crate::domain::content::models::TaskId;
use crate::domain::content::models::TaskWithSteps;
use crate::domain::content::ports::ContentRepository;
use crate::domain::content::ports::ContentServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for the content hierarchy.
///
/// Thin orchestration over the repository; completion idempotency is
/// enforced at the store boundary, not here.
pub struct ContentService<CR>
where
    CR: ContentRepository,
{
    repository: Arc<CR>,
}

impl<CR> ContentService<CR>
where
    CR: ContentRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ContentServicePort for ContentService<CR>
where
    CR: ContentRepository,
{
    async fn list_courses(&self) -> Result<Vec<Course>, ContentError> {
        self.repository.list_courses().await
    }

    async fn create_course(&self, command: CreateCourseCommand) -> Result<Course, ContentError> {
        let course = Course {
            id: CourseId::new(),
            title: command.title,
            description: command.description,
            created_at: Utc::now(),
        };

        self.repository.insert_course(course).await
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), ContentError> {
        self.repository.delete_course(id).await
    }

    async fn list_lessons(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> Result<Vec<LessonOverview>, ContentError> {
        self.repository
            .list_lessons_with_completion(course_id, user_id)
            .await
    }

    async fn create_lesson(&self, command: CreateLessonCommand) -> Result<Lesson, ContentError> {
        let lesson = Lesson {
            id: LessonId::new(),
            course_id: command.course_id,
            title: command.title,
            content: command.content,
            position: command.position,
        };

        self.repository.insert_lesson(lesson).await
    }

    async fn delete_lesson(&self, id: &LessonId) -> Result<(), ContentError> {
        self.repository.delete_lesson(id).await
    }

    async fn get_task_for_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<TaskWithSteps, ContentError> {
        self.repository
            .find_task_by_lesson(lesson_id)
            .await?
            .ok_or(ContentError::NotFound(format!(
                "no task for lesson {}",
                lesson_id
            )))
    }

    async fn create_task(&self, command: CreateTaskCommand) -> Result<TaskWithSteps, ContentError> {
        let task = Task {
            id: TaskId::new(),
            lesson_id: command.lesson_id,
            description: command.description,
        };

        self.repository
            .insert_task(TaskWithSteps {
                task,
                steps: command.steps,
            })
            .await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ContentError> {
        self.repository.delete_task(id).await
    }

    async fn complete_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<(), ContentError> {
        self.repository
            .upsert_completion(user_id, task_id, Utc::now())
            .await
    }
}
