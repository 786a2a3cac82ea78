use async_trait::async_trait;
use chrono::DateTime;
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
use crate::domain::content::models::TaskId;
use crate::domain::content::models::TaskWithSteps;
use crate::domain::user::models::UserId;

/// Port for content domain service operations, including completion tracking.
#[async_trait]
pub trait ContentServicePort: Send + Sync + 'static {
    async fn list_courses(&self) -> Result<Vec<Course>, ContentError>;

    async fn create_course(&self, command: CreateCourseCommand) -> Result<Course, ContentError>;

    /// # Errors
    /// * `NotFound` - Course does not exist
    async fn delete_course(&self, id: &CourseId) -> Result<(), ContentError>;

    /// List a course's lessons in position order, each annotated with whether
    /// `user_id` has completed its task.
    async fn list_lessons(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> Result<Vec<LessonOverview>, ContentError>;

    /// # Errors
    /// * `NotFound` - Course does not exist
    async fn create_lesson(&self, command: CreateLessonCommand) -> Result<Lesson, ContentError>;

    /// # Errors
    /// * `NotFound` - Lesson does not exist
    async fn delete_lesson(&self, id: &LessonId) -> Result<(), ContentError>;

    /// Fetch the lesson's task with its ordered steps.
    ///
    /// # Errors
    /// * `NotFound` - Lesson has no task
    async fn get_task_for_lesson(&self, lesson_id: &LessonId)
        -> Result<TaskWithSteps, ContentError>;

    /// # Errors
    /// * `NotFound` - Lesson does not exist
    async fn create_task(&self, command: CreateTaskCommand) -> Result<TaskWithSteps, ContentError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete_task(&self, id: &TaskId) -> Result<(), ContentError>;

    /// Record that `user_id` completed `task_id`. Idempotent: repeated and
    /// concurrent calls succeed and leave exactly one completion.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Store operation failed
    async fn complete_task(&self, user_id: &UserId, task_id: &TaskId) -> Result<(), ContentError>;
}

/// Persistence operations for the content hierarchy and completions.
#[async_trait]
pub trait ContentRepository: Send + Sync + 'static {
    async fn list_courses(&self) -> Result<Vec<Course>, ContentError>;

    async fn insert_course(&self, course: Course) -> Result<Course, ContentError>;

    /// # Errors
    /// * `NotFound` - Course does not exist
    async fn delete_course(&self, id: &CourseId) -> Result<(), ContentError>;

    async fn list_lessons_with_completion(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> Result<Vec<LessonOverview>, ContentError>;

    /// # Errors
    /// * `NotFound` - Referenced course does not exist
    async fn insert_lesson(&self, lesson: Lesson) -> Result<Lesson, ContentError>;

    /// # Errors
    /// * `NotFound` - Lesson does not exist
    async fn delete_lesson(&self, id: &LessonId) -> Result<(), ContentError>;

    async fn find_task_by_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<TaskWithSteps>, ContentError>;

    /// Insert the task and its steps atomically.
    ///
    /// # Errors
    /// * `NotFound` - Referenced lesson does not exist
    async fn insert_task(&self, task: TaskWithSteps) -> Result<TaskWithSteps, ContentError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete_task(&self, id: &TaskId) -> Result<(), ContentError>;

    /// Insert a completion row, doing nothing if one already exists for the
    /// `(user, task)` pair. Concurrent callers rely on the store's own
    /// uniqueness constraint; no additional locking happens above it.
    ///
    /// # Errors
    /// * `NotFound` - Referenced task does not exist
    async fn upsert_completion(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError>;
}
