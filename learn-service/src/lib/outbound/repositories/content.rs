use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Course;
use crate::domain::content::models::CourseId;
use crate::domain::content::models::Lesson;
use crate::domain::content::models::LessonId;
use crate::domain::content::models::LessonOverview;
use crate::domain::content::models::Step;
use crate::domain::content::models::Task;
use crate::domain::content::models::TaskId;
use crate::domain::content::models::TaskWithSteps;
use crate::domain::content::ports::ContentRepository;
use crate::domain::user::models::UserId;

pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: CourseId(row.id),
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LessonOverviewRow {
    id: Uuid,
    title: String,
    position: i32,
    completed: bool,
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    lesson_id: Uuid,
    description: String,
}

#[derive(sqlx::FromRow)]
struct StepRow {
    position: i32,
    command: String,
    expected_output: String,
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false)
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, ContentError> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, created_at
            FROM courses
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn insert_course(&self, course: Course) -> Result<Course, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO courses (id, title, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(course.id.0)
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(course)
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_lessons_with_completion(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> Result<Vec<LessonOverview>, ContentError> {
        // A lesson counts as completed when its task has a completion row for
        // this user. Lessons without a task are never completed.
        let rows: Vec<LessonOverviewRow> = sqlx::query_as(
            r#"
            SELECT l.id, l.title, l.position, (c.task_id IS NOT NULL) AS completed
            FROM lessons l
            LEFT JOIN tasks t ON t.lesson_id = l.id
            LEFT JOIN completions c ON c.task_id = t.id AND c.user_id = $2
            WHERE l.course_id = $1
            ORDER BY l.position
            "#,
        )
        .bind(course_id.0)
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| LessonOverview {
                id: LessonId(r.id),
                title: r.title,
                position: r.position,
                completed: r.completed,
            })
            .collect())
    }

    async fn insert_lesson(&self, lesson: Lesson) -> Result<Lesson, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, course_id, title, content, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(lesson.id.0)
        .bind(lesson.course_id.0)
        .bind(&lesson.title)
        .bind(&lesson.content)
        .bind(lesson.position)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return ContentError::NotFound(lesson.course_id.to_string());
            }
            ContentError::DatabaseError(e.to_string())
        })?;

        Ok(lesson)
    }

    async fn delete_lesson(&self, id: &LessonId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn find_task_by_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<TaskWithSteps>, ContentError> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, lesson_id, description
            FROM tasks
            WHERE lesson_id = $1
            "#,
        )
        .bind(lesson_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        let Some(task_row) = row else {
            return Ok(None);
        };

        let steps: Vec<StepRow> = sqlx::query_as(
            r#"
            SELECT position, command, expected_output
            FROM steps
            WHERE task_id = $1
            ORDER BY position
            "#,
        )
        .bind(task_row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(Some(TaskWithSteps {
            task: Task {
                id: TaskId(task_row.id),
                lesson_id: LessonId(task_row.lesson_id),
                description: task_row.description,
            },
            steps: steps
                .into_iter()
                .map(|s| Step {
                    position: s.position,
                    command: s.command,
                    expected_output: s.expected_output,
                })
                .collect(),
        }))
    }

    async fn insert_task(&self, task: TaskWithSteps) -> Result<TaskWithSteps, ContentError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO tasks (id, lesson_id, description)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(task.task.id.0)
        .bind(task.task.lesson_id.0)
        .bind(&task.task.description)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return ContentError::NotFound(task.task.lesson_id.to_string());
            }
            ContentError::DatabaseError(e.to_string())
        })?;

        for step in &task.steps {
            sqlx::query(
                r#"
                INSERT INTO steps (task_id, position, command, expected_output)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(task.task.id.0)
            .bind(step.position)
            .bind(&step.command)
            .bind(&step.expected_output)
            .execute(&mut *tx)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn upsert_completion(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ContentError> {
        // ON CONFLICT DO NOTHING makes repeated and concurrent completions
        // converge on a single row without failing either caller.
        sqlx::query(
            r#"
            INSERT INTO completions (user_id, task_id, completed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, task_id) DO NOTHING
            "#,
        )
        .bind(user_id.0)
        .bind(task_id.0)
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return ContentError::NotFound(task_id.to_string());
            }
            ContentError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
