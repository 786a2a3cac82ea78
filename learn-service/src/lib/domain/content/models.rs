use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::content::errors::ContentIdError;

macro_rules! content_id {
    ($name:ident) => {
        /// Unique identifier newtype for a content entity.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// # Errors
            /// * `InvalidFormat` - String is not a valid UUID
            pub fn from_string(s: &str) -> Result<Self, ContentIdError> {
                Uuid::parse_str(s)
                    .map($name)
                    .map_err(|e| ContentIdError::InvalidFormat(e.to_string()))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

content_id!(CourseId);
content_id!(LessonId);
content_id!(TaskId);

/// Top of the content hierarchy: Course → Lesson → Task → Step.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A lesson belongs to exactly one course, ordered by `position`.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
    pub position: i32,
}

/// Lesson listing entry, annotated per caller with whether its task has been
/// completed.
#[derive(Debug, Clone)]
pub struct LessonOverview {
    pub id: LessonId,
    pub title: String,
    pub position: i32,
    pub completed: bool,
}

/// The exercise attached to a lesson. At most one task per lesson.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub lesson_id: LessonId,
    pub description: String,
}

/// A single verifiable command within a task, ordered by `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub position: i32,
    pub command: String,
    pub expected_output: String,
}

/// A task together with its ordered steps.
#[derive(Debug, Clone)]
pub struct TaskWithSteps {
    pub task: Task,
    pub steps: Vec<Step>,
}

#[derive(Debug)]
pub struct CreateCourseCommand {
    pub title: String,
    pub description: String,
}

#[derive(Debug)]
pub struct CreateLessonCommand {
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
    pub position: i32,
}

#[derive(Debug)]
pub struct CreateTaskCommand {
    pub lesson_id: LessonId,
    pub description: String,
    pub steps: Vec<Step>,
}
