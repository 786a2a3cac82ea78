pub mod complete_task;
pub mod create_course;
pub mod create_lesson;
pub mod create_task;
pub mod delete_course;
pub mod delete_lesson;
pub mod delete_task;
pub mod get_task;
pub mod list_courses;
pub mod list_lessons;
