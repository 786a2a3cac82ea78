use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;
use learn_service::content::errors::ContentError;
use learn_service::content::models::Course;
use learn_service::content::models::CourseId;
use learn_service::content::models::Lesson;
use learn_service::content::models::LessonId;
use learn_service::content::models::LessonOverview;
use learn_service::content::models::TaskId;
use learn_service::content::models::TaskWithSteps;
use learn_service::content::ports::ContentRepository;
use learn_service::content::service::ContentService;
use learn_service::domain::user::service::UserService;
use learn_service::inbound::http::router::create_router;
use learn_service::user::errors::UserError;
use learn_service::user::models::Role;
use learn_service::user::models::User;
use learn_service::user::models::UserId;
use learn_service::user::models::Username;
use learn_service::user::ports::UserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by in-memory stores.
#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub content: Arc<InMemoryContentRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));
        let user_repo = Arc::new(InMemoryUserRepository::default());
        let content_repo = Arc::new(InMemoryContentRepository::default());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&authenticator),
        ));
        let content_service = Arc::new(ContentService::new(Arc::clone(&content_repo)));

        let router = create_router(user_service, content_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users: user_repo,
            content: content_repo,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and log in, returning the session token.
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        self.login(username, password).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Register an admin and log in, returning the session token. Role
    /// promotion goes straight to the store, the way the seeder does it.
    pub async fn register_admin(&self, username: &str, password: &str) -> String {
        let token = self.register_and_login(username, password).await;
        self.users.promote_to_admin(username);
        token
    }
}

/// In-memory stand-in for the Postgres user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn promote_to_admin(&self, username: &str) {
        let mut users = self.users.lock().unwrap();
        for user in users.values_mut() {
            if user.username.as_str() == username {
                user.role = Role::Admin;
            }
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.api_key.as_deref() == Some(api_key))
            .cloned())
    }

    async fn update_api_key(&self, id: &UserId, api_key: &str) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(id) {
            Some(user) => {
                user.api_key = Some(api_key.to_string());
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

/// In-memory stand-in for the Postgres content store.
#[derive(Default)]
pub struct InMemoryContentRepository {
    courses: Mutex<Vec<Course>>,
    lessons: Mutex<Vec<Lesson>>,
    tasks: Mutex<Vec<TaskWithSteps>>,
    completions: Mutex<HashMap<(UserId, TaskId), DateTime<Utc>>>,
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, ContentError> {
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn insert_course(&self, course: Course) -> Result<Course, ContentError> {
        self.courses.lock().unwrap().push(course.clone());
        Ok(course)
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), ContentError> {
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != *id);
        if courses.len() == before {
            return Err(ContentError::NotFound(id.to_string()));
        }
        self.lessons.lock().unwrap().retain(|l| l.course_id != *id);
        Ok(())
    }

    async fn list_lessons_with_completion(
        &self,
        course_id: &CourseId,
        user_id: &UserId,
    ) -> Result<Vec<LessonOverview>, ContentError> {
        let tasks = self.tasks.lock().unwrap();
        let completions = self.completions.lock().unwrap();

        let mut overviews: Vec<LessonOverview> = self
            .lessons
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.course_id == *course_id)
            .map(|l| {
                let completed = tasks
                    .iter()
                    .find(|t| t.task.lesson_id == l.id)
                    .map(|t| completions.contains_key(&(*user_id, t.task.id)))
                    .unwrap_or(false);
                LessonOverview {
                    id: l.id,
                    title: l.title.clone(),
                    position: l.position,
                    completed,
                }
            })
            .collect();
        overviews.sort_by_key(|l| l.position);
        Ok(overviews)
    }

    async fn insert_lesson(&self, lesson: Lesson) -> Result<Lesson, ContentError> {
        if !self
            .courses
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == lesson.course_id)
        {
            return Err(ContentError::NotFound(lesson.course_id.to_string()));
        }
        self.lessons.lock().unwrap().push(lesson.clone());
        Ok(lesson)
    }

    async fn delete_lesson(&self, id: &LessonId) -> Result<(), ContentError> {
        let mut lessons = self.lessons.lock().unwrap();
        let before = lessons.len();
        lessons.retain(|l| l.id != *id);
        if lessons.len() == before {
            return Err(ContentError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn find_task_by_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<TaskWithSteps>, ContentError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.task.lesson_id == *lesson_id)
            .cloned())
    }

    async fn insert_task(&self, task: TaskWithSteps) -> Result<TaskWithSteps, ContentError> {
        if !self
            .lessons
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.id == task.task.lesson_id)
        {
            return Err(ContentError::NotFound(task.task.lesson_id.to_string()));
        }
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ContentError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.task.id != *id);
        if tasks.len() == before {
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
        if !self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.task.id == *task_id)
        {
            return Err(ContentError::NotFound(task_id.to_string()));
        }
        self.completions
            .lock()
            .unwrap()
            .entry((*user_id, *task_id))
            .or_insert(completed_at);
        Ok(())
    }
}

impl InMemoryContentRepository {
    pub fn completion_count(&self) -> usize {
        self.completions.lock().unwrap().len()
    }
}
