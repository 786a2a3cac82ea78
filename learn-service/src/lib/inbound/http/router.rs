use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::api_key::issue_api_key;
use super::handlers::auth::login::login;
use super::handlers::auth::me::me;
use super::handlers::auth::register::register;
use super::handlers::content::complete_task::complete_task;
use super::handlers::content::create_course::create_course;
use super::handlers::content::create_lesson::create_lesson;
use super::handlers::content::create_task::create_task;
use super::handlers::content::delete_course::delete_course;
use super::handlers::content::delete_lesson::delete_lesson;
use super::handlers::content::delete_task::delete_task;
use super::handlers::content::get_task::get_task;
use super::handlers::content::list_courses::list_courses;
use super::handlers::content::list_lessons::list_lessons;
use super::middleware::authenticate;
use super::middleware::require_admin;
use crate::domain::content::ports::ContentServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserServicePort>,
    pub content: Arc<dyn ContentServicePort>,
}

pub fn create_router(
    users: Arc<dyn UserServicePort>,
    content: Arc<dyn ContentServicePort>,
) -> Router {
    let state = AppState { users, content };

    let public_routes = Router::new()
        .route("/healthz", get(|| async { StatusCode::OK }))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/courses", get(list_courses))
        .route("/lessons/:lesson_id/task", get(get_task));

    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/token", post(issue_api_key))
        .route("/courses/:course_id/lessons", get(list_lessons))
        .route("/tasks/:task_id/complete", post(complete_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let admin_routes = Router::new()
        .route("/admin/courses", post(create_course))
        .route("/admin/courses/:course_id", delete(delete_course))
        .route("/admin/courses/:course_id/lessons", post(create_lesson))
        .route("/admin/lessons/:lesson_id", delete(delete_lesson))
        .route("/admin/lessons/:lesson_id/task", post(create_task))
        .route("/admin/tasks/:task_id", delete(delete_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Span deliberately leaves headers out: the Authorization header carries
    // live credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
