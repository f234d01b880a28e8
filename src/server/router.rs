//! Router builder for the course library API

use super::handlers::AppState;
use super::handlers::authors::{
    authors_options, create_author, delete_author, get_author, get_authors,
};
use super::handlers::courses::{
    create_course_for_author, delete_course_for_author, get_course_for_author,
    get_courses_for_author,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the API routes
///
/// - GET|HEAD /api/authors - List authors (filter, search, sort, page, shape)
/// - POST /api/authors - Create an author with optional courses
/// - OPTIONS /api/authors - Advertise allowed methods
/// - GET /api/authors/{author_id} - Get one author (shape)
/// - DELETE /api/authors/{author_id} - Delete an author and their courses
/// - GET /api/authors/{author_id}/courses - List an author's courses (sort, shape)
/// - POST /api/authors/{author_id}/courses - Create a course
/// - GET /api/authors/{author_id}/courses/{course_id} - Get one course (shape)
/// - DELETE /api/authors/{author_id}/courses/{course_id} - Delete a course
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/authors",
            get(get_authors).post(create_author).options(authors_options),
        )
        .route(
            "/api/authors/{author_id}",
            get(get_author).delete(delete_author),
        )
        .route(
            "/api/authors/{author_id}/courses",
            get(get_courses_for_author).post(create_course_for_author),
        )
        .route(
            "/api/authors/{author_id}/courses/{course_id}",
            get(get_course_for_author).delete(delete_course_for_author),
        )
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .merge(health_routes())
}

/// Health checks stay outside the tracing layer
fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "course-library"
    }))
}
