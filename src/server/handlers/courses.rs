//! `/api/authors/{author_id}/courses` handlers

use super::{AppState, check_fields};
use crate::core::error::{EntityError, LibraryResult, ValidationError};
use crate::core::query::{CoursesResourceParameters, FieldsParameters};
use crate::entities::{Course, CourseDto, CourseForCreationDto};
use crate::shaping::{ShapeData, shape_one};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use validator::Validate;

async fn ensure_author(state: &AppState, author_id: Uuid) -> LibraryResult<()> {
    if state.repository.author_exists(&author_id).await? {
        Ok(())
    } else {
        Err(EntityError::NotFound {
            entity_type: "Author",
            id: author_id,
        }
        .into())
    }
}

fn course_not_found(course_id: Uuid) -> EntityError {
    EntityError::NotFound {
        entity_type: "Course",
        id: course_id,
    }
}

/// List the courses of an author
///
/// GET /api/authors/{author_id}/courses?orderBy=&fields=
pub async fn get_courses_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(params): Query<CoursesResourceParameters>,
) -> LibraryResult<Response> {
    state.check_order_by::<CourseDto, Course>(params.order_by())?;
    check_fields::<CourseDto>(params.fields())?;
    ensure_author(&state, author_id).await?;

    let sort = state
        .mappings
        .translate::<CourseDto, Course>(params.order_by())?;
    let courses: Vec<CourseDto> = state
        .repository
        .get_courses(&author_id, &sort)
        .await?
        .iter()
        .map(CourseDto::from)
        .collect();

    Ok(Json(courses.shape_data(params.fields())?).into_response())
}

/// Get one course of an author
///
/// GET /api/authors/{author_id}/courses/{course_id}?fields=
pub async fn get_course_for_author(
    State(state): State<AppState>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<FieldsParameters>,
) -> LibraryResult<Response> {
    check_fields::<CourseDto>(params.fields())?;
    ensure_author(&state, author_id).await?;

    let course = state
        .repository
        .get_course(&author_id, &course_id)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;

    let shaped = shape_one(&CourseDto::from(&course), params.fields())?;
    Ok(Json(shaped).into_response())
}

/// Create a course for an author
///
/// POST /api/authors/{author_id}/courses
pub async fn create_course_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Json(payload): Json<CourseForCreationDto>,
) -> LibraryResult<Response> {
    ensure_author(&state, author_id).await?;
    payload.validate().map_err(ValidationError::InvalidBody)?;

    let course = state
        .repository
        .add_course(payload.into_course(author_id))
        .await?;

    tracing::info!(%author_id, course_id = %course.id, "created course");

    let location = state.links.course(&author_id, &course.id)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CourseDto::from(&course)),
    )
        .into_response())
}

/// Delete one course of an author
///
/// DELETE /api/authors/{author_id}/courses/{course_id}
pub async fn delete_course_for_author(
    State(state): State<AppState>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> LibraryResult<StatusCode> {
    ensure_author(&state, author_id).await?;

    if !state
        .repository
        .delete_course(&author_id, &course_id)
        .await?
    {
        return Err(course_not_found(course_id).into());
    }

    tracing::info!(%author_id, %course_id, "deleted course");
    Ok(StatusCode::NO_CONTENT)
}
