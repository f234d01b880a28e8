//! `/api/authors` handlers

use super::{AppState, check_fields};
use crate::core::error::{EntityError, LibraryError, LibraryResult, ValidationError};
use crate::core::query::{
    AuthorsResourceParameters, FieldsParameters, PaginationMetadata, ResourceUriType,
};
use crate::core::repository::AuthorsQuery;
use crate::entities::{Author, AuthorDto, AuthorForCreationDto};
use crate::shaping::{ShapeData, shape_one};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

/// Header carrying [`PaginationMetadata`] as JSON
pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");

/// Methods advertised by `OPTIONS /api/authors`
pub const AUTHORS_ALLOW: &str = "GET,OPTIONS,POST";

/// List authors
///
/// GET|HEAD /api/authors?mainCategory=&searchQuery=&pageNumber=&pageSize=&orderBy=&fields=
pub async fn get_authors(
    State(state): State<AppState>,
    Query(params): Query<AuthorsResourceParameters>,
) -> LibraryResult<Response> {
    state.check_order_by::<AuthorDto, Author>(params.order_by())?;
    check_fields::<AuthorDto>(params.fields())?;

    let page_size = params.page_size(&state.config.pagination);
    let query = AuthorsQuery {
        main_category: params.main_category.clone(),
        search_query: params.search_query.clone(),
        page_number: params.page_number(),
        page_size,
        sort: state
            .mappings
            .translate::<AuthorDto, Author>(params.order_by())?,
    };

    let page = state.repository.get_authors(&query).await?;

    let previous_page_link = if page.has_previous() {
        Some(
            state
                .links
                .authors_page(&params, page_size, ResourceUriType::PreviousPage)?,
        )
    } else {
        None
    };
    let next_page_link = if page.has_next() {
        Some(
            state
                .links
                .authors_page(&params, page_size, ResourceUriType::NextPage)?,
        )
    } else {
        None
    };
    let metadata = PaginationMetadata::new(&page, previous_page_link, next_page_link);
    let metadata = serde_json::to_string(&metadata)
        .map_err(|e| LibraryError::Internal(format!("pagination metadata: {}", e)))?;
    let metadata = HeaderValue::try_from(metadata)
        .map_err(|e| LibraryError::Internal(format!("pagination header: {}", e)))?;

    let today = Utc::now().date_naive();
    let authors: Vec<AuthorDto> = page
        .items()
        .iter()
        .map(|author| AuthorDto::from_author(author, today))
        .collect();
    let shaped = authors.shape_data(params.fields())?;

    tracing::debug!(
        count = shaped.len(),
        total = page.total_count(),
        page = page.current_page(),
        "listed authors"
    );

    Ok(([(PAGINATION_HEADER, metadata)], Json(shaped)).into_response())
}

/// Get one author
///
/// GET /api/authors/{author_id}?fields=
pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(params): Query<FieldsParameters>,
) -> LibraryResult<Response> {
    check_fields::<AuthorDto>(params.fields())?;

    let author = state
        .repository
        .get_author(&author_id)
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "Author",
            id: author_id,
        })?;

    let shaped = shape_one(&AuthorDto::from(&author), params.fields())?;
    Ok(Json(shaped).into_response())
}

/// Create an author, optionally with courses
///
/// POST /api/authors
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<AuthorForCreationDto>,
) -> LibraryResult<Response> {
    payload.validate().map_err(ValidationError::InvalidBody)?;

    let (author, courses) = payload.into_entities();
    let author = state.repository.add_author(author).await?;
    for course in courses {
        state.repository.add_course(course).await?;
    }

    tracing::info!(author_id = %author.id, "created author");

    let location = state.links.author(&author.id)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AuthorDto::from(&author)),
    )
        .into_response())
}

/// OPTIONS /api/authors
pub async fn authors_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, AUTHORS_ALLOW)])
}

/// Delete an author and their courses
///
/// DELETE /api/authors/{author_id}
pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> LibraryResult<StatusCode> {
    if !state.repository.delete_author(&author_id).await? {
        return Err(EntityError::NotFound {
            entity_type: "Author",
            id: author_id,
        }
        .into());
    }

    tracing::info!(%author_id, "deleted author");
    Ok(StatusCode::NO_CONTENT)
}
