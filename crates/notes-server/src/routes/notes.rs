//! Note CRUD routes.
//!
//! This module implements the note-related HTTP endpoints:
//! - GET /notes - List notes, paginated, in ascending id order
//! - POST /notes - Create a note
//! - GET /notes/{id} - Read a note
//! - PATCH /notes/{id} - Partially update a note
//! - DELETE /notes/{id} - Delete a note

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use notes_core::{NewNote, Note, NotePatch, Page, PagePolicy, PageRequest};

use crate::error::{ApiResult, ErrorResponse};
use crate::extract::{JsonBody, NoteIdPath};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /notes.
///
/// Values are taken as raw strings so that a non-integer falls back to the
/// default instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1).
    #[param(value_type = Option<i64>, minimum = 1, example = 1)]
    pub page: Option<String>,
    /// Items per page (default and maximum are server configured).
    #[param(value_type = Option<i64>, minimum = 1, example = 20)]
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Normalize into a page request, clamping out-of-range values.
    pub fn to_page_request(&self, policy: &PagePolicy) -> PageRequest {
        PageRequest::clamped(
            parse_lenient(self.page.as_deref()),
            parse_lenient(self.page_size.as_deref()),
            policy,
        )
    }
}

fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Response for GET /notes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoteListResponse {
    /// Notes on this page, ordered by id.
    pub items: Vec<Note>,
    /// Total number of notes in the store.
    pub total: usize,
    /// Page number that was served.
    pub page: u32,
    /// Page size that was applied.
    pub page_size: u32,
    /// Number of pages at this page size (at least 1).
    pub total_pages: u32,
    /// Previous page number, if any.
    pub previous_page: Option<u32>,
    /// Next page number, if any.
    pub next_page: Option<u32>,
}

impl From<Page<Note>> for NoteListResponse {
    fn from(page: Page<Note>) -> Self {
        let total_pages = page.total_pages();
        let previous_page = page.previous_page();
        let next_page = page.next_page();
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages,
            previous_page,
            next_page,
        }
    }
}

impl NoteListResponse {
    /// `X-Pagination-*` headers mirroring the body metadata.
    pub fn pagination_headers(&self) -> [(&'static str, String); 5] {
        fn optional(page: Option<u32>) -> String {
            page.map_or_else(|| "None".to_string(), |p| p.to_string())
        }

        [
            ("x-pagination-total", self.total.to_string()),
            ("x-pagination-total-pages", self.total_pages.to_string()),
            ("x-pagination-page", self.page.to_string()),
            ("x-pagination-prev-page", optional(self.previous_page)),
            ("x-pagination-next-page", optional(self.next_page)),
        ]
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notes - List notes.
///
/// Returns one page of notes in ascending id order. A page past the end is
/// empty; `total` is always the size of the whole collection.
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of notes", body = NoteListResponse),
    )
)]
pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let request = query.to_page_request(&state.config().page_policy);

    let page = state.store().list(request).await;
    let response = NoteListResponse::from(page);

    tracing::debug!(
        page = response.page,
        page_size = response.page_size,
        count = response.items.len(),
        total = response.total,
        "Listed notes"
    );

    (response.pagination_headers(), Json(response))
}

/// POST /notes - Create a note.
///
/// # Request
///
/// Body: `{ "title": "...", "content": "..." }`
///
/// # Response
///
/// - 201 Created: the stored note
/// - 400 Bad Request: missing, blank, or malformed fields
#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    request_body = NewNote,
    responses(
        (status = 201, description = "Created note", body = Note),
        (status = 400, description = "Invalid input", body = ErrorResponse),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewNote>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = state.store().create(request).await?;

    tracing::info!(note_id = %note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{id} - Read a note.
#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = u64, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Single note", body = Note),
        (status = 404, description = "Note not found", body = ErrorResponse),
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    NoteIdPath(id): NoteIdPath,
) -> ApiResult<Json<Note>> {
    Ok(Json(state.store().get(id).await?))
}

/// PATCH /notes/{id} - Update fields of a note.
///
/// Only the fields present in the body change. An empty body object is
/// accepted and refreshes `updated_at` only.
#[utoipa::path(
    patch,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = u64, Path, description = "Note identifier")),
    request_body = NotePatch,
    responses(
        (status = 200, description = "Updated note", body = Note),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    NoteIdPath(id): NoteIdPath,
    JsonBody(patch): JsonBody<NotePatch>,
) -> ApiResult<Json<Note>> {
    let note = state.store().update(id, patch).await?;

    tracing::info!(note_id = %note.id, "Note updated");

    Ok(Json(note))
}

/// DELETE /notes/{id} - Delete a note.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = u64, Path, description = "Note identifier")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found", body = ErrorResponse),
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    NoteIdPath(id): NoteIdPath,
) -> ApiResult<StatusCode> {
    state.store().delete(id).await?;

    tracing::info!(note_id = %id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).patch(update_note).delete(delete_note),
        )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notes_core::NoteId;

    fn query(raw: &str) -> ListQuery {
        serde_urlencoded::from_str(raw).unwrap()
    }

    #[test]
    fn test_list_query_defaults() {
        let policy = PagePolicy::new(20, 100);
        let request = query("").to_page_request(&policy);
        assert_eq!((request.page(), request.page_size()), (1, 20));
    }

    #[test]
    fn test_list_query_invalid_values_fall_back() {
        let policy = PagePolicy::new(20, 100);
        let request = query("page=abc&page_size=1.5").to_page_request(&policy);
        assert_eq!((request.page(), request.page_size()), (1, 20));
    }

    #[test]
    fn test_list_query_clamps() {
        let policy = PagePolicy::new(20, 100);
        let request = query("page=-3&page_size=5000").to_page_request(&policy);
        assert_eq!((request.page(), request.page_size()), (1, 100));

        let request = query("page=%204%20&page_size=0").to_page_request(&policy);
        assert_eq!((request.page(), request.page_size()), (4, 1));
    }

    #[test]
    fn test_list_response_metadata() {
        let now = Utc::now();
        let note = Note {
            id: NoteId(3),
            title: "t".into(),
            content: "c".into(),
            created_at: now,
            updated_at: now,
        };
        let page = Page {
            items: vec![note],
            total: 5,
            page: 2,
            page_size: 2,
        };

        let response = NoteListResponse::from(page);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.previous_page, Some(1));
        assert_eq!(response.next_page, Some(3));

        let headers = response.pagination_headers();
        assert_eq!(headers[0], ("x-pagination-total", "5".to_string()));
        assert_eq!(headers[1], ("x-pagination-total-pages", "3".to_string()));
        assert_eq!(headers[2], ("x-pagination-page", "2".to_string()));
        assert_eq!(headers[3], ("x-pagination-prev-page", "1".to_string()));
        assert_eq!(headers[4], ("x-pagination-next-page", "3".to_string()));
    }

    #[test]
    fn test_missing_neighbours_render_as_none() {
        let response = NoteListResponse::from(Page::<Note> {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: 10,
        });
        let headers = response.pagination_headers();
        assert_eq!(headers[3].1, "None");
        assert_eq!(headers[4].1, "None");
    }

    #[test]
    fn test_list_response_serialize() {
        let response = NoteListResponse::from(Page::<Note> {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: 10,
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["items"], serde_json::json!([]));
        assert_eq!(value["total"], 0);
        assert_eq!(value["page"], 1);
        assert_eq!(value["page_size"], 10);
        assert!(value["next_page"].is_null());
    }
}
