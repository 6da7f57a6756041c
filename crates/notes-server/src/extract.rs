//! Request extractors that reject with JSON [`ApiError`] bodies.
//!
//! Axum's stock `Json` and `Path` extractors answer malformed input with
//! plain-text 4xx responses. These wrappers keep every failure in the
//! service's error format.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use notes_core::NoteId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body. Malformed or mistyped bodies become `400 BAD_REQUEST`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err(ApiError::BadRequest(rejection.body_text()))
            }
        }
    }
}

/// The `{id}` path segment of a note route.
///
/// A segment that is not a non-negative integer cannot name a note, so it is
/// answered the same way as an unknown id: `404 NOT_FOUND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteIdPath(pub NoteId);

impl<S> FromRequestParts<S> for NoteIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        raw.parse::<NoteId>()
            .map(Self)
            .map_err(|_| ApiError::note_not_found(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Method, StatusCode, header};
    use notes_core::NewNote;

    fn json_request(body: &'static str) -> Request {
        http::Request::builder()
            .method(Method::POST)
            .uri("/notes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_accepts_valid_json() {
        let JsonBody(note) = JsonBody::<NewNote>::from_request(
            json_request(r#"{"title": "t", "content": "c"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(note, NewNote::new("t", "c"));
    }

    #[tokio::test]
    async fn test_json_body_rejects_malformed_json() {
        let err = JsonBody::<NewNote>::from_request(json_request("{ nope"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_json_body_rejects_wrong_types() {
        let err = JsonBody::<NewNote>::from_request(json_request(r#"{"title": 5}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_body_requires_content_type() {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/notes")
            .body(Body::from(r#"{"title": "t", "content": "c"}"#))
            .unwrap();
        let err = JsonBody::<NewNote>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
