//! Interactive API documentation.
//!
//! - GET /docs - Swagger UI
//! - GET /docs/openapi.json - OpenAPI document generated from the route definitions

use axum::{Json, Router, response::Html, routing::get};
use utoipa::OpenApi;

use notes_core::{NewNote, Note, NotePatch};

use crate::error::{ErrorDetails, ErrorResponse};
use crate::routes::{health, notes};
use crate::state::AppState;

/// Path the OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/docs/openapi.json";

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes Management API",
        version = "v1",
        description = "Create, read, update, delete, and list notes."
    ),
    paths(
        health::health_check,
        health::health_alias,
        notes::list_notes,
        notes::create_note,
        notes::get_note,
        notes::update_note,
        notes::delete_note,
    ),
    components(schemas(
        Note,
        NewNote,
        NotePatch,
        notes::NoteListResponse,
        health::HealthResponse,
        ErrorResponse,
        ErrorDetails,
    )),
    tags(
        (name = "Health", description = "Health check route"),
        (name = "Notes", description = "CRUD operations for notes"),
    )
)]
pub struct ApiDoc;

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Notes Management API</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/docs/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

/// GET /docs/openapi.json - OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /docs - Swagger UI page.
async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// Build documentation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(swagger_ui))
        .route(OPENAPI_PATH, get(openapi_json))
}
