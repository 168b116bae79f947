//! Demo routes.
//!
//! Each failure path returns an [`HttpError`] so the error normalization
//! middleware has something to work with:
//!
//! | Route                 | Result                                        |
//! |-----------------------|-----------------------------------------------|
//! | `GET /health`         | 200 text                                      |
//! | `GET /items/{id}`     | 200 item for `1`, 404 `HttpError` otherwise   |
//! | `POST /items`         | 201 item, 400 `HttpError` without a name      |
//! | `GET /crash`          | 500 `HttpError`, never normalized             |
//! | `GET /upstream-error` | 409 raw JSON error body                       |

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::envelope::HttpError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/items", axum::routing::post(create_item))
        .route("/items/{id}", get(get_item))
        .route("/crash", get(crash))
        .route("/upstream-error", get(upstream_error))
}

async fn health() -> &'static str {
    "OK"
}

async fn get_item(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "1" => Json(Item {
            id: 1,
            name: "widget".to_string(),
        })
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            HttpError::new(format!("item {id} not found")),
        )
            .into_response(),
    }
}

async fn create_item(Json(item): Json<NewItem>) -> Response {
    let name = item.name.unwrap_or_default();
    if name.trim().is_empty() {
        let error = HttpError::new("The request is invalid.")
            .with_field_error("name", "The name field is required.");
        return (StatusCode::BAD_REQUEST, error).into_response();
    }

    (StatusCode::CREATED, Json(Item { id: 2, name })).into_response()
}

async fn crash() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        HttpError::new("An error has occurred.").with_detail("storage backend unavailable"),
    )
        .into_response()
}

/// Mimics an error forwarded verbatim from another service: JSON on the
/// wire, no typed payload attached.
async fn upstream_error() -> Response {
    (
        StatusCode::CONFLICT,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"Message":"The item was modified by another request."}"#,
    )
        .into_response()
}
