use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub use self::book::*;

mod book;

/// Successful reply carrying `data`. Listings add the page metadata.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_page: Option<i64>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data,
            total_pages: None,
            current_page: None,
        }
    }

    pub fn page(data: T, total_pages: i64, current_page: i64) -> Self {
        Self {
            total_pages: Some(total_pages),
            current_page: Some(current_page),
            ..Self::data(data)
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Reply with a message and no data: confirmations and every failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct Notice {
    success: bool,
    message: String,
}

impl Notice {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl IntoResponse for Notice {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
