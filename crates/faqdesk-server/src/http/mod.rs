mod routes;

pub use routes::create_router;

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use faqdesk_core::{ContentStore, EntryResolver, Envelope, FaqIndex, Generator};
use tracing::error;

/// Concrete resolver type shared across HTTP handlers.
pub type HttpResolver = EntryResolver<dyn ContentStore>;

/// Shared application state. Built once at startup; the index is read-only
/// from then on.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<FaqIndex>,
    pub resolver: Arc<HttpResolver>,
    pub generator: Arc<dyn Generator>,
    pub start_time: Instant,
}

/// The single outermost failure boundary. Anything unexpected that escapes
/// a handler lands here and is rendered as a 500 that still carries the
/// standard envelope shape.
pub struct AppError(pub anyhow::Error);

pub type AppResult<T> = std::result::Result<T, AppError>;

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("unhandled fault: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::fallback(format!("Unexpected error: {}", self.0))),
        )
            .into_response()
    }
}
