use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use faqdesk_core::{answer_prompt, AskRequest, Envelope, RequestKind};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::{AppResult, AppState};

/// Answer for a request that names neither `faq_id` nor `prompt`.
pub const INVALID_REQUEST: &str = "Invalid request. Provide either 'faq_id' or 'prompt'.";

/// Answer for a verb other than POST or OPTIONS on `/ask`.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed. Use POST.";

/// Answer for a path the router does not know.
pub const ROUTE_NOT_FOUND: &str = "Route not found.";

pub fn create_router(state: AppState, allowed_origin: &str) -> Router {
    Router::new()
        .route("/ask", post(ask).fallback(method_not_allowed))
        .route("/health", get(health))
        .fallback(route_not_found)
        .layer(cors_layer(allowed_origin))
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The CORS layer answers every OPTIONS request itself, with 200 and an
/// empty body, before routing. The contract wants 204 for the no-op verb,
/// so this sits outside the CORS layer and rewrites the status. The CORS
/// headers themselves are untouched.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    // Config::validate has already rejected unparseable origins.
    let origin = if allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        allowed_origin
            .parse::<HeaderValue>()
            .map(AllowOrigin::exact)
            .unwrap_or_else(|_| AllowOrigin::any())
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::OPTIONS, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(Duration::from_secs(3600))
}

/// `POST /ask` — the request dispatcher. Every outcome, including the
/// failure paths, leaves through an [`Envelope`].
async fn ask(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let request = AskRequest::parse(&body);
    let (status, envelope) = dispatch(&state, &request).await;
    Ok((status, Json(envelope)).into_response())
}

async fn dispatch(state: &AppState, request: &AskRequest) -> (StatusCode, Envelope) {
    match request.kind() {
        RequestKind::Lookup(id) => match state.resolver.resolve(id).await {
            Ok(Some(resolved)) => (StatusCode::OK, Envelope::corpus(resolved)),
            Ok(None) => (
                StatusCode::OK,
                Envelope::fallback(format!("Sorry — I couldn’t find a snippet for **{id}**.")),
            ),
            Err(err) => {
                warn!("snippet load failed for {id}: {err}");
                (
                    StatusCode::OK,
                    Envelope::fallback(format!("Failed to load snippet for **{id}**.")),
                )
            }
        },
        RequestKind::Prompt(text) => {
            let answer =
                answer_prompt(state.generator.as_ref(), text, request.generation_params()).await;
            (StatusCode::OK, Envelope::fallback(answer))
        }
        RequestKind::Empty => (StatusCode::BAD_REQUEST, Envelope::fallback(INVALID_REQUEST)),
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(Envelope::fallback(METHOD_NOT_ALLOWED)),
    )
        .into_response()
}

async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::fallback(ROUTE_NOT_FOUND)),
    )
        .into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    healthy: bool,
    version: String,
    uptime_seconds: u64,
    entries: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        entries: state.index.len(),
    })
}
