//! HTTP adapter: turns redirect signals into responses and serves the site.

use std::{path::Path, sync::Arc};

use axum::{
    Json, Router,
    extract::{Request, State},
    handler::HandlerWithoutStateExt,
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use waypost_core::{RedirectRule, RedirectTable, Signal};

/// Path of the JSON listing of the redirect table.
pub const ROUTES_PATH: &str = "/__routes";

/// Shared server state.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Redirect table, built once at startup.
    pub redirects: Arc<RedirectTable>,
}

impl ServerState {
    /// Create a new server state.
    pub fn new(redirects: RedirectTable) -> Self {
        Self {
            redirects: Arc::new(redirects),
        }
    }
}

/// A redirect signal rendered as an HTTP response.
#[derive(Debug, Clone)]
pub struct RedirectResponse(pub Signal);

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        let Signal { location, status } = self.0;
        (status.status_code(), [(header::LOCATION, location)]).into_response()
    }
}

/// Create the server router.
///
/// Redirect sources answer `GET`/`HEAD` with their signal; everything else
/// falls through to the pre-rendered files under `root`.
pub fn create_router(root: &Path, state: Arc<ServerState>) -> Router {
    let static_files = ServeDir::new(root).not_found_service(not_found.into_service());

    Router::new()
        .route(ROUTES_PATH, get(routes_handler))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Page-load hook: answer with the redirect signal when the route has a rule.
async fn redirect_middleware(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let path = request.uri().path().to_owned();
    match state.redirects.resolve(&path) {
        Ok(signal) => {
            tracing::debug!(
                from = %path,
                to = %signal.location,
                status = signal.status.as_str(),
                "redirecting"
            );
            RedirectResponse(signal).into_response()
        }
        Err(_) => next.run(request).await,
    }
}

/// List the redirect table.
async fn routes_handler(State(state): State<Arc<ServerState>>) -> Json<Vec<RedirectRule>> {
    Json(state.redirects.rules().cloned().collect())
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
