// src/server.rs

//! HTTP surface for the resolve-and-aggregate pipeline.
//!
//! Exposes a single endpoint:
//! - `GET /crypto?query=<text>&days=<n>` -> aggregated stats + history
//!
//! Input validation (required `query`, positive `days`) lives here at the
//! edge; the service core receives only well-formed input and the `days`
//! value is passed through to the upstream untouched.

use crate::provider::MarketDataProvider;
use crate::service::{CryptoService, DEFAULT_DAYS};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::info;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

/// The API server that owns the service and listens for requests.
pub struct ApiServer<P> {
    service: CryptoService<P>,
    port: u16,
}

impl<P: MarketDataProvider + 'static> ApiServer<P> {
    pub fn new(service: CryptoService<P>, port: u16) -> Self {
        Self { service, port }
    }

    /// Starts the API server. Runs until shut down.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = router(self.service);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("API server starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Builds the application router. Split out from `ApiServer::run` so
/// tests can serve it on an ephemeral port.
pub fn router<P: MarketDataProvider + 'static>(service: CryptoService<P>) -> Router {
    // Browser frontends fetch this API directly, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/crypto", get(get_crypto::<P>))
        .layer(cors)
        .with_state(service)
}

/// Query parameters for GET /crypto. Both optional at the extractor
/// level so the handler can reject with 422 instead of axum's 400.
#[derive(Debug, Deserialize)]
struct CryptoParams {
    query: Option<String>,
    days: Option<i64>,
}

fn unprocessable(detail: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": detail })),
    )
        .into_response()
}

/// GET /crypto - resolves the query and returns aggregated market data.
async fn get_crypto<P: MarketDataProvider>(
    State(service): State<CryptoService<P>>,
    Query(params): Query<CryptoParams>,
) -> Response {
    let query = match params.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return unprocessable("missing required parameter 'query'"),
    };

    let days = match params.days {
        None => DEFAULT_DAYS,
        // try_from also rejects values past u32::MAX, which would
        // otherwise truncate on the way to the upstream.
        Some(d) if d >= 1 => match u32::try_from(d) {
            Ok(d) => d,
            Err(_) => return unprocessable("'days' is out of range"),
        },
        Some(_) => return unprocessable("'days' must be a positive integer"),
    };

    match service.lookup(&query, days).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
