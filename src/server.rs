//! Local HTTP endpoint serving the chart page.
//!
//! Every request to `/` re-reads the configured sources, so the page can be
//! re-bucketed from the browser without restarting.

use crate::{handler::render_page, handler::Params, Config, Error};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Port to listen on, 0 picks a free one
    pub port: u16,

    /// Open the chart in the default browser once listening
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            open_browser: true,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidWidth(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Creates the router serving the chart page at `/`.
pub fn router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .with_state(config)
}

/// Starts the HTTP server on localhost and serves until the process is stopped.
///
/// # Errors
///
/// Returns [`Error::Io`] if the listener cannot be bound or fails.
pub async fn run_server(config: Config, server: ServerConfig) -> crate::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let url = format!("http://{}/", listener.local_addr()?);
    log::info!("serving chart at {url}");

    if server.open_browser {
        open_browser(&url);
    }

    axum::serve(listener, router(Arc::new(config))).await?;

    Ok(())
}

fn open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();

    if let Err(e) = result {
        log::warn!("could not open browser ({e}), visit {url} manually");
    }
}

/// GET / - render the chart for the requested sample width and mode.
pub async fn index_handler(
    State(config): State<Arc<Config>>,
    Query(params): Query<Params>,
) -> Response {
    log::debug!("chart request: {params:?}");

    // NOTE: Sources are read from disk, keep that off the async workers
    let page = tokio::task::spawn_blocking(move || render_page(&config, &params)).await;

    match page {
        Ok(Ok(page)) => Html(page).into_response(),
        Ok(Err(e)) => {
            log::warn!("failed to render chart: {e}");
            e.into_response()
        }
        Err(e) => {
            log::error!("render task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "render task failed").into_response()
        }
    }
}
