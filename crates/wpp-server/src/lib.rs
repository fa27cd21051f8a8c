//! HTTP server for wpp.
//!
//! This crate serves the proxied WordPress site using axum:
//! - every page path is fetched from the CMS and rendered with the layout
//! - `/static/*` serves files from the static directory
//!
//! # Quick Start
//!
//! ```ignore
//! use wpp_server::{run_server, server_config_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = wpp_config::Config::load(None, None).unwrap();
//!     run_server(server_config_from_config(&config)).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (wpp-server)
//!                        │
//!                        ├─► Page fallback ──spawn_blocking──► Site ──ureq──► WordPress
//!                        │                                      │
//!                        │                                      └─► Layout (minijinja)
//!                        │
//!                        └─► /static/* ──► static directory
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use state::AppState;
use wpp_cms::CmsSettings;
use wpp_site::{Layout, Site, SiteNames};

pub use error::{ServerError, StartError};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// CMS connection settings.
    pub cms: CmsSettings,
    /// Localized site names.
    pub site_names: SiteNames,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Directory with a custom `layout.html` (`None` uses the built-in one).
    pub template_dir: Option<PathBuf>,
}

/// Run the server.
///
/// Loads the layout and both CMS menus before binding; either failing
/// aborts startup.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), StartError> {
    let layout = Layout::load(config.template_dir.as_deref())?;

    let cms = config.cms.clone();
    let names = config.site_names.clone();
    let site = tokio::task::spawn_blocking(move || Site::connect(&cms, names)).await??;

    let state = Arc::new(AppState {
        site,
        layout,
        static_dir: config.static_dir.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wpp config.
#[must_use]
pub fn server_config_from_config(config: &wpp_config::Config) -> ServerConfig {
    let cms = CmsSettings::new(
        config.cms.base_url.clone(),
        config.cms.username.clone(),
        config.cms.password.clone(),
        config.cms.menu_id_en.clone(),
        config.cms.menu_id_fr.clone(),
    )
    .with_timeout(Duration::from_secs(config.cms.timeout_secs));

    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        cms,
        site_names: SiteNames::new(config.site.name_en.clone(), config.site.name_fr.clone()),
        static_dir: config.server.static_dir.clone(),
        template_dir: config.server.template_dir.clone(),
    }
}

#[cfg(test)]
mod testing;
