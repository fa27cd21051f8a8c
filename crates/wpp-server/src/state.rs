//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use wpp_site::{Layout, Site};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Connected site with the menu snapshot.
    pub(crate) site: Site,
    /// Page layout.
    pub(crate) layout: Layout,
    /// Directory served under `/static`.
    pub(crate) static_dir: PathBuf,
}
