//! Error types for page rendering.

/// Error while loading or rendering the layout.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template parsing or evaluation failed.
    #[error("template error")]
    Template(#[from] minijinja::Error),

    /// Template file could not be read.
    #[error("cannot read template {path}")]
    Io {
        /// Template file path.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
