//! Static file serving.
//!
//! Serves files below the configured static directory under `/static/`
//! with a one-week public cache lifetime.

use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use tracing::debug;

use crate::error::ServerError;
use crate::state::AppState;

/// Cache-Control value for static assets (7 days).
const CACHE_CONTROL: &str = "public, max-age=604800";

/// Serve a file from the static directory.
pub(crate) async fn serve_static(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ServerError> {
    debug!(path = %path, "Serving static file");

    let file_path = resolve(&state.static_dir, &path)
        .ok_or_else(|| ServerError::FileNotFound(PathBuf::from(&path)))?;

    let is_file = tokio::fs::metadata(&file_path)
        .await
        .is_ok_and(|meta| meta.is_file());
    if !is_file {
        return Err(ServerError::FileNotFound(file_path));
    }

    let content = tokio::fs::read(&file_path).await?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    if let Some(mime) = content_type(&file_path) {
        builder = builder.header(header::CONTENT_TYPE, mime);
    }

    builder
        .body(Body::from(content))
        .map_err(|e| ServerError::Io(std::io::Error::other(e)))
}

/// Join `path` onto `root`, rejecting anything but plain file name components.
fn resolve(root: &FsPath, path: &str) -> Option<PathBuf> {
    let relative = FsPath::new(path);
    let mut components = relative.components().peekable();
    components.peek()?;
    if !components.all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(root.join(relative))
}

/// Content type guessed from the file extension.
///
/// Text types get an explicit UTF-8 charset. Files without a known
/// extension get no content type.
fn content_type(path: &FsPath) -> Option<String> {
    path.extension()?;
    let mime = mime_guess::from_path(path).first()?;
    if mime.type_() == mime_guess::mime::TEXT {
        Some(format!("{mime}; charset=utf-8"))
    } else {
        Some(mime.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_plain_path() {
        let root = FsPath::new("/srv/static");

        assert_eq!(
            resolve(root, "css/styles.css"),
            Some(PathBuf::from("/srv/static/css/styles.css"))
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = FsPath::new("/srv/static");

        assert_eq!(resolve(root, "../secret.txt"), None);
        assert_eq!(resolve(root, "css/../../secret.txt"), None);
        assert_eq!(resolve(root, "/etc/passwd"), None);
        assert_eq!(resolve(root, ""), None);
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(
            content_type(FsPath::new("styles.css")).as_deref(),
            Some("text/css; charset=utf-8")
        );
        assert_eq!(content_type(FsPath::new("logo.png")).as_deref(), Some("image/png"));
        assert_eq!(
            content_type(FsPath::new("index.html")).as_deref(),
            Some("text/html; charset=utf-8")
        );
    }

    #[test]
    fn test_content_type_unknown() {
        assert_eq!(content_type(FsPath::new("LICENSE")), None);
        assert_eq!(content_type(FsPath::new("data.zzqx")), None);
    }
}
