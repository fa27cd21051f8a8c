//! Page endpoint.
//!
//! Every path outside `/static` is treated as a CMS page: the request is
//! checked, the page fetched and assembled, then rendered with the layout.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, info};

use crate::error::ServerError;
use crate::state::AppState;

/// Longest accepted request path in bytes.
const MAX_PATH_LEN: usize = 255;

/// Handle a page request.
pub(crate) async fn serve_page(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ServerError> {
    let path = uri.path().to_owned();
    check_request(&method, &path)?;

    info!(method = %method, path = %path, "Page request");

    let html = tokio::task::spawn_blocking(move || render_page(&state, &path)).await??;
    Ok(Html(html).into_response())
}

/// Fetch, assemble and render the page at `path`.
fn render_page(state: &AppState, path: &str) -> Result<String, ServerError> {
    let view = state.site.page(path).inspect_err(|e| {
        if e.is_not_found() {
            info!(path = %path, "Page not found");
        } else {
            error!(path = %path, error = %e, "Error fetching page");
        }
    })?;

    let html = state.layout.render(&view).inspect_err(|e| {
        error!(path = %path, error = %e, "Error rendering template");
    })?;
    Ok(html)
}

/// Validate method and path shape before contacting the CMS.
fn check_request(method: &Method, path: &str) -> Result<(), ServerError> {
    if !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS) {
        return Err(ServerError::MethodNotAllowed);
    }
    if path.len() > MAX_PATH_LEN {
        return Err(ServerError::PathTooLong);
    }
    if !path.bytes().all(is_path_byte) {
        return Err(ServerError::InvalidPath(path.to_owned()));
    }

    let last_segment = path.trim_matches('/').rsplit('/').next().unwrap_or_default();
    if last_segment.contains('.') {
        return Err(ServerError::PageNotFound(path.to_owned()));
    }
    Ok(())
}

/// Bytes allowed in page paths: ASCII letters, digits, `/`, `_`, `.`, `%`, `-`.
fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'/' | b'_' | b'.' | b'%' | b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_request_accepts_page_paths() {
        for path in ["/", "/about-us", "/fr/a-propos/", "/fr/%C3%A0-propos", "/a_b"] {
            assert!(check_request(&Method::GET, path).is_ok(), "path: {path}");
        }
    }

    #[test]
    fn test_check_request_methods() {
        for method in [Method::GET, Method::HEAD, Method::OPTIONS] {
            assert!(check_request(&method, "/about-us").is_ok(), "method: {method}");
        }
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            assert!(
                matches!(check_request(&method, "/about-us"), Err(ServerError::MethodNotAllowed)),
                "method: {method}"
            );
        }
    }

    #[test]
    fn test_check_request_length_limit() {
        let at_limit = format!("/{}", "a".repeat(MAX_PATH_LEN - 1));
        let over_limit = format!("/{}", "a".repeat(MAX_PATH_LEN));

        assert!(check_request(&Method::GET, &at_limit).is_ok());
        assert!(matches!(
            check_request(&Method::GET, &over_limit),
            Err(ServerError::PathTooLong)
        ));
    }

    #[test]
    fn test_check_request_invalid_characters() {
        for path in ["/about;us", "/a b", "/a+b", "/a~b", "/café"] {
            assert!(
                matches!(check_request(&Method::GET, path), Err(ServerError::InvalidPath(_))),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_check_request_file_extension() {
        for path in ["/about-us.html", "/fr/page.php", "/favicon.ico", "/about.html/"] {
            assert!(
                matches!(check_request(&Method::GET, path), Err(ServerError::PageNotFound(_))),
                "path: {path}"
            );
        }
        assert!(check_request(&Method::GET, "/v1.2/about").is_ok());
    }
}
