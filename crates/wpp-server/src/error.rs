//! Error types for the HTTP server.

use std::net::AddrParseError;
use std::path::PathBuf;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use wpp_cms::CmsError;
use wpp_site::RenderError;

/// Methods accepted on page routes.
pub(crate) const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Request handling error.
///
/// Responses carry a short plain-text message; upstream details are only
/// logged.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request method not accepted on page routes.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Request path exceeds the length limit.
    #[error("request path too long")]
    PathTooLong,

    /// Request path contains characters outside the allowed set.
    #[error("invalid characters in path: {0}")]
    InvalidPath(String),

    /// Page route ends with a file name.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// Static file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Page could not be fetched from the CMS.
    #[error("fetch error")]
    Fetch(#[from] CmsError),

    /// Page could not be rendered.
    #[error("render error")]
    Render(#[from] RenderError),

    /// Blocking task failed to complete.
    #[error("task failed")]
    Task(#[from] tokio::task::JoinError),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            Self::PathTooLong => (StatusCode::URI_TOO_LONG, "Request path too long"),
            Self::InvalidPath(_) => (StatusCode::BAD_REQUEST, "Invalid characters in path"),
            Self::PageNotFound(_) => (StatusCode::NOT_FOUND, "Page not found"),
            Self::FileNotFound(_) => (StatusCode::NOT_FOUND, "File not found"),
            Self::Fetch(e) if e.is_not_found() => (StatusCode::NOT_FOUND, "Page not found"),
            Self::Fetch(_) | Self::Task(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching page content")
            }
            Self::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering template"),
            Self::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let mut response = (status, message).into_response();
        if matches!(self, Self::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}

/// Error starting the server.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    /// CMS menus could not be loaded.
    #[error("cannot connect to CMS")]
    Cms(#[from] CmsError),

    /// Layout template could not be loaded.
    #[error("cannot load layout template")]
    Layout(#[from] RenderError),

    /// Invalid listen address.
    #[error("invalid listen address")]
    Address(#[from] AddrParseError),

    /// Startup task failed to complete.
    #[error("startup task failed")]
    Task(#[from] tokio::task::JoinError),

    /// Socket error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wpp_cms::Lang;

    use super::*;

    fn status(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status(ServerError::MethodNotAllowed), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(status(ServerError::PathTooLong), StatusCode::URI_TOO_LONG);
        assert_eq!(status(ServerError::InvalidPath("/a;b".to_owned())), StatusCode::BAD_REQUEST);
        assert_eq!(status(ServerError::PageNotFound("/a.html".to_owned())), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_cms_not_found_is_404() {
        let err = ServerError::Fetch(CmsError::NotFound {
            slug: "missing".to_owned(),
            lang: Lang::En,
        });

        assert_eq!(status(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_cms_failure_is_500() {
        let err = ServerError::Fetch(CmsError::Status {
            status: 502,
            body: "secret upstream detail".to_owned(),
        });

        assert_eq!(status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let response = ServerError::MethodNotAllowed.into_response();

        assert_eq!(response.headers()[header::ALLOW], ALLOWED_METHODS);
    }
}
