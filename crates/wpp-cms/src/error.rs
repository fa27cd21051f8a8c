//! Error types for CMS access.

use crate::lang::Lang;

/// Error from CMS API operations.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Transport(#[from] ureq::Error),

    /// CMS answered with a status other than 200.
    #[error("CMS API returned status: {status}, body: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body is not the expected JSON.
    #[error("invalid JSON from CMS")]
    Parse(#[from] serde_json::Error),

    /// No page matches the slug and language.
    #[error("page not found: {slug} ({lang})")]
    NotFound {
        /// Requested slug.
        slug: String,
        /// Requested language.
        lang: Lang,
    },

    /// A menu required at startup could not be loaded.
    #[error("failed to load {lang} menu")]
    Startup {
        /// Language of the menu that failed.
        lang: Lang,
        /// Underlying failure.
        #[source]
        source: Box<CmsError>,
    },
}

impl CmsError {
    /// Whether the error means the requested page does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_status_message_includes_body() {
        let err = CmsError::Status {
            status: 500,
            body: "boom".to_owned(),
        };

        assert_eq!(err.to_string(), "CMS API returned status: 500, body: boom");
    }

    #[test]
    fn test_startup_error_keeps_source() {
        let err = CmsError::Startup {
            lang: Lang::Fr,
            source: Box::new(CmsError::Status {
                status: 401,
                body: String::new(),
            }),
        };

        assert_eq!(err.to_string(), "failed to load fr menu");
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("CMS API returned status: 401, body: ")
        );
    }

    #[test]
    fn test_is_not_found() {
        let not_found = CmsError::NotFound {
            slug: "missing".to_owned(),
            lang: Lang::En,
        };
        let status = CmsError::Status {
            status: 404,
            body: String::new(),
        };

        assert!(not_found.is_not_found());
        assert!(!status.is_not_found());
    }
}
