//! Security headers middleware.
//!
//! Adds security headers to page responses:
//! - Strict-Transport-Security
//! - X-Frame-Options
//! - X-Content-Type-Options
//! - Referrer-Policy
//!
//! A header the handler already set is left untouched.

use axum::http::HeaderValue;
use axum::http::header::{self, HeaderName};
use tower_http::set_header::SetResponseHeaderLayer;

/// Strict-Transport-Security header value (one year, preload).
const HSTS: &str = "max-age=31536000; includeSubDomains; preload";

/// Create layer that adds Strict-Transport-Security header.
pub(crate) fn hsts_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static(HSTS),
    )
}

/// Create layer that adds X-Frame-Options header.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("SAMEORIGIN"),
    )
}

/// Create layer that adds X-Content-Type-Options header.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}

/// Create layer that adds Referrer-Policy header.
pub(crate) fn referrer_policy_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer-when-downgrade"),
    )
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use axum::body::Body;
    use axum::http::{Request, Response};
    use pretty_assertions::assert_eq;
    use tower::{ServiceBuilder, ServiceExt, service_fn};

    use super::*;

    #[tokio::test]
    async fn test_handler_header_is_preserved() {
        let service = ServiceBuilder::new()
            .layer(hsts_layer())
            .layer(frame_options_layer())
            .layer(content_type_options_layer())
            .layer(referrer_policy_layer())
            .service(service_fn(|_req: Request<Body>| async {
                let response = Response::builder()
                    .header("x-frame-options", "DENY")
                    .body(Body::empty())
                    .unwrap();
                Ok::<_, Infallible>(response)
            }));

        let response = service
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["strict-transport-security"], HSTS);
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["referrer-policy"], "no-referrer-when-downgrade");
    }

    #[test]
    fn test_hsts_value() {
        assert!(HSTS.contains("max-age=31536000"));
        assert!(HSTS.contains("includeSubDomains"));
        assert!(HSTS.contains("preload"));
    }
}
