//! Router test fixtures: a connected app state around the fake WordPress API.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use tower::ServiceExt;
use wpp_cms::CmsSettings;
use wpp_site::{Layout, Site, SiteNames};
use wpp_testing::{MENU_EN, MENU_FR, PASSWORD, USERNAME};

use crate::app::create_router;
use crate::state::AppState;

/// Serve the fake WordPress API on the current runtime and return its origin.
pub(crate) async fn start_fake_cms() -> String {
    wpp_testing::spawn().await
}

/// Connect a site to `base_url` and build the app router around it.
pub(crate) async fn router(base_url: &str, layout: Layout, static_dir: &Path) -> Router {
    let settings = CmsSettings::new(base_url, USERNAME, PASSWORD, MENU_EN, MENU_FR);
    let site = tokio::task::spawn_blocking(move || {
        Site::connect(&settings, SiteNames::new("My Site", "Mon site"))
    })
    .await
    .unwrap()
    .unwrap();

    create_router(Arc::new(AppState {
        site,
        layout,
        static_dir: static_dir.to_path_buf(),
    }))
}

/// Send one request through the router.
pub(crate) async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}
