//! Fake WordPress API for the wpp test suites.
//!
//! Serves `/wp-json/wp/v2/pages` and `/wp-json/wp/v2/menu-items` on an
//! ephemeral local port. Absolute URLs in responses use the `Host` header
//! the client sent, so origin stripping can be checked against the real
//! listener address.
//!
//! Pages are anonymous and menus require [`AUTH`]. Special page slugs:
//! - `missing` returns no pages
//! - `broken` fails with 500 and body `database down`
//! - `garbage` returns a non-JSON body with status 200
//! - `twice` returns two pages with ids 1 and 2
//! - `proxied` returns a valid page list with status 203
//! - `about-us`, `home-fr` and `hallo` return fixed pages
//!
//! Every other slug is echoed back as page 42 in the requested language.

use std::collections::HashMap;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// Basic auth header accepted for menu requests (`editor:secret`).
pub const AUTH: &str = "Basic ZWRpdG9yOnNlY3JldA==";

/// Basic auth user matching [`AUTH`].
pub const USERNAME: &str = "editor";

/// Basic auth password matching [`AUTH`].
pub const PASSWORD: &str = "secret";

/// Menu ID served with English items.
pub const MENU_EN: &str = "12";

/// Menu ID served with French items.
pub const MENU_FR: &str = "34";

/// Menu ID that answers only after [`SLOW_DELAY`].
pub const MENU_SLOW: &str = "slow";

/// Response delay of the slow menu.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

/// Fake CMS on its own background runtime. Stops when dropped.
///
/// For sync tests. Async tests use [`spawn`] on their own runtime instead,
/// since a runtime cannot be dropped from async context.
pub struct FakeCms {
    pub base_url: String,
    _runtime: Runtime,
}

impl FakeCms {
    /// Start the fake on a fresh two-thread runtime.
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("fake CMS runtime");
        let base_url = runtime.block_on(spawn());

        Self {
            base_url,
            _runtime: runtime,
        }
    }
}

/// Serve the fake on the current runtime and return its origin.
pub async fn spawn() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake CMS");
    let addr = listener.local_addr().expect("fake CMS address");
    tokio::spawn(async move {
        axum::serve(listener, router()).await.expect("fake CMS server");
    });
    format!("http://{addr}")
}

fn router() -> Router {
    Router::new()
        .route("/wp-json/wp/v2/pages", get(pages))
        .route("/wp-json/wp/v2/menu-items", get(menu_items))
}

/// Page handler. Rejects authenticated requests with 400.
///
/// Fixed pages:
/// - `about-us` (en): id 10, title `About Us`, French slug `a-propos`,
///   excerpt containing an absolute URL
/// - `home-fr`: id 11, title `Accueil`
/// - `hallo`: id 12 in the unsupported language `de`
async fn pages(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if headers.contains_key(header::AUTHORIZATION) {
        return (StatusCode::BAD_REQUEST, "pages must be fetched anonymously").into_response();
    }
    let origin = origin(&headers);
    let slug = params.get("slug").map_or("", String::as_str);
    let lang = params.get("lang").map_or("", String::as_str);

    match (slug, lang) {
        ("missing", _) => Json(json!([])).into_response(),
        ("broken", _) => (StatusCode::INTERNAL_SERVER_ERROR, "database down").into_response(),
        ("garbage", _) => "<html>not json</html>".into_response(),
        ("twice", _) => Json(json!([
            page(1, slug, lang, &origin),
            page(2, slug, lang, &origin)
        ]))
        .into_response(),
        ("proxied", _) => (
            StatusCode::NON_AUTHORITATIVE_INFORMATION,
            Json(json!([page(42, slug, lang, &origin)])),
        )
            .into_response(),
        ("about-us", "en") => Json(json!([{
            "id": 10,
            "slug": "about-us",
            "slug_en": "about-us",
            "slug_fr": "a-propos",
            "lang": "en",
            "modified": "2023-05-15T10:30:45",
            "title": {"rendered": "About Us"},
            "content": {"rendered": format!("<p>See {origin}/x</p>")},
            "excerpt": {"rendered": format!("<p>{origin}/y</p>")}
        }]))
        .into_response(),
        ("home-fr", _) => Json(json!([{
            "id": 11,
            "slug": "home-fr",
            "slug_en": "home",
            "slug_fr": "home-fr",
            "lang": "fr",
            "modified": "2024-01-02T03:04:05",
            "title": {"rendered": "Accueil"},
            "content": {"rendered": "<p>Bienvenue</p>"}
        }]))
        .into_response(),
        ("hallo", _) => Json(json!([{
            "id": 12,
            "slug": "hallo",
            "lang": "de",
            "modified": "2024-01-02T03:04:05",
            "title": {"rendered": "Hallo"},
            "content": {"rendered": "<p>Hallo</p>"}
        }]))
        .into_response(),
        _ => Json(json!([page(42, slug, lang, &origin)])).into_response(),
    }
}

/// Menu handler requiring [`AUTH`].
async fn menu_items(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == AUTH);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "rest_forbidden").into_response();
    }

    let origin = origin(&headers);
    match params.get("menus").map(String::as_str) {
        Some(MENU_EN) => Json(menu_en(&origin)).into_response(),
        Some(MENU_FR) => Json(menu_fr(&origin)).into_response(),
        Some(MENU_SLOW) => {
            tokio::time::sleep(SLOW_DELAY).await;
            Json(json!([])).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "rest_invalid_menu").into_response(),
    }
}

/// Origin the client used to reach the fake, e.g. `http://127.0.0.1:4321`.
fn origin(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}

fn page(id: u64, slug: &str, lang: &str, origin: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "slug_en": slug,
        "slug_fr": format!("{slug}-fr"),
        "lang": lang,
        "modified": "2023-05-15T10:30:45",
        "title": {"rendered": format!("Title of {slug}")},
        "content": {"rendered": format!("<p>See {origin}/x</p>")},
        "excerpt": {"rendered": "<p>Summary</p>"}
    })
}

/// English menu, children listed before their parent.
fn menu_en(origin: &str) -> Value {
    json!([
        {"id": 3, "parent": 1, "title": {"rendered": "Team"}, "url": format!("{origin}/about-us/team")},
        {"id": 1, "parent": 0, "title": {"rendered": "About"}, "url": format!("{origin}/about-us")},
        {"id": 2, "parent": 0, "title": {"rendered": "Contact"}, "url": format!("{origin}/contact")}
    ])
}

fn menu_fr(origin: &str) -> Value {
    json!([
        {"id": 11, "parent": 0, "title": {"rendered": "À propos"}, "url": format!("{origin}/fr/a-propos")}
    ])
}
