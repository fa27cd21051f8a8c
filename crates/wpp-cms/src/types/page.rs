//! WordPress page types.

use serde::{Deserialize, Serialize};

/// WordPress page as returned by `/wp/v2/pages`.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response, and missing
/// fields fall back to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Page {
    /// Page ID.
    pub id: u64,
    /// Page slug in its own language.
    pub slug: String,
    /// Slug of the English version.
    pub slug_en: String,
    /// Slug of the French version.
    pub slug_fr: String,
    /// Language code of the page.
    pub lang: String,
    /// Last modification timestamp (`YYYY-MM-DDTHH:MM:SS`).
    pub modified: String,
    /// Page title (HTML).
    pub title: Rendered,
    /// Page body (HTML).
    pub content: Rendered,
    /// Page summary (HTML).
    pub excerpt: Rendered,
}

/// Rendered HTML field wrapper used throughout the WordPress API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Rendered {
    /// Rendered HTML.
    pub rendered: String,
}

impl Rendered {
    /// Wrap an HTML string.
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_page() {
        let json = r#"{
            "id": 42,
            "slug": "about-us",
            "slug_en": "about-us",
            "slug_fr": "a-propos",
            "lang": "en",
            "modified": "2023-05-15T10:00:00",
            "title": {"rendered": "About"},
            "content": {"rendered": "<p>Hi</p>", "protected": false},
            "excerpt": {"rendered": "<p>Short</p>"},
            "status": "publish"
        }"#;

        let page: Page = serde_json::from_str(json).unwrap();

        assert_eq!(page.id, 42);
        assert_eq!(page.slug_fr, "a-propos");
        assert_eq!(page.modified, "2023-05-15T10:00:00");
        assert_eq!(page.title, Rendered::new("About"));
        assert_eq!(page.content.rendered, "<p>Hi</p>");
    }

    #[test]
    fn test_deserialize_page_missing_fields() {
        let page: Page = serde_json::from_str(r#"{"slug": "home"}"#).unwrap();

        assert_eq!(page.slug, "home");
        assert_eq!(page.slug_en, "");
        assert_eq!(page.title.rendered, "");
    }
}
