//! Site languages and URL path resolution.
//!
//! The site mirrors CMS slugs into paths: `/about-us` is the English page
//! with slug `about-us`, `/fr/a-propos` is the French page `a-propos`.
//! The bare roots `/` and `/fr` map to the per-language home pages.

use std::fmt;

use serde::Serialize;

/// Path segment that marks French pages.
pub const FRENCH_MARKER: &str = "fr";

/// Slug of the English home page.
pub const HOME_SLUG_EN: &str = "home";

/// Slug of the French home page.
pub const HOME_SLUG_FR: &str = "home-fr";

/// Slug aliases for the language roots.
const HOME_ALIASES: [(&str, &str); 2] = [("", HOME_SLUG_EN), (FRENCH_MARKER, HOME_SLUG_FR)];

/// Supported site language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English, the default language.
    #[default]
    En,
    /// French.
    Fr,
}

impl Lang {
    /// All supported languages, default first.
    pub const ALL: [Self; 2] = [Self::En, Self::Fr];

    /// Language code as used by the CMS (`en`, `fr`).
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Parse a CMS language code. Returns `None` for unsupported codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// The other supported language.
    pub fn other(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    /// Site path of this language's home page (`/` or `/fr/`).
    pub fn root_path(self) -> &'static str {
        match self {
            Self::En => "/",
            Self::Fr => "/fr/",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// CMS page query derived from a site path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    /// Page slug to look up.
    pub slug: String,
    /// Language to filter by.
    pub lang: Lang,
}

/// Resolve a URL path to the CMS slug and language it refers to.
///
/// One trailing slash is ignored. The slug is the last path segment and
/// the language is French only when the first segment is `fr`. Slugs are
/// compared byte-for-byte; no percent-decoding happens here.
///
/// # Examples
///
/// ```
/// use wpp_cms::{Lang, resolve_path};
///
/// let query = resolve_path("/fr/a-propos/");
/// assert_eq!(query.slug, "a-propos");
/// assert_eq!(query.lang, Lang::Fr);
///
/// assert_eq!(resolve_path("/").slug, "home");
/// assert_eq!(resolve_path("/fr").slug, "home-fr");
/// ```
pub fn resolve_path(path: &str) -> PageQuery {
    let path = path.strip_suffix('/').unwrap_or(path);
    let slug = path.rsplit_once('/').map_or(path, |(_, last)| last);

    let lang = if path.split('/').nth(1) == Some(FRENCH_MARKER) {
        Lang::Fr
    } else {
        Lang::En
    };

    let slug = HOME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == slug)
        .map_or(slug, |(_, home)| home);

    PageQuery {
        slug: slug.to_owned(),
        lang,
    }
}
