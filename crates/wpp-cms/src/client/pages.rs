//! Page operations for the WordPress API.

use tracing::info;

use super::CmsClient;
use crate::error::CmsError;
use crate::lang::resolve_path;
use crate::types::Page;

impl CmsClient {
    /// Fetch the page a site path refers to.
    ///
    /// The path is resolved to a slug and language first; the request is
    /// sent without credentials. When the CMS returns several matches the
    /// first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::NotFound`] if no page matches, or a transport,
    /// status or parse error if the request fails.
    pub fn fetch_page(&self, path: &str) -> Result<Page, CmsError> {
        let query = resolve_path(path);
        let url = format!(
            "{}/pages?slug={}&lang={}",
            self.api_url(),
            query.slug,
            query.lang
        );

        info!(slug = %query.slug, lang = %query.lang, "Fetching page from {}", url);

        let pages: Vec<Page> = self.get_json(&url, false)?;
        pages.into_iter().next().ok_or(CmsError::NotFound {
            slug: query.slug,
            lang: query.lang,
        })
    }
}
