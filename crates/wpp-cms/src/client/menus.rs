//! Menu operations for the WordPress API.

use tracing::{error, info};

use super::CmsClient;
use crate::error::CmsError;
use crate::lang::Lang;
use crate::menu::{MenuTree, Menus};
use crate::types::MenuItem;

impl CmsClient {
    /// Fetch the flat navigation menu of one language.
    ///
    /// # Errors
    ///
    /// Returns a transport, status or parse error if the request fails.
    pub fn fetch_menu(&self, lang: Lang) -> Result<Vec<MenuItem>, CmsError> {
        let url = format!("{}/menu-items?menus={}", self.api_url(), self.menu_id(lang));

        info!(lang = %lang, "Fetching menu from {}", url);

        self.get_json(&url, true)
    }

    /// Fetch both language menus in parallel and build their trees.
    ///
    /// Waits for both requests; any failure fails the whole load.
    pub(super) fn load_menus(&self) -> Result<Menus, CmsError> {
        let (en, fr) = rayon::join(|| self.fetch_menu(Lang::En), || self.fetch_menu(Lang::Fr));

        let mut trees = Vec::with_capacity(Lang::ALL.len());
        for (lang, result) in [(Lang::En, en), (Lang::Fr, fr)] {
            let items = result.map_err(|source| {
                error!(lang = %lang, error = %source, "Failed to fetch menu");
                CmsError::Startup {
                    lang,
                    source: Box::new(source),
                }
            })?;
            info!(lang = %lang, "Loaded {} menu items", items.len());
            trees.push((lang, MenuTree::build(&items, &self.base_url)));
        }

        Ok(Menus::new(trees))
    }
}
