//! Page lookup facade.

use tracing::info;
use wpp_cms::{CmsClient, CmsError, CmsSettings};

use crate::view::{PageView, SiteNames};

/// Connected site: CMS client with its menus plus the site names.
pub struct Site {
    client: CmsClient,
    names: SiteNames,
}

impl Site {
    /// Connect to the CMS and load the menus.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Startup`] if either menu cannot be loaded.
    pub fn connect(settings: &CmsSettings, names: SiteNames) -> Result<Self, CmsError> {
        let client = CmsClient::connect(settings)?;
        info!(base_url = %client.base_url(), "Connected to CMS");
        Ok(Self::from_client(client, names))
    }

    /// Wrap an existing client.
    pub fn from_client(client: CmsClient, names: SiteNames) -> Self {
        Self { client, names }
    }

    /// Fetch the page at `path` and assemble its view.
    ///
    /// # Errors
    ///
    /// Returns the [`CmsError`] of the page fetch; [`CmsError::is_not_found`]
    /// tells a missing page apart from upstream failures.
    pub fn page(&self, path: &str) -> Result<PageView, CmsError> {
        let page = self.client.fetch_page(path)?;
        Ok(PageView::assemble(
            page,
            self.client.menus(),
            &self.names,
            self.client.base_url(),
            path,
        ))
    }
}
