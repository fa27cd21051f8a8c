//! WordPress REST API client.
//!
//! Provides a sync HTTP client for the WordPress `wp/v2` REST API. Page
//! lookups are anonymous; menu lookups use HTTP Basic authentication.

mod menus;
mod pages;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::error::CmsError;
use crate::lang::Lang;
use crate::menu::Menus;

/// Default HTTP timeout for every CMS request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Path of the WordPress REST API below the site origin.
const API_PREFIX: &str = "wp-json/wp/v2";

/// The only upstream status accepted as content.
const STATUS_OK: u16 = 200;

/// Connection settings for [`CmsClient`].
#[derive(Clone, Debug)]
pub struct CmsSettings {
    /// WordPress origin, e.g. `https://cms.example.com`.
    pub base_url: String,
    /// Basic auth user for menu requests.
    pub username: String,
    /// Basic auth password for menu requests.
    pub password: String,
    /// Menu ID of the English navigation.
    pub menu_id_en: String,
    /// Menu ID of the French navigation.
    pub menu_id_fr: String,
    /// Global timeout per request.
    pub timeout: Duration,
}

impl CmsSettings {
    /// Create settings with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        menu_id_en: impl Into<String>,
        menu_id_fr: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            menu_id_en: menu_id_en.into(),
            menu_id_fr: menu_id_fr.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// WordPress REST API client.
///
/// Holds the menu snapshot loaded by [`CmsClient::connect`]. All request
/// methods take `&self` and are safe to call from many threads.
pub struct CmsClient {
    agent: Agent,
    base_url: String,
    auth: String,
    menu_id_en: String,
    menu_id_fr: String,
    menus: Menus,
}

impl CmsClient {
    /// Create a client without loading menus.
    pub fn new(settings: &CmsSettings) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(settings.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = format!("{}:{}", settings.username, settings.password);

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            auth: STANDARD.encode(credentials),
            menu_id_en: settings.menu_id_en.clone(),
            menu_id_fr: settings.menu_id_fr.clone(),
            menus: Menus::default(),
        }
    }

    /// Create a client and load both language menus.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Startup`] if either menu cannot be fetched.
    pub fn connect(settings: &CmsSettings) -> Result<Self, CmsError> {
        let client = Self::new(settings);
        let menus = client.load_menus()?;
        Ok(client.with_menus(menus))
    }

    /// Replace the menu snapshot as a whole.
    #[must_use]
    pub fn with_menus(mut self, menus: Menus) -> Self {
        self.menus = menus;
        self
    }

    /// WordPress origin without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Menu snapshot loaded at connect time.
    pub fn menus(&self) -> &Menus {
        &self.menus
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/{API_PREFIX}", self.base_url)
    }

    fn menu_id(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.menu_id_en,
            Lang::Fr => &self.menu_id_fr,
        }
    }

    /// GET `url` and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, url: &str, authenticated: bool) -> Result<T, CmsError> {
        let mut request = self.agent.get(url).header("Accept", "application/json");
        if authenticated {
            request = request.header("Authorization", &format!("Basic {}", self.auth));
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status != STATUS_OK {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(CmsError::Status {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}
