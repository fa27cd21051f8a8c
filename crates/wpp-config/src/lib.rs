//! Configuration management for wpp.
//!
//! Configuration comes from one of two places:
//!
//! - a `wpp.toml` file, given explicitly or auto-discovered in the current
//!   directory and its parents
//! - the process environment, when no file is found (`PORT`,
//!   `WORDPRESS_URL`, `WORDPRESS_USERNAME`, ...)
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values in `wpp.toml` support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `cms.base_url`
//! - `cms.username`
//! - `cms.password`
//! - `cms.menu_id_en`
//! - `cms.menu_id_fr`
//! - `site.name_en`
//! - `site.name_fr`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override static assets directory.
    pub static_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wpp.toml";

/// Default upstream request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Environment variables read when no configuration file exists.
const ENV_PORT: &str = "PORT";
const ENV_SITE_NAME_EN: &str = "SITE_NAME_EN";
const ENV_SITE_NAME_FR: &str = "SITE_NAME_FR";
const ENV_BASE_URL: &str = "WORDPRESS_URL";
const ENV_USERNAME: &str = "WORDPRESS_USERNAME";
const ENV_PASSWORD: &str = "WORDPRESS_PASSWORD";
const ENV_MENU_ID_EN: &str = "WORDPRESS_MENU_ID_EN";
const ENV_MENU_ID_FR: &str = "WORDPRESS_MENU_ID_FR";
const ENV_STATIC_DIR: &str = "STATIC_DIR";
const ENV_TEMPLATE_DIR: &str = "TEMPLATE_DIR";

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream CMS configuration.
    pub cms: CmsConfig,
    /// Site display configuration.
    pub site: SiteConfig,

    /// Path to the config file (set after loading, `None` for environment).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
    /// Directory containing `layout.html` (built-in layout when `None`).
    pub template_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            static_dir: PathBuf::from("static"),
            template_dir: None,
        }
    }
}

/// Upstream CMS configuration.
#[derive(Debug, Deserialize)]
pub struct CmsConfig {
    /// CMS origin, e.g. `https://cms.example.com`.
    pub base_url: String,
    /// Basic-auth user for menu requests.
    pub username: String,
    /// Basic-auth password for menu requests.
    pub password: String,
    /// Menu identifier of the English navigation menu.
    pub menu_id_en: String,
    /// Menu identifier of the French navigation menu.
    pub menu_id_fr: String,
    /// Upstream request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Site display configuration.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Site name shown on English pages.
    pub name_en: String,
    /// Site name shown on French pages.
    pub name_fr: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Required environment variables are not set.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`cms.password`").
        field: String,
        /// Error message (e.g., "${`WORDPRESS_PASSWORD`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `wpp.toml` in the current directory and parents, and falls back to
    /// the process environment when none is found.
    ///
    /// CLI settings are applied last so that arguments take precedence.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// required environment variables are missing, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::from_env()?
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Build configuration from the process environment.
    ///
    /// Empty variables count as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
    }

    /// Build configuration from a variable lookup function.
    ///
    /// All missing required variables are reported together, sorted by name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = [
            ENV_PORT,
            ENV_SITE_NAME_EN,
            ENV_SITE_NAME_FR,
            ENV_BASE_URL,
            ENV_USERNAME,
            ENV_PASSWORD,
            ENV_MENU_ID_EN,
            ENV_MENU_ID_FR,
        ];
        let mut missing: Vec<String> = required
            .iter()
            .filter(|name| lookup(name).is_none())
            .map(|name| (*name).to_owned())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(ConfigError::MissingEnv(missing));
        }

        let var = |name: &str| lookup(name).unwrap_or_default();
        let port = var(ENV_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::Validation(format!("{ENV_PORT} is not a valid port: {e}")))?;

        let config = Self {
            server: ServerConfig {
                // Containers expose the port on every interface.
                host: "0.0.0.0".to_owned(),
                port,
                static_dir: lookup(ENV_STATIC_DIR).map_or_else(|| PathBuf::from("static"), PathBuf::from),
                template_dir: lookup(ENV_TEMPLATE_DIR).map(PathBuf::from),
            },
            cms: CmsConfig {
                base_url: var(ENV_BASE_URL).trim_end_matches('/').to_owned(),
                username: var(ENV_USERNAME),
                password: var(ENV_PASSWORD),
                menu_id_en: var(ENV_MENU_ID_EN),
                menu_id_fr: var(ENV_MENU_ID_FR),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            site: SiteConfig {
                name_en: var(ENV_SITE_NAME_EN),
                name_fr: var(ENV_SITE_NAME_FR),
            },
            config_path: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(static_dir) = &settings.static_dir {
            self.server.static_dir.clone_from(static_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file or environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_cms()?;
        require_non_empty(&self.site.name_en, "site.name_en")?;
        require_non_empty(&self.site.name_fr, "site.name_fr")?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate CMS configuration.
    fn validate_cms(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.cms.base_url, "cms.base_url")?;
        require_http_url(&self.cms.base_url, "cms.base_url")?;
        require_non_empty(&self.cms.username, "cms.username")?;
        require_non_empty(&self.cms.password, "cms.password")?;
        require_non_empty(&self.cms.menu_id_en, "cms.menu_id_en")?;
        require_non_empty(&self.cms.menu_id_fr, "cms.menu_id_fr")?;

        if self.cms.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "cms.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        let cms = &mut self.cms;
        cms.base_url = expand::expand_env(&cms.base_url, "cms.base_url")?
            .trim_end_matches('/')
            .to_owned();
        cms.username = expand::expand_env(&cms.username, "cms.username")?;
        cms.password = expand::expand_env(&cms.password, "cms.password")?;
        cms.menu_id_en = expand::expand_env(&cms.menu_id_en, "cms.menu_id_en")?;
        cms.menu_id_fr = expand::expand_env(&cms.menu_id_fr, "cms.menu_id_fr")?;

        self.site.name_en = expand::expand_env(&self.site.name_en, "site.name_en")?;
        self.site.name_fr = expand::expand_env(&self.site.name_fr, "site.name_fr")?;

        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.server.static_dir = config_dir.join(&self.server.static_dir);
        self.server.template_dir = self.server.template_dir.as_ref().map(|d| config_dir.join(d));
    }
}
