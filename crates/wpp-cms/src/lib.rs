//! WordPress CMS access for wpp.
//!
//! This crate maps site paths to CMS pages and builds the navigation menus:
//! - [`resolve_path`] turns a URL path into a slug and [`Lang`]
//! - [`CmsClient`] fetches pages and menus over the `wp/v2` REST API
//! - [`MenuTree`] rebuilds the menu hierarchy from the flat item list
//!
//! # Example
//!
//! ```ignore
//! use wpp_cms::{CmsClient, CmsSettings, Lang};
//!
//! let settings = CmsSettings::new("https://cms.example.com", "user", "pass", "2", "3");
//! let client = CmsClient::connect(&settings)?;
//! let page = client.fetch_page("/fr/a-propos")?;
//! let menu = client.menus().for_lang(Lang::Fr);
//! ```

mod client;
mod error;
mod lang;
mod menu;
mod types;

pub use client::{CmsClient, CmsSettings, DEFAULT_TIMEOUT};
pub use error::CmsError;
pub use lang::{HOME_SLUG_EN, HOME_SLUG_FR, Lang, PageQuery, resolve_path};
pub use menu::{MenuNode, MenuTree, Menus};
pub use types::{MenuItem, Page, Rendered};
