//! Page views and HTML rendering for wpp.
//!
//! [`Site`] is the single entry point used by the server: it turns a URL
//! path into a [`PageView`] by fetching the page from the CMS and pairing
//! it with the cached menu. [`Layout`] renders a view to HTML.

mod error;
mod layout;
mod site;
mod view;

pub use error::RenderError;
pub use layout::{LAYOUT_NAME, Layout};
pub use site::Site;
pub use view::{PageView, SiteNames};
