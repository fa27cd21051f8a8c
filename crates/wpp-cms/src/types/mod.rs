//! WordPress REST API types.

mod menu;
mod page;

pub use menu::MenuItem;
pub use page::{Page, Rendered};
