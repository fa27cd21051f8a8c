//! WordPress menu item types.

use serde::{Deserialize, Serialize};

use super::Rendered;

/// Flat menu item as returned by `/wp/v2/menu-items`.
///
/// The hierarchy is encoded through `parent`; `0` marks a top-level item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuItem {
    /// Menu item ID.
    pub id: u64,
    /// ID of the parent item, `0` for roots.
    pub parent: u64,
    /// Item label.
    pub title: Rendered,
    /// Absolute link target.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_menu_item() {
        let json = r#"{"id": 7, "parent": 3, "title": {"rendered": "Team"}, "url": "https://cms.example.com/team", "menu_order": 2}"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, 7);
        assert_eq!(item.parent, 3);
        assert_eq!(item.title.rendered, "Team");
        assert_eq!(item.url, "https://cms.example.com/team");
    }

    #[test]
    fn test_missing_parent_is_root() {
        let item: MenuItem = serde_json::from_str(r#"{"id": 1}"#).unwrap();

        assert_eq!(item.parent, 0);
    }
}
