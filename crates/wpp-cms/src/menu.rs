//! Navigation menu trees.
//!
//! The CMS returns menus as a flat list where each item names its parent.
//! [`MenuTree::build`] turns that list into an ordered forest.
//!
//! # Architecture
//!
//! Building works on a flat arena of items with children tracked by index:
//! - pass 1 records the first arena index of every item id
//! - pass 2 attaches each item to its parent's child list or to the roots
//!
//! Two passes make the result independent of whether children appear
//! before or after their parents in the input. The owned tree is
//! materialized from the arena at the end. Materializing and dropping walk
//! with explicit stacks, so menu depth is not limited by the thread stack.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::lang::Lang;
use crate::types::MenuItem;

/// Parent id of top-level menu items.
const ROOT_PARENT: u64 = 0;

/// Menu entry with children for the UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    /// Menu item ID.
    pub id: u64,
    /// Display title (HTML as rendered by the CMS).
    pub title: String,
    /// Site-relative link target.
    pub url: String,
    /// Child entries in input order.
    pub children: Vec<MenuNode>,
}

/// Ordered menu forest for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuTree {
    roots: Vec<MenuNode>,
}

impl MenuTree {
    /// Build a menu forest from flat CMS items.
    ///
    /// `base_origin` is removed once from the start of each item URL so links
    /// stay on the proxy. Items whose non-zero parent is not among the item
    /// ids are dropped. When an id repeats, children attach to its first
    /// occurrence.
    pub fn build(items: &[MenuItem], base_origin: &str) -> Self {
        let mut index: HashMap<u64, usize> = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            index.entry(item.id).or_insert(idx);
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
        let mut roots = Vec::new();
        for (idx, item) in items.iter().enumerate() {
            if item.parent == ROOT_PARENT {
                roots.push(idx);
            } else if let Some(&parent) = index.get(&item.parent) {
                children[parent].push(idx);
            } else {
                debug!(id = item.id, parent = item.parent, "Dropping menu item with unknown parent");
            }
        }

        let arena = Arena {
            items,
            children: &children,
            base_origin,
        };
        let mut visiting = vec![false; items.len()];
        let roots = roots
            .into_iter()
            .filter_map(|idx| arena.materialize(idx, &mut visiting))
            .collect();

        Self { roots }
    }

    /// Top-level entries in input order.
    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Whether the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl Drop for MenuTree {
    // Flatten before dropping so deep menus do not recurse per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.roots);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Flat item storage with children tracked by index.
struct Arena<'a> {
    items: &'a [MenuItem],
    children: &'a [Vec<usize>],
    base_origin: &'a str,
}

impl Arena<'_> {
    /// Build the owned subtree rooted at `root`.
    ///
    /// Walks depth-first with an explicit stack, so nesting depth is bounded
    /// by the heap rather than the thread stack. `visiting` marks the current
    /// path; an item that is its own ancestor is cut off.
    fn materialize(&self, root: usize, visiting: &mut [bool]) -> Option<MenuNode> {
        if visiting[root] {
            return None;
        }
        visiting[root] = true;
        let mut stack = vec![Frame::new(root)];

        loop {
            let frame = stack.last_mut()?;
            if let Some(&child) = self.children[frame.idx].get(frame.next) {
                frame.next += 1;
                if !visiting[child] {
                    visiting[child] = true;
                    stack.push(Frame::new(child));
                }
                continue;
            }

            let frame = stack.pop()?;
            visiting[frame.idx] = false;
            let node = self.node(frame.idx, frame.children);
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => return Some(node),
            }
        }
    }

    fn node(&self, idx: usize, children: Vec<MenuNode>) -> MenuNode {
        let item = &self.items[idx];
        MenuNode {
            id: item.id,
            title: item.title.rendered.clone(),
            url: site_relative(&item.url, self.base_origin).to_owned(),
            children,
        }
    }
}

/// Item being materialized: next child to visit and children built so far.
struct Frame {
    idx: usize,
    next: usize,
    children: Vec<MenuNode>,
}

impl Frame {
    fn new(idx: usize) -> Self {
        Self {
            idx,
            next: 0,
            children: Vec::new(),
        }
    }
}

/// Remove one leading occurrence of `base_origin` from `url`.
fn site_relative<'a>(url: &'a str, base_origin: &str) -> &'a str {
    if base_origin.is_empty() {
        return url;
    }
    url.strip_prefix(base_origin).unwrap_or(url)
}

/// Immutable per-language menu snapshot.
///
/// Built once when the client connects and shared read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Menus {
    trees: HashMap<Lang, Arc<MenuTree>>,
}

impl Menus {
    /// Create a snapshot from per-language trees.
    pub fn new(trees: impl IntoIterator<Item = (Lang, MenuTree)>) -> Self {
        Self {
            trees: trees
                .into_iter()
                .map(|(lang, tree)| (lang, Arc::new(tree)))
                .collect(),
        }
    }

    /// Menu for `lang`, if loaded.
    pub fn get(&self, lang: Lang) -> Option<Arc<MenuTree>> {
        self.trees.get(&lang).map(Arc::clone)
    }

    /// Menu for `lang`, falling back to English and then to an empty menu.
    pub fn for_lang(&self, lang: Lang) -> Arc<MenuTree> {
        if let Some(tree) = self.get(lang) {
            return tree;
        }
        warn!(lang = %lang, "No menu loaded for language, falling back to en");
        self.get(Lang::En).unwrap_or_default()
    }
}
