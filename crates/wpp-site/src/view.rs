//! Render-ready page data.
//!
//! [`PageView::assemble`] combines a fetched CMS page with the menu of its
//! language and the site metadata. The layout template only ever sees a
//! `PageView`.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use wpp_cms::{Lang, MenuTree, Menus, Page};

/// Marker that disables the breadcrumb on home pages.
const HOME_MARKER: &str = "home";

/// Localized site names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteNames {
    /// English site name.
    pub en: String,
    /// French site name.
    pub fr: String,
}

impl SiteNames {
    /// Create site names for both languages.
    pub fn new(en: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            fr: fr.into(),
        }
    }

    /// Site name in `lang`.
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::Fr => &self.fr,
        }
    }
}

/// Everything the layout needs to render one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Resolved page language.
    pub lang: Lang,
    /// Home path of the other language.
    pub lang_swap_path: String,
    /// Slug of this page in the other language.
    pub lang_swap_slug: String,
    /// Home path of this language.
    pub home: String,
    /// Date part of the modification timestamp.
    pub modified: String,
    /// Page title (trusted HTML).
    pub title: String,
    /// Page body with CMS origin links made site-relative (trusted HTML).
    pub content: String,
    /// Page summary as returned by the CMS (trusted HTML).
    pub excerpt: String,
    /// Whether to show the breadcrumb.
    pub show_breadcrumb: bool,
    /// Site name in the page language.
    pub site_name: String,
    /// Navigation menu of the page language.
    pub menu: Arc<MenuTree>,
    /// Requested site path.
    pub path: String,
    /// CMS page ID.
    pub page_id: u64,
}

impl PageView {
    /// Build the view for `page`, requested at `path`.
    ///
    /// Pages in an unsupported language are shown as English. Every
    /// occurrence of `base_origin` is removed from the body so embedded links
    /// point at the proxy; the excerpt is left as is.
    pub fn assemble(
        page: Page,
        menus: &Menus,
        site_names: &SiteNames,
        base_origin: &str,
        path: &str,
    ) -> Self {
        let lang = Lang::from_code(&page.lang).unwrap_or_else(|| {
            warn!(lang = %page.lang, slug = %page.slug, "Unsupported page language, using en");
            Lang::En
        });

        let lang_swap_slug = match lang {
            Lang::En => page.slug_fr,
            Lang::Fr => page.slug_en,
        };

        let modified = page
            .modified
            .split('T')
            .next()
            .unwrap_or_default()
            .to_owned();

        let content = if base_origin.is_empty() {
            page.content.rendered
        } else {
            page.content.rendered.replace(base_origin, "")
        };

        Self {
            lang,
            lang_swap_path: lang.other().root_path().to_owned(),
            lang_swap_slug,
            home: lang.root_path().to_owned(),
            modified,
            title: page.title.rendered,
            content,
            excerpt: page.excerpt.rendered,
            show_breadcrumb: !page.slug.contains(HOME_MARKER),
            site_name: site_names.get(lang).to_owned(),
            menu: menus.for_lang(lang),
            path: path.to_owned(),
            page_id: page.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wpp_cms::{MenuItem, Rendered};

    use super::*;

    const BASE: &str = "https://example.com";

    fn page(slug: &str, lang: &str) -> Page {
        Page {
            id: 7,
            slug: slug.to_owned(),
            slug_en: "about-us".to_owned(),
            slug_fr: "a-propos".to_owned(),
            lang: lang.to_owned(),
            modified: "2023-05-15T10:30:45".to_owned(),
            title: Rendered::new("About Us"),
            content: Rendered::new("<p>See https://example.com/x</p>"),
            excerpt: Rendered::new("<p>More at https://example.com/y</p>"),
        }
    }

    fn menus() -> Menus {
        let item = |id, url: &str| MenuItem {
            id,
            parent: 0,
            title: Rendered::new(url),
            url: format!("{BASE}{url}"),
        };
        Menus::new([
            (Lang::En, MenuTree::build(&[item(1, "/about-us")], BASE)),
            (Lang::Fr, MenuTree::build(&[item(2, "/fr/a-propos")], BASE)),
        ])
    }

    fn names() -> SiteNames {
        SiteNames::new("My Site", "Mon site")
    }

    fn assemble(page: Page) -> PageView {
        PageView::assemble(page, &menus(), &names(), BASE, "/about-us")
    }

    #[test]
    fn test_assemble_english_page() {
        let view = assemble(page("about-us", "en"));

        let expected = PageView {
            lang: Lang::En,
            lang_swap_path: "/fr/".to_owned(),
            lang_swap_slug: "a-propos".to_owned(),
            home: "/".to_owned(),
            modified: "2023-05-15".to_owned(),
            title: "About Us".to_owned(),
            content: "<p>See /x</p>".to_owned(),
            excerpt: "<p>More at https://example.com/y</p>".to_owned(),
            show_breadcrumb: true,
            site_name: "My Site".to_owned(),
            menu: menus().for_lang(Lang::En),
            path: "/about-us".to_owned(),
            page_id: 7,
        };
        assert_eq!(view, expected);
    }

    #[test]
    fn test_assemble_french_page() {
        let view = assemble(page("a-propos", "fr"));

        assert_eq!(view.lang, Lang::Fr);
        assert_eq!(view.lang_swap_path, "/");
        assert_eq!(view.lang_swap_slug, "about-us");
        assert_eq!(view.home, "/fr/");
        assert_eq!(view.site_name, "Mon site");
        assert_eq!(view.menu.roots()[0].url, "/fr/a-propos");
    }

    #[test]
    fn test_assemble_unsupported_lang_is_english() {
        let view = assemble(page("about-us", "de"));

        assert_eq!(view.lang, Lang::En);
        assert_eq!(view.lang_swap_path, "/fr/");
        assert_eq!(view.home, "/");
        assert_eq!(view.site_name, "My Site");
        assert_eq!(view.menu.roots()[0].url, "/about-us");
    }

    #[test]
    fn test_assemble_breadcrumb_hidden_on_home_pages() {
        assert!(!assemble(page("home", "en")).show_breadcrumb);
        assert!(!assemble(page("home-fr", "fr")).show_breadcrumb);
        assert!(assemble(page("about-us", "en")).show_breadcrumb);
    }

    #[test]
    fn test_assemble_strips_every_origin_occurrence() {
        let mut page = page("about-us", "en");
        page.content = Rendered::new(
            r#"<a href="https://example.com/a">A</a> <img src="https://example.com/b.png">"#,
        );

        let view = assemble(page);

        assert_eq!(view.content, r#"<a href="/a">A</a> <img src="/b.png">"#);
    }

    #[test]
    fn test_assemble_modified_keeps_date_variants() {
        for (modified, expected) in [
            ("2023-05-15T10:30:45", "2023-05-15"),
            ("2023-05-15T10:30:45.123+02:00", "2023-05-15"),
            ("2023-05-15", "2023-05-15"),
            ("", ""),
        ] {
            let mut page = page("about-us", "en");
            page.modified = modified.to_owned();

            assert_eq!(assemble(page).modified, expected, "modified: {modified}");
        }
    }

    #[test]
    fn test_assemble_missing_french_menu_falls_back() {
        let en_only = Menus::new([(Lang::En, MenuTree::default())]);

        let view = PageView::assemble(page("a-propos", "fr"), &en_only, &names(), BASE, "/fr/a-propos");

        assert_eq!(view.lang, Lang::Fr);
        assert!(view.menu.is_empty());
    }
}
