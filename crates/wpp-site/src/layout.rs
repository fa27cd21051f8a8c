//! HTML page layout.
//!
//! A single `layout.html` minijinja template renders every page. The
//! built-in layout can be replaced by one from a template directory.

use std::path::Path;

use minijinja::Environment;

use crate::error::RenderError;
use crate::view::PageView;

/// Template name of the page layout.
pub const LAYOUT_NAME: &str = "layout.html";

/// Built-in layout source.
const BUILTIN_LAYOUT: &str = include_str!("../templates/layout.html");

/// Compiled page layout.
pub struct Layout {
    env: Environment<'static>,
}

impl Layout {
    /// Layout shipped with wpp.
    pub fn builtin() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(LAYOUT_NAME, BUILTIN_LAYOUT)?;
        Ok(Self { env })
    }

    /// Load `layout.html` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let path = dir.join(LAYOUT_NAME);
        let source = std::fs::read_to_string(&path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;

        let mut env = Environment::new();
        env.add_template_owned(LAYOUT_NAME, source)?;
        Ok(Self { env })
    }

    /// Load from `dir` when given, otherwise use the built-in layout.
    pub fn load(dir: Option<&Path>) -> Result<Self, RenderError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// Render a page to HTML.
    pub fn render(&self, view: &PageView) -> Result<String, RenderError> {
        let template = self.env.get_template(LAYOUT_NAME)?;
        Ok(template.render(view)?)
    }
}
