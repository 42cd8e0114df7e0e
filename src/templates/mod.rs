//! Built-in theme templates using the Tera template engine
//!
//! The spacetraveling theme is embedded directly in the binary; nothing is
//! read from disk at render time.

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer with the embedded theme loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping stays on: every CMS-provided value rendered into
        // HTML goes through it
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("spacetraveling/layout.html")),
            ("index.html", include_str!("spacetraveling/index.html")),
            ("post.html", include_str!("spacetraveling/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}
