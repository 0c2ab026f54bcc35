//! Template rendering with Tera

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Components first so pages can include them
        tera.add_raw_template(
            "components/paper.html",
            include_str!("../templates/components/paper.html"),
        )?;
        tera.add_raw_template(
            "components/result.html",
            include_str!("../templates/components/result.html"),
        )?;
        tera.add_raw_template(
            "components/pagination.html",
            include_str!("../templates/components/pagination.html"),
        )?;

        tera.add_raw_template("base.html", include_str!("../templates/base.html"))?;
        tera.add_raw_template(
            "papers_partial.html",
            include_str!("../templates/papers_partial.html"),
        )?;
        tera.add_raw_template(
            "search_partial.html",
            include_str!("../templates/search_partial.html"),
        )?;
        tera.add_raw_template("index.html", include_str!("../templates/index.html"))?;

        Ok(Self { tera })
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}
