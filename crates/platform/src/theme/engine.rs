//! Tera template engine with the built-in admin templates.

use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

/// Templates compiled into the binary.
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    (
        "resource/list.html",
        include_str!("../../templates/resource/list.html"),
    ),
    (
        "resource/form.html",
        include_str!("../../templates/resource/form.html"),
    ),
    (
        "resource/view.html",
        include_str!("../../templates/resource/view.html"),
    ),
];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine with the built-in templates.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tera: builtin()?,
        })
    }

    /// Create a theme engine whose templates in `template_dir` override the built-in ones.
    pub fn with_overrides(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to load template overrides")?;
        tera.extend(&builtin()?)
            .context("failed to merge built-in templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    pub fn render(&self, template: &str, context: &tera::Context) -> tera::Result<String> {
        self.tera.render(template, context)
    }
}

fn builtin() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUILTIN_TEMPLATES)
        .context("failed to parse built-in templates")?;
    Ok(tera)
}
