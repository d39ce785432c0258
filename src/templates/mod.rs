//! Built-in atrium theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; a site checkout needs
//! nothing beyond its content directory and _config.yml.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Template renderer with the embedded atrium theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all atrium templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The loader already produced HTML bodies; nothing here is
        // user-supplied, so autoescaping is off like any other SSG theme.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("atrium/layout.html")),
            ("index.html", include_str!("atrium/index.html")),
            ("team.html", include_str!("atrium/team.html")),
            (
                "team_member.html",
                include_str!("atrium/team_member.html"),
            ),
            ("work.html", include_str!("atrium/work.html")),
            ("case_study.html", include_str!("atrium/case_study.html")),
            ("insights.html", include_str!("atrium/insights.html")),
            ("post.html", include_str!("atrium/post.html")),
            ("overview.html", include_str!("atrium/overview.html")),
            (
                "partials/head.html",
                include_str!("atrium/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("atrium/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("atrium/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    Ok(tera::Value::String(helpers::truncate(&s, length)))
}

/// Tera filter: format an ISO date string for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);

    let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") else {
        // Leave unparseable values as-is rather than failing the render
        return Ok(tera::Value::String(s));
    };

    let formatted = match args.get("format") {
        Some(val) => {
            let format = tera::try_get_value!("date_format", "format", String, val);
            date.format(&format).to_string()
        }
        None => helpers::full_date(&date),
    };

    Ok(tera::Value::String(formatted))
}
