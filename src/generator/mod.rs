//! Generator module - renders loaded content into static HTML pages
//!
//! The generator is a pure consumer of the content loader's output: it
//! never reads content files itself beyond copying non-markdown assets.

use anyhow::Result;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{BlogPost, CaseStudy, OverviewDoc, TeamMember};
use crate::helpers;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Static site generator using the embedded atrium templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub fn generate(
        &self,
        team: &[TeamMember],
        studies: &[CaseStudy],
        posts: &[BlogPost],
        overview: &OverviewDoc,
    ) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_assets()?;
        self.generate_index(team, studies, posts)?;
        self.generate_team_pages(team)?;
        self.generate_work_pages(studies)?;
        self.generate_insight_pages(posts)?;
        self.generate_overview_page(overview)?;
        self.generate_sitemap(team, studies, posts)?;
        self.generate_search_index(posts)?;

        Ok(())
    }

    fn base_context(&self, page_title: &str) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.site.config);
        context.insert("page_title", page_title);
        context
    }

    /// Generate the home page
    fn generate_index(
        &self,
        team: &[TeamMember],
        studies: &[CaseStudy],
        posts: &[BlogPost],
    ) -> Result<()> {
        let config = &self.site.config;

        let featured_studies: Vec<_> = studies
            .iter()
            .filter(|s| s.featured)
            .take(config.featured_case_studies)
            .collect();
        let featured_team: Vec<_> = team
            .iter()
            .filter(|m| m.featured)
            .take(config.featured_team)
            .collect();
        let recent_posts: Vec<_> = posts.iter().take(config.recent_posts).collect();

        let mut context = self.base_context("Home");
        context.insert("featured_studies", &featured_studies);
        context.insert("featured_team", &featured_team);
        context.insert("recent_posts", &recent_posts);

        let html = self.renderer.render("index.html", &context)?;
        self.write_page("index.html", &html)?;
        tracing::info!("Generated home page");

        Ok(())
    }

    /// Generate the team listing and one page per member
    fn generate_team_pages(&self, team: &[TeamMember]) -> Result<()> {
        let core_team: Vec<_> = team.iter().filter(|m| !m.is_advisor()).collect();
        let advisors: Vec<_> = team.iter().filter(|m| m.is_advisor()).collect();

        let mut context = self.base_context("Team");
        context.insert("core_team", &core_team);
        context.insert("advisors", &advisors);

        let html = self.renderer.render("team.html", &context)?;
        self.write_page("team/index.html", &html)?;

        for member in team {
            let mut context = self.base_context(&member.name);
            context.insert("member", member);
            let html = self.renderer.render("team_member.html", &context)?;
            self.write_page(&format!("team/{}/index.html", member.slug), &html)?;
        }

        tracing::info!("Generated {} team pages", team.len() + 1);
        Ok(())
    }

    /// Generate the work listing and one page per case study
    fn generate_work_pages(&self, studies: &[CaseStudy]) -> Result<()> {
        let mut context = self.base_context("Work");
        context.insert("studies", studies);

        let html = self.renderer.render("work.html", &context)?;
        self.write_page("work/index.html", &html)?;

        for study in studies {
            let mut context = self.base_context(&study.title);
            context.insert("study", study);
            let html = self.renderer.render("case_study.html", &context)?;
            self.write_page(&format!("work/{}/index.html", study.slug), &html)?;
        }

        tracing::info!("Generated {} work pages", studies.len() + 1);
        Ok(())
    }

    /// Generate the insights listing and one page per post
    fn generate_insight_pages(&self, posts: &[BlogPost]) -> Result<()> {
        let mut context = self.base_context("Insights");
        context.insert("posts", posts);

        let html = self.renderer.render("insights.html", &context)?;
        self.write_page("insights/index.html", &html)?;

        for post in posts {
            let mut context = self.base_context(&post.title);
            context.insert("post", post);
            let html = self.renderer.render("post.html", &context)?;
            self.write_page(&format!("insights/{}/index.html", post.slug), &html)?;
        }

        tracing::info!("Generated {} insight pages", posts.len() + 1);
        Ok(())
    }

    /// Generate the company overview page
    fn generate_overview_page(&self, overview: &OverviewDoc) -> Result<()> {
        let title = overview.title.as_deref().unwrap_or("Company Overview");

        let mut context = self.base_context(title);
        context.insert("overview", overview);

        let html = self.renderer.render("overview.html", &context)?;
        self.write_page("overview/index.html", &html)?;
        tracing::info!("Generated overview page");

        Ok(())
    }

    /// Generate sitemap.xml over the static sections and every slug route
    fn generate_sitemap(
        &self,
        team: &[TeamMember],
        studies: &[CaseStudy],
        posts: &[BlogPost],
    ) -> Result<()> {
        let config = &self.site.config;

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        let static_routes: &[(&str, &str, &str)] = &[
            ("", "weekly", "1.0"),
            ("work/", "weekly", "0.9"),
            ("insights/", "weekly", "0.9"),
            ("team/", "weekly", "0.8"),
            ("overview/", "monthly", "0.7"),
        ];
        for (route, freq, priority) in static_routes {
            let loc = helpers::full_url_for(config, route);
            xml.push_str(&url_entry(&loc, None, freq, priority));
        }

        for member in team {
            let path = format!("/team/{}/", helpers::encode_segment(&member.slug));
            let loc = helpers::full_url_for(config, &path);
            xml.push_str(&url_entry(&loc, None, "monthly", "0.6"));
        }

        for study in studies {
            let path = format!("/work/{}/", helpers::encode_segment(&study.slug));
            let loc = helpers::full_url_for(config, &path);
            let lastmod = helpers::iso_date(&study.published_at);
            xml.push_str(&url_entry(&loc, Some(&lastmod), "monthly", "0.7"));
        }

        for post in posts {
            let path = format!("/insights/{}/", helpers::encode_segment(&post.slug));
            let loc = helpers::full_url_for(config, &path);
            let lastmod = helpers::iso_date(&post.published_at);
            xml.push_str(&url_entry(&loc, Some(&lastmod), "monthly", "0.7"));
        }

        xml.push_str("</urlset>\n");

        fs::write(self.site.public_dir.join("sitemap.xml"), xml)?;
        tracing::info!("Generated sitemap.xml");

        Ok(())
    }

    /// Generate a search index (JSON) over the insights section
    fn generate_search_index(&self, posts: &[BlogPost]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "title": p.title,
                    "url": format!("{}insights/{}/", self.site.config.root, p.slug),
                    "content": helpers::strip_html(&p.content),
                    "date": helpers::iso_date(&p.published_at),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&search_data)?;
        fs::write(self.site.public_dir.join("search.json"), json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Copy non-markdown files (images, downloads) from the content
    /// directory into the public directory
    fn copy_assets(&self) -> Result<()> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        let overview_path = content_dir.join(&self.site.config.overview_file);

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }
            if path == overview_path {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let dest = self.site.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }

    fn write_page(&self, relative: &str, html: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        Ok(())
    }
}

fn url_entry(loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) -> String {
    let mut entry = String::from("  <url>\n");
    entry.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    if let Some(lastmod) = lastmod {
        entry.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    entry.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    entry.push_str(&format!("    <priority>{}</priority>\n", priority));
    entry.push_str("  </url>\n");
    entry
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
