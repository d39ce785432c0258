//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub email: String,
    #[serde(default)]
    pub social: SocialConfig,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub team_dir: String,
    pub case_studies_dir: String,
    pub blog_dir: String,
    /// Overview document path, relative to the content directory
    pub overview_file: String,

    // Listings
    pub recent_posts: usize,
    pub featured_case_studies: usize,
    pub featured_team: usize,

    // Date format used by templates
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Atelier North".to_string(),
            description: "A consulting studio".to_string(),
            author: String::new(),
            email: String::new(),
            social: SocialConfig::default(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            team_dir: "team".to_string(),
            case_studies_dir: "case-studies".to_string(),
            blog_dir: "blog".to_string(),
            overview_file: "company-overview.txt".to_string(),

            recent_posts: 3,
            featured_case_studies: 3,
            featured_team: 4,

            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Social profile links shown in the footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
}
