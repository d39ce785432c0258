//! Scaffold a new content file

use anyhow::Result;
use std::fs;

use crate::helpers;
use crate::Site;

/// Create a new content file with a front-matter skeleton
pub fn run(site: &Site, kind: &str, title: &str) -> Result<()> {
    let slug = helpers::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let config = &site.config;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let (dir, content) = match kind {
        "team" => (
            site.content_dir.join(&config.team_dir),
            format!(
                "---\nname: {title}\nrole: \nbio: \ntags: []\norder: 99\nfeatured: false\n---\n"
            ),
        ),
        "work" | "case-study" => (
            site.content_dir.join(&config.case_studies_dir),
            format!(
                "---\ntitle: {title}\nclient: \ndescription: \nchallenge: \noutcome: \ntags: []\nfeatured: false\npublishedAt: \"{today}\"\n---\n"
            ),
        ),
        "insights" | "post" => (
            site.content_dir.join(&config.blog_dir),
            format!(
                "---\ntitle: {title}\nexcerpt: \nauthor: {author}\npublishedAt: \"{today}\"\ntags: []\nfeatured: false\n---\n",
                author = config.author
            ),
        ),
        _ => {
            anyhow::bail!("Unknown kind: {}. Available: team, work, insights", kind);
        }
    };

    fs::create_dir_all(&dir)?;

    let file_path = dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_post_scaffold() {
        let tmp = TempDir::new().unwrap();
        let site = crate::Site::new(tmp.path()).unwrap();

        run(&site, "insights", "Why Estimates Drift").unwrap();

        let path = site.content_dir.join("blog/why-estimates-drift.md");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\n"));
        assert!(content.contains("title: Why Estimates Drift"));

        // A second scaffold with the same title must not overwrite
        assert!(run(&site, "insights", "Why Estimates Drift").is_err());
    }

    #[test]
    fn test_new_rejects_unknown_kind() {
        let tmp = TempDir::new().unwrap();
        let site = crate::Site::new(tmp.path()).unwrap();
        assert!(run(&site, "podcast", "Episode 1").is_err());
    }
}
