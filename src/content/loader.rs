//! Content loader - reads team members, case studies, and blog posts from
//! the content directory
//!
//! Every operation re-reads from disk; there is no cache and no shared
//! mutable state, so repeated calls over unchanged files return identical
//! results and concurrent callers cannot observe each other.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{
    frontmatter, BlogFrontmatter, BlogPost, CaseStudy, CaseStudyFrontmatter, ContentError,
    MarkdownRenderer, OverviewDoc, TeamFrontmatter, TeamMember,
};
use crate::Site;

/// Loads content from the content directory
pub struct ContentLoader {
    team_dir: PathBuf,
    case_studies_dir: PathBuf,
    blog_dir: PathBuf,
    overview_path: PathBuf,
    renderer: MarkdownRenderer,
}

/// A parsed content file before conversion into its kind's model
struct ParsedFile<F> {
    slug: String,
    frontmatter: F,
    body: String,
    content: String,
}

impl ContentLoader {
    /// Create a loader for a site's configured content layout
    pub fn new(site: &Site) -> Self {
        let config = &site.config;
        Self {
            team_dir: site.content_dir.join(&config.team_dir),
            case_studies_dir: site.content_dir.join(&config.case_studies_dir),
            blog_dir: site.content_dir.join(&config.blog_dir),
            overview_path: site.content_dir.join(&config.overview_file),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Create a loader rooted at an arbitrary content directory using the
    /// default layout. Tests point this at fixture directories.
    pub fn with_content_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            team_dir: root.join("team"),
            case_studies_dir: root.join("case-studies"),
            blog_dir: root.join("blog"),
            overview_path: root.join("company-overview.txt"),
            renderer: MarkdownRenderer::new(),
        }
    }

    // ----- team members -----

    /// All team members, ascending by their explicit order field
    pub fn load_team(&self) -> Result<Vec<TeamMember>, ContentError> {
        let mut members = Vec::new();
        let mut seen = HashSet::new();

        for path in self.markdown_files(&self.team_dir)? {
            match self.parse_file::<TeamFrontmatter>(&path) {
                Ok(parsed) => {
                    if !seen.insert(parsed.slug.clone()) {
                        tracing::warn!(
                            "{}",
                            ContentError::DuplicateSlug {
                                path,
                                slug: parsed.slug
                            }
                        );
                        continue;
                    }
                    members.push(TeamMember::from_parts(
                        parsed.slug,
                        parsed.frontmatter,
                        parsed.content,
                    ));
                }
                Err(e) if e.is_environment() => return Err(e),
                Err(e) => tracing::warn!("skipping team member: {}", e),
            }
        }

        members.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.slug.cmp(&b.slug)));
        Ok(members)
    }

    /// Featured team members, truncated after filtering
    pub fn featured_team(&self, limit: Option<usize>) -> Result<Vec<TeamMember>, ContentError> {
        let mut featured: Vec<_> = self
            .load_team()?
            .into_iter()
            .filter(|m| m.featured)
            .collect();
        if let Some(limit) = limit {
            featured.truncate(limit);
        }
        Ok(featured)
    }

    /// Look up a single team member by slug
    pub fn team_member(&self, slug: &str) -> Result<Option<TeamMember>, ContentError> {
        let Some(path) = find_by_slug(&self.team_dir, slug) else {
            return Ok(None);
        };
        match self.parse_file::<TeamFrontmatter>(&path) {
            Ok(parsed) => Ok(Some(TeamMember::from_parts(
                parsed.slug,
                parsed.frontmatter,
                parsed.content,
            ))),
            Err(e) if e.is_environment() => Err(e),
            Err(e) => {
                tracing::warn!("treating unreadable team member as absent: {}", e);
                Ok(None)
            }
        }
    }

    /// Team member slugs, from file names only
    pub fn team_slugs(&self) -> Result<Vec<String>, ContentError> {
        self.slugs_in(&self.team_dir)
    }

    // ----- case studies -----

    /// All case studies, newest first
    pub fn load_case_studies(&self) -> Result<Vec<CaseStudy>, ContentError> {
        let mut studies = Vec::new();
        let mut seen = HashSet::new();

        for path in self.markdown_files(&self.case_studies_dir)? {
            match self.parse_case_study(&path) {
                Ok(study) => {
                    if !seen.insert(study.slug.clone()) {
                        tracing::warn!(
                            "{}",
                            ContentError::DuplicateSlug {
                                path,
                                slug: study.slug
                            }
                        );
                        continue;
                    }
                    studies.push(study);
                }
                Err(e) if e.is_environment() => return Err(e),
                Err(e) => tracing::warn!("skipping case study: {}", e),
            }
        }

        studies.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(studies)
    }

    /// Featured case studies, truncated after filtering
    pub fn featured_case_studies(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<CaseStudy>, ContentError> {
        let mut featured: Vec<_> = self
            .load_case_studies()?
            .into_iter()
            .filter(|s| s.featured)
            .collect();
        if let Some(limit) = limit {
            featured.truncate(limit);
        }
        Ok(featured)
    }

    /// Look up a single case study by slug
    pub fn case_study(&self, slug: &str) -> Result<Option<CaseStudy>, ContentError> {
        let Some(path) = find_by_slug(&self.case_studies_dir, slug) else {
            return Ok(None);
        };
        match self.parse_case_study(&path) {
            Ok(study) => Ok(Some(study)),
            Err(e) if e.is_environment() => Err(e),
            Err(e) => {
                tracing::warn!("treating unreadable case study as absent: {}", e);
                Ok(None)
            }
        }
    }

    /// Case study slugs, from file names only
    pub fn case_study_slugs(&self) -> Result<Vec<String>, ContentError> {
        self.slugs_in(&self.case_studies_dir)
    }

    fn parse_case_study(&self, path: &Path) -> Result<CaseStudy, ContentError> {
        let parsed = self.parse_file::<CaseStudyFrontmatter>(path)?;
        let published_at = parse_published_at(path, &parsed.frontmatter.published_at)?;
        Ok(CaseStudy::from_parts(
            parsed.slug,
            parsed.frontmatter,
            published_at,
            parsed.content,
        ))
    }

    // ----- blog posts -----

    /// All blog posts, newest first
    pub fn load_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = Vec::new();
        let mut seen = HashSet::new();

        for path in self.markdown_files(&self.blog_dir)? {
            match self.parse_post(&path) {
                Ok(post) => {
                    if !seen.insert(post.slug.clone()) {
                        tracing::warn!(
                            "{}",
                            ContentError::DuplicateSlug {
                                path,
                                slug: post.slug
                            }
                        );
                        continue;
                    }
                    posts.push(post);
                }
                Err(e) if e.is_environment() => return Err(e),
                Err(e) => tracing::warn!("skipping post: {}", e),
            }
        }

        posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(posts)
    }

    /// The most recent posts for the home page
    pub fn recent_posts(&self, limit: usize) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = self.load_posts()?;
        posts.truncate(limit);
        Ok(posts)
    }

    /// Featured posts, truncated after filtering
    pub fn featured_posts(&self, limit: Option<usize>) -> Result<Vec<BlogPost>, ContentError> {
        let mut featured: Vec<_> = self
            .load_posts()?
            .into_iter()
            .filter(|p| p.featured)
            .collect();
        if let Some(limit) = limit {
            featured.truncate(limit);
        }
        Ok(featured)
    }

    /// Look up a single post by slug
    pub fn post(&self, slug: &str) -> Result<Option<BlogPost>, ContentError> {
        let Some(path) = find_by_slug(&self.blog_dir, slug) else {
            return Ok(None);
        };
        match self.parse_post(&path) {
            Ok(post) => Ok(Some(post)),
            Err(e) if e.is_environment() => Err(e),
            Err(e) => {
                tracing::warn!("treating unreadable post as absent: {}", e);
                Ok(None)
            }
        }
    }

    /// Post slugs, from file names only
    pub fn post_slugs(&self) -> Result<Vec<String>, ContentError> {
        self.slugs_in(&self.blog_dir)
    }

    fn parse_post(&self, path: &Path) -> Result<BlogPost, ContentError> {
        let parsed = self.parse_file::<BlogFrontmatter>(path)?;
        let published_at = parse_published_at(path, &parsed.frontmatter.published_at)?;
        Ok(BlogPost::from_parts(
            parsed.slug,
            parsed.frontmatter,
            published_at,
            &parsed.body,
            parsed.content,
        ))
    }

    // ----- company overview -----

    /// Load the company overview document.
    ///
    /// An absent file yields a blank document, not an error.
    pub fn load_overview(&self) -> Result<OverviewDoc, ContentError> {
        let raw = match fs::read_to_string(&self.overview_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(OverviewDoc::default())
            }
            Err(source) => {
                return Err(ContentError::Io {
                    path: self.overview_path.clone(),
                    source,
                })
            }
        };
        Ok(OverviewDoc::from_raw(raw, &self.renderer))
    }

    // ----- shared plumbing -----

    /// Markdown files in a directory, sorted by file name so repeated loads
    /// are stable regardless of readdir order. A missing directory is an
    /// empty content set.
    fn markdown_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).map_err(|source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Slugs derived from file names only; no frontmatter parse, no render
    fn slugs_in(&self, dir: &Path) -> Result<Vec<String>, ContentError> {
        let mut slugs: Vec<String> = self
            .markdown_files(dir)?
            .iter()
            .filter_map(|p| file_stem(p))
            .collect();
        slugs.dedup();
        Ok(slugs)
    }

    fn parse_file<F: DeserializeOwned>(&self, path: &Path) -> Result<ParsedFile<F>, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (yaml, body) =
            frontmatter::split(&raw).ok_or_else(|| ContentError::MissingFrontmatter {
                path: path.to_path_buf(),
            })?;

        let fm: F = serde_yaml::from_str(yaml).map_err(|source| ContentError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

        let slug = file_stem(path).unwrap_or_default();
        let content = self.renderer.render(body);

        Ok(ParsedFile {
            slug,
            frontmatter: fm,
            body: body.to_string(),
            content,
        })
    }
}

fn parse_published_at(path: &Path, value: &str) -> Result<NaiveDate, ContentError> {
    frontmatter::parse_date(value).ok_or_else(|| ContentError::InvalidDate {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

/// Resolve a slug to its content file, if one exists
fn find_by_slug(dir: &Path, slug: &str) -> Option<PathBuf> {
    // Slugs are plain file stems; anything path-like is not a slug
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
        return None;
    }

    for ext in ["md", "markdown"] {
        let candidate = dir.join(format!("{}.{}", slug, ext));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn team_file(name: &str, order: i64, featured: bool) -> String {
        format!(
            "---\nname: {name}\nrole: Consultant\nbio: Bio for {name}.\norder: {order}\nfeatured: {featured}\ntags:\n  - Strategy\n---\n\nLonger bio for {name}.\n"
        )
    }

    fn case_study_file(title: &str, published_at: &str, featured: bool) -> String {
        format!(
            "---\ntitle: {title}\nclient: Client\ndescription: Desc.\nchallenge: Challenge.\noutcome: Outcome.\npublishedAt: \"{published_at}\"\nfeatured: {featured}\n---\n\nProject narrative.\n"
        )
    }

    fn post_file(title: &str, published_at: &str, featured: bool) -> String {
        format!(
            "---\ntitle: {title}\nexcerpt: Excerpt.\nauthor: Maya\npublishedAt: \"{published_at}\"\nfeatured: {featured}\n---\n\nArticle body with **markdown**.\n"
        )
    }

    #[test]
    fn test_missing_directories_are_empty_content_sets() {
        let tmp = TempDir::new().unwrap();
        let loader = ContentLoader::with_content_root(tmp.path());

        assert!(loader.load_team().unwrap().is_empty());
        assert!(loader.load_case_studies().unwrap().is_empty());
        assert!(loader.load_posts().unwrap().is_empty());
        assert!(loader.team_slugs().unwrap().is_empty());

        let doc = loader.load_overview().unwrap();
        assert!(doc.raw.is_empty());
        assert!(doc.toc.is_empty());
        assert_eq!(doc.title, None);
    }

    #[test]
    fn test_team_sorted_ascending_by_order() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/cara.md", &team_file("Cara", 3, false));
        write_file(tmp.path(), "team/ansel.md", &team_file("Ansel", 1, false));
        write_file(tmp.path(), "team/bea.md", &team_file("Bea", 2, false));

        let loader = ContentLoader::with_content_root(tmp.path());
        let members = loader.load_team().unwrap();

        assert_eq!(members.len(), 3);
        for pair in members.windows(2) {
            assert!(pair[0].order <= pair[1].order);
        }
        assert_eq!(members[0].name, "Ansel");
        assert!(members[0].content.contains("Longer bio for Ansel."));
    }

    #[test]
    fn test_case_studies_sorted_newest_first() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "case-studies/january.md",
            &case_study_file("January", "2024-01-01", false),
        );
        write_file(
            tmp.path(),
            "case-studies/june.md",
            &case_study_file("June", "2024-06-01", false),
        );

        let loader = ContentLoader::with_content_root(tmp.path());
        let studies = loader.load_case_studies().unwrap();

        assert_eq!(studies.len(), 2);
        assert_eq!(studies[0].title, "June");
        assert_eq!(studies[1].title, "January");
        for pair in studies.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }

    #[test]
    fn test_posts_sorted_newest_first_with_computed_read_time() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "blog/older.md",
            &post_file("Older", "2023-11-02", false),
        );
        write_file(
            tmp.path(),
            "blog/newer.md",
            &post_file("Newer", "2024-02-20", false),
        );

        let loader = ContentLoader::with_content_root(tmp.path());
        let posts = loader.load_posts().unwrap();

        assert_eq!(posts[0].title, "Newer");
        assert_eq!(posts[1].title, "Older");
        // readTime was not declared, so it is computed from the body
        assert_eq!(posts[0].read_time, "1 min read");
    }

    #[test]
    fn test_featured_filter_and_limit() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "case-studies/a.md",
            &case_study_file("A", "2024-04-01", true),
        );
        write_file(
            tmp.path(),
            "case-studies/b.md",
            &case_study_file("B", "2024-03-01", true),
        );
        write_file(
            tmp.path(),
            "case-studies/c.md",
            &case_study_file("C", "2024-02-01", true),
        );
        write_file(
            tmp.path(),
            "case-studies/d.md",
            &case_study_file("D", "2024-05-01", false),
        );

        let loader = ContentLoader::with_content_root(tmp.path());
        let featured = loader.featured_case_studies(Some(2)).unwrap();

        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|s| s.featured));
        // Order from the full listing is preserved, not re-sorted
        assert_eq!(featured[0].title, "A");
        assert_eq!(featured[1].title, "B");
    }

    #[test]
    fn test_get_by_slug_not_found() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/ansel.md", &team_file("Ansel", 1, false));

        let loader = ContentLoader::with_content_root(tmp.path());
        assert!(loader.team_member("nonexistent-person").unwrap().is_none());
        assert!(loader.case_study("nope").unwrap().is_none());
        assert!(loader.post("nope").unwrap().is_none());
    }

    #[test]
    fn test_get_by_slug_rejects_path_like_slugs() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/ansel.md", &team_file("Ansel", 1, false));

        let loader = ContentLoader::with_content_root(tmp.path());
        assert!(loader.team_member("../team/ansel").unwrap().is_none());
    }

    #[test]
    fn test_list_then_get_by_slug_round_trip() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/ansel.md", &team_file("Ansel", 1, true));
        write_file(tmp.path(), "team/bea.md", &team_file("Bea", 2, false));
        write_file(
            tmp.path(),
            "case-studies/june.md",
            &case_study_file("June", "2024-06-01", true),
        );
        write_file(
            tmp.path(),
            "blog/post.md",
            &post_file("Post", "2024-02-20", false),
        );

        let loader = ContentLoader::with_content_root(tmp.path());

        for member in loader.load_team().unwrap() {
            let looked_up = loader.team_member(&member.slug).unwrap().unwrap();
            assert_eq!(looked_up, member);
        }
        for study in loader.load_case_studies().unwrap() {
            let looked_up = loader.case_study(&study.slug).unwrap().unwrap();
            assert_eq!(looked_up, study);
        }
        for post in loader.load_posts().unwrap() {
            let looked_up = loader.post(&post.slug).unwrap().unwrap();
            assert_eq!(looked_up, post);
        }
    }

    #[test]
    fn test_malformed_file_skipped_in_listing_but_slug_still_listed() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "blog/good.md",
            &post_file("Good", "2024-01-01", false),
        );
        // Missing every required field
        write_file(tmp.path(), "blog/broken.md", "---\ntitle: Only a title\n---\nbody\n");
        // No frontmatter at all
        write_file(tmp.path(), "blog/prose.md", "Just prose, no fences.\n");

        let loader = ContentLoader::with_content_root(tmp.path());

        let posts = loader.load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");

        // Slug enumeration never parses file contents
        let slugs = loader.post_slugs().unwrap();
        assert_eq!(slugs, vec!["broken", "good", "prose"]);
    }

    #[test]
    fn test_get_by_slug_malformed_returns_none() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/broken.md", "---\nrole: no name\n---\n");

        let loader = ContentLoader::with_content_root(tmp.path());
        assert!(loader.team_member("broken").unwrap().is_none());
    }

    #[test]
    fn test_invalid_published_at_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "case-studies/ok.md",
            &case_study_file("Ok", "2024-01-01", false),
        );
        write_file(
            tmp.path(),
            "case-studies/bad-date.md",
            &case_study_file("Bad", "sometime soon", false),
        );

        let loader = ContentLoader::with_content_root(tmp.path());
        let studies = loader.load_case_studies().unwrap();
        assert_eq!(studies.len(), 1);
        assert_eq!(studies[0].title, "Ok");
    }

    #[test]
    fn test_duplicate_slug_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/ansel.markdown", &team_file("First", 1, false));
        write_file(tmp.path(), "team/ansel.md", &team_file("Second", 2, false));

        let loader = ContentLoader::with_content_root(tmp.path());
        let members = loader.load_team().unwrap();
        assert_eq!(members.len(), 1);

        let slugs = loader.team_slugs().unwrap();
        assert_eq!(slugs, vec!["ansel"]);
    }

    #[test]
    fn test_repeated_loads_are_identical() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "team/ansel.md", &team_file("Ansel", 1, false));
        write_file(
            tmp.path(),
            "blog/post.md",
            &post_file("Post", "2024-02-20", true),
        );
        write_file(
            tmp.path(),
            "company-overview.txt",
            "# Overview\n\n## Section\n\n{image}\n",
        );

        let loader = ContentLoader::with_content_root(tmp.path());
        assert_eq!(loader.load_team().unwrap(), loader.load_team().unwrap());
        assert_eq!(loader.load_posts().unwrap(), loader.load_posts().unwrap());
        assert_eq!(
            loader.load_overview().unwrap(),
            loader.load_overview().unwrap()
        );
    }

    #[test]
    fn test_overview_document_loaded() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "company-overview.txt",
            "# Atelier North\n\n## Who We Are\n\nPeople.\n\n{image}\n",
        );

        let loader = ContentLoader::with_content_root(tmp.path());
        let doc = loader.load_overview().unwrap();

        assert_eq!(doc.title.as_deref(), Some("Atelier North"));
        assert_eq!(doc.toc.len(), 1);
        assert_eq!(doc.toc[0].id, "who-we-are");
        assert!(doc.html.contains("image-placeholder"));
        assert!(!doc.html.contains("{image}"));
    }
}
