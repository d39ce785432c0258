//! Content module - loads team members, case studies, blog posts, and the
//! company overview document from the content directory

mod frontmatter;
pub mod loader;
mod markdown;
mod model;
pub mod overview;

use std::path::PathBuf;
use thiserror::Error;

pub use frontmatter::{BlogFrontmatter, CaseStudyFrontmatter, TeamFrontmatter};
pub use markdown::MarkdownRenderer;
pub use model::{BlogPost, CaseStudy, Metric, TeamMember, Testimonial};
pub use overview::{OverviewDoc, TocEntry};

/// Errors raised while loading content files.
///
/// Only `Io` indicates an environment problem (permissions, disk); the other
/// variants describe a broken content file and are downgraded to a warning
/// by the listing operations.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing front-matter block in {}", path.display())]
    MissingFrontmatter { path: PathBuf },

    #[error("invalid front-matter in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid publishedAt value {value:?} in {}", path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("duplicate slug {slug:?} from {}", path.display())]
    DuplicateSlug { path: PathBuf, slug: String },
}

impl ContentError {
    /// True for failures that signal a deployment/environment problem
    /// rather than a broken content file.
    pub fn is_environment(&self) -> bool {
        match self {
            ContentError::Io { source, .. } => source.kind() != std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
