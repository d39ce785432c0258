//! Content models
//!
//! One struct per content kind, mirroring the front-matter contract plus the
//! slug derived from the file name and the body rendered to HTML.

use chrono::NaiveDate;
use serde::Serialize;

use super::frontmatter::{BlogFrontmatter, CaseStudyFrontmatter, TeamFrontmatter};
use crate::helpers;

/// A metric highlighted on a case study page
pub type Metric = super::frontmatter::MetricEntry;

/// A client testimonial attached to a case study
pub type Testimonial = super::frontmatter::TestimonialEntry;

/// A team member profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub slug: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub email: Option<String>,
    /// Explicit sort key for listings
    pub order: i64,
    pub featured: bool,
    /// Rendered HTML body
    pub content: String,
}

impl TeamMember {
    pub(crate) fn from_parts(slug: String, fm: TeamFrontmatter, content: String) -> Self {
        Self {
            slug,
            name: fm.name,
            role: fm.role,
            bio: fm.bio,
            image: fm.image,
            tags: fm.tags,
            linkedin: fm.linkedin,
            github: fm.github,
            email: fm.email,
            order: fm.order,
            featured: fm.featured,
            content,
        }
    }

    /// Advisors are tagged rather than modeled as a separate kind
    pub fn is_advisor(&self) -> bool {
        self.tags.iter().any(|t| t == "Advisor")
    }
}

/// A client project write-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub challenge: String,
    pub outcome: String,
    pub cover_image: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub published_at: NaiveDate,
    pub industry: Option<String>,
    pub duration: Option<String>,
    pub services: Option<Vec<String>>,
    pub metrics: Option<Vec<Metric>>,
    pub technologies: Option<Vec<String>>,
    pub testimonial: Option<Testimonial>,
    /// Rendered HTML body
    pub content: String,
}

impl CaseStudy {
    pub(crate) fn from_parts(
        slug: String,
        fm: CaseStudyFrontmatter,
        published_at: NaiveDate,
        content: String,
    ) -> Self {
        Self {
            slug,
            title: fm.title,
            client: fm.client,
            description: fm.description,
            excerpt: fm.excerpt,
            challenge: fm.challenge,
            outcome: fm.outcome,
            cover_image: fm.cover_image,
            image: fm.image,
            tags: fm.tags,
            featured: fm.featured,
            published_at,
            industry: fm.industry,
            duration: fm.duration,
            services: fm.services,
            metrics: fm.metrics,
            technologies: fm.technologies,
            testimonial: fm.testimonial,
            content,
        }
    }
}

/// An insights article
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub description: Option<String>,
    pub author: String,
    pub author_role: Option<String>,
    pub published_at: NaiveDate,
    pub read_time: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    /// Rendered HTML body
    pub content: String,
}

impl BlogPost {
    pub(crate) fn from_parts(
        slug: String,
        fm: BlogFrontmatter,
        published_at: NaiveDate,
        body: &str,
        content: String,
    ) -> Self {
        let read_time = fm
            .read_time
            .unwrap_or_else(|| helpers::read_time(body));
        Self {
            slug,
            title: fm.title,
            excerpt: fm.excerpt,
            description: fm.description,
            author: fm.author,
            author_role: fm.author_role,
            published_at,
            read_time,
            tags: fm.tags,
            category: fm.category,
            cover_image: fm.cover_image,
            image: fm.image,
            featured: fm.featured,
            content,
        }
    }
}
