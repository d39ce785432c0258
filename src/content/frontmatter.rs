//! Front-matter parsing and per-kind schemas
//!
//! Each content kind has its own typed front-matter struct so that a file
//! missing a required field is rejected at the parse boundary instead of
//! surfacing later as a half-populated page.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Team member front-matter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamFrontmatter {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub email: Option<String>,
    pub order: i64,
    #[serde(default)]
    pub featured: bool,
}

/// Case study front-matter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyFrontmatter {
    pub title: String,
    pub client: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub challenge: String,
    pub outcome: String,
    pub cover_image: Option<String>,
    pub image: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub published_at: String,
    pub industry: Option<String>,
    pub duration: Option<String>,
    pub services: Option<Vec<String>>,
    pub metrics: Option<Vec<MetricEntry>>,
    pub technologies: Option<Vec<String>>,
    pub testimonial: Option<TestimonialEntry>,
}

/// Blog post front-matter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFrontmatter {
    pub title: String,
    pub excerpt: String,
    pub description: Option<String>,
    pub author: String,
    pub author_role: Option<String>,
    pub published_at: String,
    /// Declared read time; computed from the body when absent
    pub read_time: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// A metric as declared in case-study front-matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub value: String,
    pub label: String,
}

/// A testimonial as declared in case-study front-matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialEntry {
    pub quote: String,
    pub author: String,
    pub role: String,
}

/// Split a content file into its YAML front-matter and body.
///
/// The file must begin with a `---` fence followed by a closing `---` line.
/// Returns `None` when no complete front-matter block is present.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix(['\r', '\n']).unwrap_or(rest);

    let end = rest.find("\n---")?;
    let yaml = &rest[..end];
    let body = &rest[end + 4..];
    // Drop the remainder of the closing fence line
    let body = match body.find('\n') {
        Some(pos) => &body[pos + 1..],
        None => "",
    };
    Some((yaml, body))
}

/// Parse a publishedAt date string in the formats content authors use
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Full timestamps are accepted too; only the date part matters for ordering
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in datetime_formats {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}
