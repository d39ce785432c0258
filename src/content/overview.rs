//! Company overview document
//!
//! A single long-form document rendered with custom preprocessing: two
//! literal marker tokens expand to fixed HTML blocks, and `##`/`###`
//! headings become explicit anchored headings feeding an in-page table of
//! contents.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::markdown::MarkdownRenderer;
use crate::helpers;

/// A line holding exactly this token becomes an image-placeholder block
pub const IMAGE_PLACEHOLDER_TOKEN: &str = "{image}";

/// A line holding exactly this token becomes a divider
pub const PAGE_BREAK_TOKEN: &str = "--- PAGE BREAK ---";

// Must stay free of blank lines so markdown keeps it as one HTML block.
const IMAGE_PLACEHOLDER_HTML: &str = r#"<figure class="image-placeholder">
  <div class="image-placeholder-frame" aria-hidden="true"></div>
  <figcaption>
    <strong>Image placeholder</strong>
    <span>Swap in a real image by editing the content file.</span>
  </figcaption>
</figure>"#;

const PAGE_BREAK_HTML: &str = r#"<hr class="page-break" />"#;

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"(?m)^#\s+(.+?)\s*$").unwrap();
    static ref H2_RE: Regex = Regex::new(r"^##\s+(.+?)\s*$").unwrap();
    static ref H3_RE: Regex = Regex::new(r"^###\s+(.+?)\s*$").unwrap();
}

/// One table-of-contents entry, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// The loaded overview document
///
/// `Default` doubles as the blank document returned when the source file is
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewDoc {
    pub raw: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub title: Option<String>,
}

impl OverviewDoc {
    /// Build the document from its raw source text
    pub fn from_raw(raw: String, renderer: &MarkdownRenderer) -> Self {
        let title = extract_title(&raw);
        let (markdown, toc) = preprocess(&raw);
        let html = renderer.render(&markdown);
        Self {
            raw,
            html,
            toc,
            title,
        }
    }
}

/// Extract the first top-level markdown heading, if any
pub fn extract_title(raw: &str) -> Option<String> {
    TITLE_RE.captures(raw).map(|caps| caps[1].to_string())
}

/// Pre-scan the document line by line, expanding marker tokens and turning
/// `##`/`###` headings into anchored HTML headings.
///
/// Anchor-id disambiguation is a fold over the line sequence carrying an
/// explicit slug-count map, so two parses of the same document always yield
/// identical ids.
pub fn preprocess(raw: &str) -> (String, Vec<TocEntry>) {
    let mut toc = Vec::new();
    let mut slug_counts: IndexMap<String, usize> = IndexMap::new();
    let mut out: Vec<String> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed == IMAGE_PLACEHOLDER_TOKEN {
            out.push(String::new());
            out.push(IMAGE_PLACEHOLDER_HTML.to_string());
            out.push(String::new());
            continue;
        }

        if trimmed == PAGE_BREAK_TOKEN {
            out.push(String::new());
            out.push(PAGE_BREAK_HTML.to_string());
            out.push(String::new());
            continue;
        }

        if let Some(caps) = H2_RE.captures(line) {
            let text = caps[1].to_string();
            let id = unique_anchor(&mut slug_counts, &text, "section");
            toc.push(TocEntry {
                level: 2,
                id: id.clone(),
                text: text.clone(),
            });
            out.push(String::new());
            out.push(format!(r#"<h2 id="{}">{}</h2>"#, id, escape_html(&text)));
            out.push(String::new());
            continue;
        }

        if let Some(caps) = H3_RE.captures(line) {
            let text = caps[1].to_string();
            let id = unique_anchor(&mut slug_counts, &text, "subsection");
            toc.push(TocEntry {
                level: 3,
                id: id.clone(),
                text: text.clone(),
            });
            out.push(String::new());
            out.push(format!(r#"<h3 id="{}">{}</h3>"#, id, escape_html(&text)));
            out.push(String::new());
            continue;
        }

        out.push(line.to_string());
    }

    (out.join("\n"), toc)
}

/// Allocate the next unique anchor id for a heading.
///
/// The first occurrence of a base slug keeps it bare; repeats get `-2`,
/// `-3`, and so on.
fn unique_anchor(counts: &mut IndexMap<String, usize>, text: &str, fallback: &str) -> String {
    let slug = helpers::slugify(text);
    let base = if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    };

    let seen = counts.get(&base).copied().unwrap_or(0);
    counts.insert(base.clone(), seen + 1);

    if seen == 0 {
        base
    } else {
        format!("{}-{}", base, seen + 1)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let raw = "intro line\n\n# Company Overview & Growth\n\n## First Section\n";
        assert_eq!(
            extract_title(raw),
            Some("Company Overview & Growth".to_string())
        );
        assert_eq!(extract_title("no headings here"), None);
        // A ## heading is not a title
        assert_eq!(extract_title("## Section Only\n"), None);
    }

    #[test]
    fn test_heading_anchors_and_toc_order() {
        let raw = "## Our Story\n\ntext\n\n### The Early Days\n\n## What We Do\n";
        let (markdown, toc) = preprocess(raw);

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0], TocEntry { level: 2, id: "our-story".into(), text: "Our Story".into() });
        assert_eq!(toc[1].level, 3);
        assert_eq!(toc[1].id, "the-early-days");
        assert_eq!(toc[2].id, "what-we-do");

        assert!(markdown.contains(r##"<h2 id="our-story">Our Story</h2>"##));
        assert!(markdown.contains(r##"<h3 id="the-early-days">The Early Days</h3>"##));
    }

    #[test]
    fn test_duplicate_headings_get_distinct_ids() {
        let raw = "## Results\n\n## Results\n\n## Results\n";
        let (markdown, toc) = preprocess(raw);

        assert_eq!(toc[0].id, "results");
        assert_eq!(toc[1].id, "results-2");
        assert_eq!(toc[2].id, "results-3");

        // Every TOC id is a real anchor target
        for entry in &toc {
            assert!(markdown.contains(&format!(r#"<h2 id="{}">"#, entry.id)));
        }
    }

    #[test]
    fn test_heading_slug_fallback() {
        let (_, toc) = preprocess("## !!!\n\n### ???\n");
        assert_eq!(toc[0].id, "section");
        assert_eq!(toc[1].id, "subsection");
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let (markdown, toc) = preprocess("## Q&A <Session>\n");
        assert_eq!(toc[0].text, "Q&A <Session>");
        assert!(markdown.contains(r##"<h2 id="q-a-session">Q&amp;A &lt;Session&gt;</h2>"##));
    }

    #[test]
    fn test_image_placeholder_replacement() {
        let renderer = MarkdownRenderer::new();
        let raw = "# Doc\n\nBefore.\n\n{image}\n\nAfter.\n".to_string();
        let doc = OverviewDoc::from_raw(raw, &renderer);

        assert!(doc.html.contains(r#"<figure class="image-placeholder">"#));
        assert!(!doc.html.contains("{image}"));
        assert!(doc.html.contains("Before."));
        assert!(doc.html.contains("After."));
    }

    #[test]
    fn test_page_break_replacement() {
        let (markdown, _) = preprocess("one\n\n--- PAGE BREAK ---\n\ntwo\n");
        assert!(markdown.contains(r#"<hr class="page-break" />"#));
        assert!(!markdown.contains("PAGE BREAK"));
    }

    #[test]
    fn test_marker_must_fill_the_line() {
        let (markdown, _) = preprocess("see the {image} marker inline\n");
        assert!(markdown.contains("see the {image} marker inline"));
    }

    #[test]
    fn test_other_lines_pass_through() {
        let raw = "plain text\n- a list item\n> a quote\n";
        let (markdown, toc) = preprocess(raw);
        assert_eq!(markdown, raw.trim_end());
        assert!(toc.is_empty());
    }

    #[test]
    fn test_preprocess_is_idempotent_per_input() {
        let renderer = MarkdownRenderer::new();
        let raw = "# T\n\n## Dup\n\n## Dup\n\n{image}\n\n--- PAGE BREAK ---\n";
        let a = OverviewDoc::from_raw(raw.to_string(), &renderer);
        let b = OverviewDoc::from_raw(raw.to_string(), &renderer);
        assert_eq!(a.html, b.html);
        assert_eq!(a.toc, b.toc);
        assert_eq!(a.title, b.title);
    }
}
