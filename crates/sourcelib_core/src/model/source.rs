//! Source record model and summary parsing.
//!
//! # Responsibility
//! - Define the canonical in-memory record consumed by the relationship engine.
//! - Parse summary markdown (`# Title`, `**Tags:**`, `## Key Claims`) into records.
//! - Extract listing metadata (`**Source:**`, `**Date:**`, ...) for library views.
//!
//! # Invariants
//! - Parsing never fails: missing or malformed sections become empty fields.
//! - `tags` are lowercase, trimmed, non-empty and deduplicated in first-seen order.
//! - `claims_text` and `full_text` are always lowercase.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const TAGS_MARKER: &str = "**Tags:**";
pub const CLAIMS_HEADING: &str = "## Key Claims";
const DEFAULT_DECAY: &str = "normal";

static NON_SLUG_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));
static META_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\*\*([A-Za-z]+):\*\*[ \t]*(.*)$").expect("valid meta line regex")
});

/// Stable identifier of a source inside the corpus.
pub type SourceSlug = String;

/// Canonical record for one summarized source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Unique, stable identifier (directory name on disk).
    pub slug: SourceSlug,
    /// Display name. Falls back to `slug` when the document has no title.
    pub title: String,
    /// Normalized topic labels.
    pub tags: Vec<String>,
    /// Lowercased Key Claims section, lines joined by single spaces.
    pub claims_text: String,
    /// Lowercased full document body.
    pub full_text: String,
}

impl SourceRecord {
    /// Builds a record from already-separated parts.
    ///
    /// Tags are normalized and text fields lowercased, so callers can pass
    /// raw values.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        tags: &[&str],
        claims_text: &str,
    ) -> Self {
        let claims_text = claims_text.to_lowercase();
        Self {
            slug: slug.into(),
            title: title.into(),
            tags: normalize_tags(tags.iter().copied()),
            full_text: claims_text.clone(),
            claims_text,
        }
    }

    /// Parses summary markdown into a record.
    ///
    /// # Rules
    /// - title: first line starting with `# `, else `slug`.
    /// - tags: first line containing `**Tags:**`, comma-separated.
    /// - claims: lines between `## Key Claims` and the next `##` heading.
    pub fn parse(content: &str, slug: &str) -> Self {
        let lines = content.lines().collect::<Vec<_>>();

        let title = lines
            .iter()
            .find_map(|line| line.strip_prefix("# "))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(slug)
            .to_string();

        let tags = lines
            .iter()
            .find(|line| line.contains(TAGS_MARKER))
            .map(|line| split_tag_list(&line.replacen(TAGS_MARKER, "", 1)))
            .unwrap_or_default();

        Self {
            slug: slug.to_string(),
            title,
            tags,
            claims_text: section_lines(content, CLAIMS_HEADING).join(" ").to_lowercase(),
            full_text: content.to_lowercase(),
        }
    }

    /// Returns whether the record has any claim text worth scanning.
    pub fn has_claims(&self) -> bool {
        !self.claims_text.trim().is_empty()
    }
}

/// Listing metadata parsed from summary header lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub slug: SourceSlug,
    pub title: String,
    pub url: String,
    pub author: String,
    /// `YYYY-MM-DD` as written in the summary; may be empty.
    pub date: String,
    /// Serialized as `type` to match the summary header name.
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    /// `fast|normal|slow`; `normal` when absent.
    pub decay: String,
}

impl SourceMeta {
    /// Parses `**Key:** value` header lines.
    pub fn parse(content: &str, slug: &str) -> Self {
        let title = content
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(slug)
            .to_string();
        let decay = extract_meta(content, "Decay");

        Self {
            slug: slug.to_string(),
            title,
            url: extract_meta(content, "Source"),
            author: extract_meta(content, "Author"),
            date: extract_meta(content, "Date"),
            kind: extract_meta(content, "Type"),
            tags: split_tag_list(&extract_meta(content, "Tags")),
            decay: if decay.is_empty() {
                DEFAULT_DECAY.to_string()
            } else {
                decay
            },
        }
    }
}

/// Normalizes one tag value.
///
/// Returns `None` when the value is blank after trimming.
pub fn normalize_tag(value: &str) -> Option<String> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Normalizes and deduplicates tags, keeping first-seen order.
pub fn normalize_tags<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tags = Vec::<String>::new();
    for tag in values.into_iter().filter_map(normalize_tag) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Converts free text into a directory-safe slug.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG_CHARS_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

fn split_tag_list(value: &str) -> Vec<String> {
    normalize_tags(value.split(','))
}

/// Lines after the first line containing `heading`, up to the next `##` heading.
///
/// Returns an empty list when the heading is absent.
pub fn section_lines<'c>(content: &'c str, heading: &str) -> Vec<&'c str> {
    let mut lines = content.lines().skip_while(|line| !line.contains(heading));
    if lines.next().is_none() {
        return Vec::new();
    }
    lines.take_while(|line| !line.starts_with("##")).collect()
}

fn extract_meta(content: &str, key: &str) -> String {
    META_LINE_RE
        .captures_iter(content)
        .find(|caps| &caps[1] == key)
        .map(|caps| caps[2].trim().to_string())
        .unwrap_or_default()
}
