//! Library statistics.

use crate::model::source::SourceMeta;
use crate::repo::source_repo::SourceDocument;
use serde::Serialize;
use std::collections::BTreeMap;

const UNTYPED: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    /// Source count per `**Type:**` value; untyped sources count under `unknown`.
    pub by_type: BTreeMap<String, usize>,
    pub by_tag: BTreeMap<String, usize>,
    pub disk_usage_bytes: u64,
}

/// Aggregates counts and on-disk size over all documents.
pub fn library_stats(documents: &[SourceDocument]) -> LibraryStats {
    let mut stats = LibraryStats::default();
    for document in documents {
        let meta = SourceMeta::parse(&document.content, &document.slug);
        stats.total += 1;
        let kind = if meta.kind.is_empty() {
            UNTYPED.to_string()
        } else {
            meta.kind
        };
        *stats.by_type.entry(kind).or_insert(0) += 1;
        for tag in meta.tags {
            *stats.by_tag.entry(tag).or_insert(0) += 1;
        }
        stats.disk_usage_bytes += document.size_bytes;
    }
    stats
}

/// Renders stats as the `stats` command prints them.
pub fn render_stats(stats: &LibraryStats) -> String {
    let mut lines = vec![
        format!("Total sources: {}", stats.total),
        format!(
            "Disk usage: {:.2} KB",
            stats.disk_usage_bytes as f64 / 1024.0
        ),
    ];
    for (heading, counts) in [("By type:", &stats.by_type), ("By tag:", &stats.by_tag)] {
        if counts.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.extend(
            counts
                .iter()
                .map(|(name, count)| format!("  {name}: {count}")),
        );
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
