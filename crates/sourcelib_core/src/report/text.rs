//! Plain-text report rendering.
//!
//! # Invariants
//! - Rendering is pure; output ends with a single trailing newline.
//! - Record positions in results are resolved against the same record slice
//!   the results were computed from.

use crate::conflict::{group_by_pair, ConflictFinding};
use crate::graph::{ConnectionEdge, ConnectionGraph, EdgeKind};
use crate::library::teach::TeachReport;
use crate::model::source::SourceRecord;

/// Printed by the connections report when the corpus is empty.
pub const NO_SOURCES_MESSAGE: &str = "No sources found.";
/// Printed by the conflicts report when fewer than two records have claims.
pub const NOT_ENOUGH_CLAIMS_MESSAGE: &str = "Need at least 2 sources with Key Claims.";

const EDGE_SEPARATOR: &str = " ↔ ";

/// Renders the numbered cluster list.
pub fn render_clusters(records: &[SourceRecord], graph: &ConnectionGraph) -> String {
    let mut lines = vec!["# Source Clusters".to_string(), String::new()];
    for (position, cluster) in graph.clusters.iter().enumerate() {
        lines.push(format!(
            "## {}. {} ({} sources)",
            position + 1,
            cluster.topic,
            cluster.size()
        ));
        lines.extend(
            cluster
                .members
                .iter()
                .map(|index| format!("- {}", title_of(records, *index))),
        );
        lines.push(String::new());
    }
    if graph.clusters.is_empty() {
        lines.push("No clusters found.".to_string());
    }
    finish(lines)
}

/// Renders orphan titles with their tags.
pub fn render_orphans(records: &[SourceRecord], graph: &ConnectionGraph) -> String {
    let mut lines = vec!["# Orphan Sources".to_string(), String::new()];
    for index in &graph.orphans {
        let Some(record) = records.get(*index) else {
            continue;
        };
        let tags = if record.tags.is_empty() {
            "no tags".to_string()
        } else {
            record.tags.join(", ")
        };
        lines.push(format!("- {} ({tags})", record.title));
    }
    if graph.orphans.is_empty() {
        lines.push("All sources connected.".to_string());
    }
    finish(lines)
}

/// Renders summary counts, cluster detail, every edge and orphan titles.
pub fn render_graph(records: &[SourceRecord], graph: &ConnectionGraph) -> String {
    let mut lines = vec![
        "# Source Connection Graph".to_string(),
        String::new(),
        format!("Total sources: {}", records.len()),
        format!("Connections: {}", graph.edges.len()),
        format!("Clusters: {}", graph.clusters.len()),
        format!("Orphans: {}", graph.orphans.len()),
        String::new(),
    ];

    if !graph.clusters.is_empty() {
        lines.push("## Clusters".to_string());
        for (position, cluster) in graph.clusters.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!(
                "### {}. {} ({})",
                position + 1,
                cluster.topic,
                cluster.size()
            ));
            lines.extend(
                cluster
                    .members
                    .iter()
                    .map(|index| format!("- {}", title_of(records, *index))),
            );
        }
        lines.push(String::new());
    }

    for (kind, heading) in [
        (EdgeKind::TagOverlap, "## Tag Connections"),
        (EdgeKind::KeywordOverlap, "## Keyword Connections"),
    ] {
        let edges = graph.edges_of_kind(kind).collect::<Vec<_>>();
        if edges.is_empty() {
            continue;
        }
        lines.push(heading.to_string());
        lines.push(String::new());
        lines.extend(edges.into_iter().map(|edge| edge_line(records, edge)));
        lines.push(String::new());
    }

    if !graph.orphans.is_empty() {
        lines.push("## Orphans".to_string());
        lines.push(String::new());
        lines.extend(
            graph
                .orphans
                .iter()
                .map(|index| format!("- {}", title_of(records, *index))),
        );
    }

    finish(lines)
}

/// Renders conflict findings grouped per record pair.
///
/// `analyzed` is the number of records that took part in the scan.
pub fn render_conflicts(
    records: &[SourceRecord],
    findings: &[ConflictFinding],
    analyzed: usize,
) -> String {
    let mut lines = vec![
        format!("Analyzing {analyzed} sources for conflicts..."),
        String::new(),
        "# Source Conflict Detection".to_string(),
        String::new(),
        "**Note:** Heuristic, review manually.".to_string(),
        String::new(),
    ];

    let groups = group_by_pair(findings);
    if groups.is_empty() {
        lines.push("No conflicts detected.".to_string());
        return finish(lines);
    }

    lines.push(format!("Found {} potential conflict(s):", groups.len()));
    lines.push(String::new());
    for (position, group) in groups.iter().enumerate() {
        lines.push(format!(
            "## {}. {} vs {}",
            position + 1,
            title_of(records, group.a),
            title_of(records, group.b)
        ));
        lines.extend(group.findings.iter().map(|finding| {
            format!(
                "  Conflicting on: {} ({} vs {})",
                finding.entity, finding.sentiment_a, finding.sentiment_b
            )
        }));
        lines.push(String::new());
    }
    finish(lines)
}

/// Renders a topic briefing: sources, key insights and a claim timeline.
pub fn render_teach(report: &TeachReport) -> String {
    if report.sources.is_empty() {
        return format!("No sources found for: {}\n", report.topic);
    }

    let mut lines = vec![
        format!("# What you know about: {}", report.topic),
        String::new(),
        format!("## Sources ({})", report.sources.len()),
    ];
    lines.extend(report.sources.iter().map(|source| {
        let base = format!("- {} ({})", source.title, date_label(&source.date));
        if source.analysis_summary.is_empty() {
            base
        } else {
            format!("{base} - {}", source.analysis_summary)
        }
    }));
    lines.push(String::new());

    lines.push("## Key Insights".to_string());
    if report.insights.is_empty() {
        lines.push("- No significant patterns found".to_string());
        lines.push(String::new());
    }
    for insight in &report.insights {
        lines.push(format!("**{}:**", capitalize(&insight.keyword)));
        lines.extend(insight.claims.iter().map(|claim| format!("- {claim}")));
        lines.push(String::new());
    }

    lines.push("## Timeline".to_string());
    for (source, claim) in report.timeline() {
        lines.push(format!("**{}:** {}", date_label(&source.date), source.title));
        lines.push(format!("- {claim}"));
        lines.push(String::new());
    }
    finish(lines)
}

fn date_label(date: &str) -> &str {
    if date.is_empty() {
        "undated"
    } else {
        date
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn edge_line(records: &[SourceRecord], edge: &ConnectionEdge) -> String {
    format!(
        "{}{EDGE_SEPARATOR}{} ({})",
        title_of(records, edge.a),
        title_of(records, edge.b),
        edge.shared_labels.join(", ")
    )
}

fn title_of(records: &[SourceRecord], index: usize) -> &str {
    records
        .get(index)
        .map(|record| record.title.as_str())
        .unwrap_or("<unknown>")
}

fn finish(mut lines: Vec<String>) -> String {
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
