//! Pairwise connection builder.
//!
//! # Responsibility
//! - Derive tag-overlap and keyword-overlap edges for every unordered record pair.
//!
//! # Invariants
//! - `a < b` for every edge; there are no self-edges.
//! - At most one edge per pair per [`EdgeKind`].
//! - Output is all tag-overlap edges, then all keyword-overlap edges, each in
//!   ascending `(a, b)` order.

use super::{ConnectionEdge, EdgeKind};
use crate::config::EngineConfig;
use crate::model::source::SourceRecord;

/// Builds every connection edge for the record set.
///
/// Runs in O(n²) over record count; corpora are personal-scale.
pub fn build_connections(records: &[SourceRecord], config: &EngineConfig) -> Vec<ConnectionEdge> {
    let mut edges = tag_overlap_edges(records);
    edges.extend(keyword_overlap_edges(records, config));
    edges
}

/// Emits one edge per pair sharing at least one tag.
pub fn tag_overlap_edges(records: &[SourceRecord]) -> Vec<ConnectionEdge> {
    let mut edges = Vec::new();
    for (i, left) in records.iter().enumerate() {
        for (j, right) in records.iter().enumerate().skip(i + 1) {
            let shared = left
                .tags
                .iter()
                .filter(|tag| right.tags.contains(tag))
                .cloned()
                .collect::<Vec<_>>();
            if !shared.is_empty() {
                edges.push(ConnectionEdge::new(i, j, EdgeKind::TagOverlap, shared));
            }
        }
    }
    edges
}

/// Emits one edge per pair whose claims share enough domain keywords.
pub fn keyword_overlap_edges(
    records: &[SourceRecord],
    config: &EngineConfig,
) -> Vec<ConnectionEdge> {
    let mut edges = Vec::new();
    for (i, left) in records.iter().enumerate() {
        for (j, right) in records.iter().enumerate().skip(i + 1) {
            let shared = config
                .domain_keywords
                .iter()
                .filter(|keyword| {
                    left.claims_text.contains(keyword.as_str())
                        && right.claims_text.contains(keyword.as_str())
                })
                .cloned()
                .collect::<Vec<_>>();
            if shared.len() >= config.keyword_min_overlap && !shared.is_empty() {
                edges.push(ConnectionEdge::new(i, j, EdgeKind::KeywordOverlap, shared));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::{build_connections, keyword_overlap_edges, tag_overlap_edges};
    use crate::config::EngineConfig;
    use crate::graph::EdgeKind;
    use crate::model::source::SourceRecord;

    #[test]
    fn tag_edge_strength_is_intersection_size() {
        let records = vec![
            SourceRecord::new("a", "A", &["crypto", "bitcoin", "macro"], ""),
            SourceRecord::new("b", "B", &["macro", "crypto"], ""),
        ];
        let edges = tag_overlap_edges(&records);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].strength, 2);
        assert_eq!(edges[0].shared_labels, vec!["crypto", "macro"]);
    }

    #[test]
    fn keyword_edge_requires_minimum_overlap() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("a", "A", &[], "crypto market and bitcoin trading"),
            SourceRecord::new("b", "B", &[], "crypto market only"),
            SourceRecord::new("c", "C", &[], "bitcoin trading on crypto market"),
        ];
        let edges = keyword_overlap_edges(&records, &config);
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].a, edges[0].b), (0, 2));
        assert_eq!(
            edges[0].shared_labels,
            vec!["crypto", "bitcoin", "trading", "market"]
        );
        assert_eq!(edges[0].strength, 4);
    }

    #[test]
    fn pair_can_carry_both_edge_kinds_separately() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("a", "A", &["saas"], "saas platform for llm agents"),
            SourceRecord::new("b", "B", &["saas"], "llm agents on a saas platform"),
        ];
        let edges = build_connections(&records, &config);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].kind, EdgeKind::TagOverlap);
        assert_eq!(edges[1].kind, EdgeKind::KeywordOverlap);
    }

    #[test]
    fn tag_edges_precede_keyword_edges() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("a", "A", &[], "crypto market bitcoin"),
            SourceRecord::new("b", "B", &[], "crypto market bitcoin"),
            SourceRecord::new("c", "C", &["x"], ""),
            SourceRecord::new("d", "D", &["x"], ""),
        ];
        let kinds = build_connections(&records, &config)
            .into_iter()
            .map(|edge| edge.kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![EdgeKind::TagOverlap, EdgeKind::KeywordOverlap]);
    }

    #[test]
    fn empty_records_produce_no_edges() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("a", "A", &[], ""),
            SourceRecord::new("b", "B", &[], ""),
        ];
        assert!(build_connections(&records, &config).is_empty());
        assert!(build_connections(&[], &config).is_empty());
    }
}
