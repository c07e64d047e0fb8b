//! JSON report projections.
//!
//! Record positions are replaced by slugs so the output stands on its own.

use crate::conflict::{ConflictFinding, Sentiment};
use crate::graph::{ConnectionGraph, EdgeKind};
use crate::model::source::SourceRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GraphReport<'r> {
    pub total_sources: usize,
    pub edges: Vec<EdgeReport<'r>>,
    pub clusters: Vec<ClusterReport<'r>>,
    pub orphans: Vec<&'r str>,
}

#[derive(Debug, Serialize)]
pub struct EdgeReport<'r> {
    pub a: &'r str,
    pub b: &'r str,
    pub kind: EdgeKind,
    pub shared_labels: &'r [String],
    pub strength: usize,
}

#[derive(Debug, Serialize)]
pub struct ClusterReport<'r> {
    pub topic: &'r str,
    pub members: Vec<&'r str>,
}

#[derive(Debug, Serialize)]
pub struct ConflictReport<'r> {
    pub analyzed: usize,
    pub findings: Vec<FindingReport<'r>>,
}

#[derive(Debug, Serialize)]
pub struct FindingReport<'r> {
    pub a: &'r str,
    pub b: &'r str,
    pub entity: &'r str,
    pub sentiment_a: Sentiment,
    pub sentiment_b: Sentiment,
}

/// Projects a connection graph onto record slugs.
pub fn graph_report<'r>(
    records: &'r [SourceRecord],
    graph: &'r ConnectionGraph,
) -> GraphReport<'r> {
    GraphReport {
        total_sources: records.len(),
        edges: graph
            .edges
            .iter()
            .map(|edge| EdgeReport {
                a: slug_of(records, edge.a),
                b: slug_of(records, edge.b),
                kind: edge.kind,
                shared_labels: &edge.shared_labels,
                strength: edge.strength,
            })
            .collect(),
        clusters: graph
            .clusters
            .iter()
            .map(|cluster| ClusterReport {
                topic: &cluster.topic,
                members: cluster
                    .members
                    .iter()
                    .map(|index| slug_of(records, *index))
                    .collect(),
            })
            .collect(),
        orphans: graph
            .orphans
            .iter()
            .map(|index| slug_of(records, *index))
            .collect(),
    }
}

/// Projects conflict findings onto record slugs.
pub fn conflict_report<'r>(
    records: &'r [SourceRecord],
    findings: &'r [ConflictFinding],
    analyzed: usize,
) -> ConflictReport<'r> {
    ConflictReport {
        analyzed,
        findings: findings
            .iter()
            .map(|finding| FindingReport {
                a: slug_of(records, finding.a),
                b: slug_of(records, finding.b),
                entity: &finding.entity,
                sentiment_a: finding.sentiment_a,
                sentiment_b: finding.sentiment_b,
            })
            .collect(),
    }
}

fn slug_of(records: &[SourceRecord], index: usize) -> &str {
    records
        .get(index)
        .map(|record| record.slug.as_str())
        .unwrap_or("")
}
