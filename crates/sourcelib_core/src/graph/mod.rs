//! Connection graph over source records.
//!
//! # Responsibility
//! - Define edge/cluster types derived from a record set.
//! - Compose connection building, cluster extraction and orphan detection.
//!
//! # Invariants
//! - Edge and cluster endpoints are positions into the record slice they were
//!   computed from; results are recomputed per call and never persisted.
//! - Every function here is pure over `(records, config)`.

pub mod clusters;
pub mod connections;
pub mod orphans;

use crate::config::EngineConfig;
use crate::model::source::SourceRecord;
use log::debug;
use serde::{Deserialize, Serialize};

pub use clusters::{extract_clusters, MIXED_TOPIC};
pub use connections::build_connections;
pub use orphans::find_orphans;

/// Signal that produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Records share one or more tags.
    TagOverlap,
    /// Records' claims share enough domain keywords.
    KeywordOverlap,
}

/// Undirected edge between two records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEdge {
    /// Position of the earlier record.
    pub a: usize,
    /// Position of the later record.
    pub b: usize,
    pub kind: EdgeKind,
    /// Overlapping tags or keywords that produced the edge.
    pub shared_labels: Vec<String>,
    /// Always `shared_labels.len()`.
    pub strength: usize,
}

impl ConnectionEdge {
    /// Creates an edge whose strength is the number of shared labels.
    pub fn new(a: usize, b: usize, kind: EdgeKind, shared_labels: Vec<String>) -> Self {
        Self {
            a,
            b,
            kind,
            strength: shared_labels.len(),
            shared_labels,
        }
    }
}

/// Connected group of at least two records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Record positions in traversal order.
    pub members: Vec<usize>,
    /// Top tags joined with `", "`, or `"Mixed"`.
    pub topic: String,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Full connection analysis for one record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGraph {
    pub edges: Vec<ConnectionEdge>,
    pub clusters: Vec<Cluster>,
    pub orphans: Vec<usize>,
}

impl ConnectionGraph {
    /// Edges of one kind, in emission order.
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &ConnectionEdge> {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }

    /// Returns whether the record at `index` belongs to any cluster.
    pub fn is_clustered(&self, index: usize) -> bool {
        self.clusters
            .iter()
            .any(|cluster| cluster.members.contains(&index))
    }
}

/// Builds edges, clusters and orphans for the record set.
pub fn analyze_connections(records: &[SourceRecord], config: &EngineConfig) -> ConnectionGraph {
    let edges = build_connections(records, config);
    let clusters = extract_clusters(records, &edges, config.cluster_min_strength);
    let orphans = find_orphans(records.len(), &edges);

    debug!(
        "event=graph_analyze module=graph status=ok sources={} edges={} clusters={} orphans={}",
        records.len(),
        edges.len(),
        clusters.len(),
        orphans.len()
    );

    ConnectionGraph {
        edges,
        clusters,
        orphans,
    }
}
