//! Topic cluster extraction.
//!
//! # Responsibility
//! - Group records into connected components over strong edges.
//! - Label each component with its most frequent tags.
//!
//! # Invariants
//! - Only edges with `strength >= cluster_min_strength` join records.
//! - Traversal is iterative and visits nodes in recursive pre-order, so
//!   member order is deterministic for a given record and edge order.
//! - Components with fewer than two members are not clusters.

use super::{Cluster, ConnectionEdge};
use crate::model::source::SourceRecord;

const TOPIC_TAG_LIMIT: usize = 3;
/// Topic label used when no member carries a tag.
pub const MIXED_TOPIC: &str = "Mixed";

/// Extracts clusters from edges at or above `min_strength`.
pub fn extract_clusters(
    records: &[SourceRecord],
    edges: &[ConnectionEdge],
    min_strength: usize,
) -> Vec<Cluster> {
    let adjacency = build_adjacency(records.len(), edges, min_strength);
    let mut visited = vec![false; records.len()];
    let mut clusters = Vec::new();

    for start in 0..records.len() {
        if visited[start] {
            continue;
        }

        let mut members = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            members.push(node);
            stack.extend(
                adjacency[node]
                    .iter()
                    .rev()
                    .copied()
                    .filter(|neighbor| !visited[*neighbor]),
            );
        }

        if members.len() >= 2 {
            clusters.push(Cluster {
                topic: cluster_topic(records, &members),
                members,
            });
        }
    }

    clusters
}

/// Builds an index-addressed adjacency list; neighbor order follows edge order.
///
/// Edges referencing positions outside `node_count` are ignored.
pub fn build_adjacency(
    node_count: usize,
    edges: &[ConnectionEdge],
    min_strength: usize,
) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); node_count];
    for edge in edges {
        if edge.strength < min_strength || edge.a >= node_count || edge.b >= node_count {
            continue;
        }
        adjacency[edge.a].push(edge.b);
        adjacency[edge.b].push(edge.a);
    }
    adjacency
}

/// Joins the top tags of the members, most frequent first.
///
/// Ties keep the order in which tags were first seen while walking members.
pub fn cluster_topic(records: &[SourceRecord], members: &[usize]) -> String {
    let mut tally = Vec::<(&str, usize)>::new();
    for tag in members
        .iter()
        .filter_map(|index| records.get(*index))
        .flat_map(|record| record.tags.iter())
    {
        match tally.iter_mut().find(|(seen, _)| *seen == tag.as_str()) {
            Some((_, count)) => *count += 1,
            None => tally.push((tag.as_str(), 1)),
        }
    }

    if tally.is_empty() {
        return MIXED_TOPIC.to_string();
    }

    tally.sort_by(|left, right| right.1.cmp(&left.1));
    tally
        .iter()
        .take(TOPIC_TAG_LIMIT)
        .map(|(tag, _)| *tag)
        .collect::<Vec<_>>()
        .join(", ")
}
