//! Heuristic conflict detection between sources.
//!
//! # Responsibility
//! - Flag record pairs expressing opposite sentiment about a shared entity.
//! - Provide grouping helpers for per-pair reporting.
//!
//! # Invariants
//! - Output is a review signal, never a verdict.
//! - Detection is independent of the connection graph.

pub mod detector;
pub mod sentiment;

use serde::{Deserialize, Serialize};

pub use detector::{common_entities, find_conflicts};
pub use sentiment::{classify, entity_context, sentiment_toward, Sentiment};

/// One opposite-sentiment observation about a shared entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFinding {
    /// Position of the earlier record.
    pub a: usize,
    /// Position of the later record.
    pub b: usize,
    pub entity: String,
    pub sentiment_a: Sentiment,
    pub sentiment_b: Sentiment,
}

/// Findings sharing one record pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairConflicts<'f> {
    pub a: usize,
    pub b: usize,
    pub findings: Vec<&'f ConflictFinding>,
}

/// Groups consecutive findings by `(a, b)`, preserving scan order.
pub fn group_by_pair(findings: &[ConflictFinding]) -> Vec<PairConflicts<'_>> {
    let mut groups = Vec::<PairConflicts<'_>>::new();
    for finding in findings {
        match groups.last_mut() {
            Some(group) if group.a == finding.a && group.b == finding.b => {
                group.findings.push(finding);
            }
            _ => groups.push(PairConflicts {
                a: finding.a,
                b: finding.b,
                findings: vec![finding],
            }),
        }
    }
    groups
}
