//! Pairwise sentiment-conflict scan.
//!
//! # Invariants
//! - Only records with non-blank claims take part.
//! - Each finding is emitted once, with `a` before `b` in record order.
//! - Within a pair, findings follow the configured entity order.

use super::sentiment::sentiment_toward;
use super::ConflictFinding;
use crate::config::EngineConfig;
use crate::model::source::SourceRecord;
use log::debug;

/// Scans every record pair for opposite sentiment about shared entities.
pub fn find_conflicts(records: &[SourceRecord], config: &EngineConfig) -> Vec<ConflictFinding> {
    let candidates = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.has_claims())
        .collect::<Vec<_>>();

    let mut findings = Vec::new();
    for (pos, (i, left)) in candidates.iter().enumerate() {
        for (j, right) in candidates.iter().skip(pos + 1) {
            for entity in common_entities(left, right, config) {
                let sentiment_a = sentiment_toward(&left.claims_text, entity, config);
                let sentiment_b = sentiment_toward(&right.claims_text, entity, config);
                if sentiment_a.opposes(sentiment_b) {
                    findings.push(ConflictFinding {
                        a: *i,
                        b: *j,
                        entity: entity.to_string(),
                        sentiment_a,
                        sentiment_b,
                    });
                }
            }
        }
    }

    debug!(
        "event=conflict_scan module=conflict status=ok candidates={} findings={}",
        candidates.len(),
        findings.len()
    );
    findings
}

/// Entities mentioned in both records' claims, in configured order.
pub fn common_entities<'c>(
    left: &SourceRecord,
    right: &SourceRecord,
    config: &'c EngineConfig,
) -> Vec<&'c str> {
    config
        .entities
        .iter()
        .map(String::as_str)
        .filter(|entity| left.claims_text.contains(entity) && right.claims_text.contains(entity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{common_entities, find_conflicts};
    use crate::config::EngineConfig;
    use crate::conflict::sentiment::Sentiment;
    use crate::model::source::SourceRecord;

    #[test]
    fn opposite_sentiment_on_shared_entity_is_reported_once() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("x", "X", &["crypto"], "bitcoin is bullish and surging"),
            SourceRecord::new("y", "Y", &["crypto"], "bitcoin crashing amid recession fears"),
        ];
        let findings = find_conflicts(&records, &config);
        assert_eq!(findings.len(), 1);
        assert_eq!((findings[0].a, findings[0].b), (0, 1));
        assert_eq!(findings[0].entity, "bitcoin");
        assert_eq!(findings[0].sentiment_a, Sentiment::Positive);
        assert_eq!(findings[0].sentiment_b, Sentiment::Negative);
    }

    #[test]
    fn records_without_claims_are_skipped_but_keep_positions() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("empty", "Empty", &[], "   "),
            SourceRecord::new("x", "X", &[], "tesla rally"),
            SourceRecord::new("y", "Y", &[], "tesla dump"),
        ];
        let findings = find_conflicts(&records, &config);
        assert_eq!(findings.len(), 1);
        assert_eq!((findings[0].a, findings[0].b), (1, 2));
    }

    #[test]
    fn mixed_or_neutral_sides_never_conflict() {
        let config = EngineConfig::default();
        let records = vec![
            SourceRecord::new("a", "A", &[], "nvidia growth despite weak guidance"),
            SourceRecord::new("b", "B", &[], "nvidia decline"),
            SourceRecord::new("c", "C", &[], "nvidia reports"),
        ];
        assert!(find_conflicts(&records, &config).is_empty());
    }

    #[test]
    fn common_entities_follow_configured_order() {
        let config = EngineConfig::default();
        let left = SourceRecord::new("a", "A", &[], "solana and bitcoin");
        let right = SourceRecord::new("b", "B", &[], "bitcoin then solana");
        assert_eq!(common_entities(&left, &right, &config), vec!["bitcoin", "solana"]);
    }
}
