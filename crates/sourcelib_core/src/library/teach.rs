//! Topic briefing over the corpus.
//!
//! # Responsibility
//! - Select sources mentioning a topic, oldest first.
//! - Surface claim keywords shared across sources and a per-source timeline.
//!
//! # Invariants
//! - A source matches when its lowercased text contains any topic word.
//! - Every insight keyword is backed by claims from at least two sources.

use super::freshness::parse_source_date;
use crate::model::source::{section_lines, SourceMeta, CLAIMS_HEADING};
use crate::repo::source_repo::SourceDocument;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Default cap on briefed sources.
pub const DEFAULT_TEACH_LIMIT: usize = 20;

const ANALYSIS_HEADING: &str = "## Analysis";
const MAX_INSIGHTS: usize = 5;
const CLAIMS_PER_INSIGHT: usize = 3;
const MIN_INSIGHT_SOURCES: usize = 2;
const MIN_KEYWORD_CHARS: usize = 4;

const STOPWORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "been", "were", "they", "their", "them", "then",
    "than", "when", "what", "which", "where", "will", "would", "could", "should", "about",
    "into", "more", "most", "also", "just", "like", "over", "such", "some", "only", "other",
    "each", "every", "between", "both", "through", "during", "before", "after", "above",
    "below",
];

/// One source as it appears in a briefing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeachSource {
    pub slug: String,
    pub title: String,
    pub date: String,
    /// First sentence of the Analysis section, or empty.
    pub analysis_summary: String,
    /// Key Claims lines without list markers, original casing.
    pub claims: Vec<String>,
}

impl TeachSource {
    pub fn parse(content: &str, slug: &str) -> Self {
        let meta = SourceMeta::parse(content, slug);
        let analysis = section_lines(content, ANALYSIS_HEADING).join("\n");
        Self {
            slug: meta.slug,
            title: meta.title,
            date: meta.date,
            analysis_summary: first_sentence(&analysis),
            claims: claim_lines(content),
        }
    }

    pub fn first_claim(&self) -> Option<&str> {
        self.claims.first().map(String::as_str)
    }
}

/// Keyword shared by claims of several sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInsight {
    pub keyword: String,
    /// Distinct claims mentioning the keyword, in briefing order.
    pub claims: Vec<String>,
}

/// Everything the corpus says about one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeachReport {
    pub topic: String,
    pub sources: Vec<TeachSource>,
    pub insights: Vec<KeyInsight>,
}

impl TeachReport {
    /// Sources carrying claims, each with its first claim.
    pub fn timeline(&self) -> impl Iterator<Item = (&TeachSource, &str)> {
        self.sources
            .iter()
            .filter_map(|source| source.first_claim().map(|claim| (source, claim)))
    }
}

/// Selects matching sources and derives insights from their claims.
pub fn build_teach_report(documents: &[SourceDocument], topic: &str, limit: usize) -> TeachReport {
    let sources = select_sources(documents, topic, limit);
    let insights = key_insights(&sources);
    TeachReport {
        topic: topic.trim().to_string(),
        sources,
        insights,
    }
}

/// Sources mentioning any word of `topic`, oldest first, undated last.
///
/// A blank topic matches nothing.
pub fn select_sources(documents: &[SourceDocument], topic: &str, limit: usize) -> Vec<TeachSource> {
    let words = topic
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut sources = documents
        .iter()
        .filter(|document| {
            let lowered = document.content.to_lowercase();
            words.iter().any(|word| lowered.contains(word.as_str()))
        })
        .map(|document| TeachSource::parse(&document.content, &document.slug))
        .collect::<Vec<_>>();

    sources.sort_by_key(|source| {
        let date = parse_source_date(&source.date);
        (date.is_none(), date)
    });
    sources.truncate(limit);
    sources
}

/// Groups claims by keyword and keeps the most mentioned cross-source ones.
///
/// Ties keep the order in which keywords were first seen.
pub fn key_insights(sources: &[TeachSource]) -> Vec<KeyInsight> {
    let mut groups = Vec::<(String, Vec<(&str, &str)>)>::new();
    let mut positions = HashMap::<String, usize>::new();

    for source in sources {
        for claim in &source.claims {
            for word in claim_keywords(claim) {
                let mention = (claim.as_str(), source.slug.as_str());
                match positions.get(&word) {
                    Some(&position) => groups[position].1.push(mention),
                    None => {
                        positions.insert(word.clone(), groups.len());
                        groups.push((word, vec![mention]));
                    }
                }
            }
        }
    }

    groups.retain(|(_, mentions)| {
        mentions
            .iter()
            .map(|(_, slug)| *slug)
            .collect::<HashSet<_>>()
            .len()
            >= MIN_INSIGHT_SOURCES
    });
    groups.sort_by(|left, right| right.1.len().cmp(&left.1.len()));

    groups
        .into_iter()
        .take(MAX_INSIGHTS)
        .map(|(keyword, mentions)| {
            let mut claims = Vec::<String>::new();
            for (claim, _) in mentions {
                if claims.len() == CLAIMS_PER_INSIGHT {
                    break;
                }
                if !claims.iter().any(|seen| seen == claim) {
                    claims.push(claim.to_string());
                }
            }
            KeyInsight { keyword, claims }
        })
        .collect()
}

fn claim_keywords(claim: &str) -> Vec<String> {
    claim
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS && !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

fn claim_lines(content: &str) -> Vec<String> {
    section_lines(content, CLAIMS_HEADING)
        .into_iter()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("- ").unwrap_or(line).trim().to_string()
        })
        .filter(|claim| !claim.is_empty())
        .collect()
}

fn first_sentence(text: &str) -> String {
    let first = text
        .trim()
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim();
    if first.is_empty() {
        String::new()
    } else {
        format!("{first}.")
    }
}

#[cfg(test)]
mod tests {
    use super::{build_teach_report, key_insights, select_sources, TeachSource};
    use crate::repo::source_repo::SourceDocument;

    fn document(slug: &str, date: &str, claims: &[&str], analysis: &str) -> SourceDocument {
        let claims = claims
            .iter()
            .map(|claim| format!("- {claim}"))
            .collect::<Vec<_>>()
            .join("\n");
        let content = format!(
            "# {slug}\n**Date:** {date}\n\n## Key Claims\n{claims}\n\n## Analysis\n{analysis}\n"
        );
        SourceDocument {
            slug: slug.to_string(),
            size_bytes: content.len() as u64,
            content,
        }
    }

    fn corpus() -> Vec<SourceDocument> {
        vec![
            document("new", "2026-02-01", &["Bitcoin adoption stalls"], ""),
            document("undated", "", &["Bitcoin miners consolidate"], ""),
            document("old", "2025-01-01", &["Bitcoin adoption grows"], "Solid case. More later!"),
            document("other", "2026-01-01", &["Gardening tips"], ""),
        ]
    }

    fn slugs(sources: &[TeachSource]) -> Vec<&str> {
        sources.iter().map(|source| source.slug.as_str()).collect()
    }

    #[test]
    fn selects_matching_sources_oldest_first_with_undated_last() {
        let documents = corpus();
        assert_eq!(
            slugs(&select_sources(&documents, "Bitcoin", 20)),
            vec!["old", "new", "undated"]
        );
        assert_eq!(slugs(&select_sources(&documents, "bitcoin", 2)), vec!["old", "new"]);
        assert_eq!(
            slugs(&select_sources(&documents, "quantum gardening", 20)),
            vec!["other"]
        );
        assert!(select_sources(&documents, "   ", 20).is_empty());
    }

    #[test]
    fn parse_strips_markers_and_keeps_first_analysis_sentence() {
        let documents = corpus();
        let old = TeachSource::parse(&documents[2].content, "old");
        assert_eq!(old.claims, vec!["Bitcoin adoption grows"]);
        assert_eq!(old.analysis_summary, "Solid case.");
        assert_eq!(TeachSource::parse(&documents[0].content, "new").analysis_summary, "");
    }

    #[test]
    fn insights_need_two_sources_and_rank_by_mentions() {
        let sources = select_sources(&corpus(), "bitcoin", 20);
        let insights = key_insights(&sources);
        let keywords = insights
            .iter()
            .map(|insight| insight.keyword.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keywords, vec!["bitcoin", "adoption"]);
        assert_eq!(
            insights[0].claims,
            vec![
                "Bitcoin adoption grows",
                "Bitcoin adoption stalls",
                "Bitcoin miners consolidate"
            ]
        );
    }

    #[test]
    fn repeated_word_in_one_source_is_not_an_insight() {
        let documents = vec![
            document("solo", "2026-01-01", &["Tokens tokens tokens"], ""),
            document("plain", "2026-01-02", &["Nothing shared"], ""),
        ];
        let report = build_teach_report(&documents, "tokens shared", 20);
        assert_eq!(report.sources.len(), 2);
        assert!(report.insights.is_empty());
    }

    #[test]
    fn stopwords_and_short_words_are_ignored() {
        let documents = vec![
            document("a", "2026-01-01", &["This would matter"], ""),
            document("b", "2026-01-02", &["This would matter too"], ""),
        ];
        let report = build_teach_report(&documents, "matter", 20);
        let keywords = report
            .insights
            .iter()
            .map(|insight| insight.keyword.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keywords, vec!["matter"]);
    }

    #[test]
    fn insights_and_their_claims_are_capped() {
        let documents = (1..=4)
            .map(|n| {
                let claim = format!("Rates rise case{n}");
                document(
                    &format!("s{n}"),
                    &format!("2026-01-0{n}"),
                    &[claim.as_str(), "aaaa bbbb cccc dddd eeee ffff"],
                    "",
                )
            })
            .collect::<Vec<_>>();
        let report = build_teach_report(&documents, "rates", 20);
        assert_eq!(report.insights.len(), 5);
        assert_eq!(report.insights[0].keyword, "rates");
        assert_eq!(report.insights[0].claims.len(), 3);
        assert_eq!(report.insights[0].claims[2], "Rates rise case3");
    }

    #[test]
    fn timeline_skips_sources_without_claims() {
        let mut documents = corpus();
        documents.push(SourceDocument {
            slug: "quiet".to_string(),
            content: "# quiet\n**Date:** 2024-01-01\nbitcoin mention only\n".to_string(),
            size_bytes: 0,
        });
        let report = build_teach_report(&documents, "bitcoin", 20);
        assert_eq!(report.sources[0].slug, "quiet");
        let timeline = report
            .timeline()
            .map(|(source, claim)| (source.slug.as_str(), claim))
            .collect::<Vec<_>>();
        assert_eq!(timeline[0], ("old", "Bitcoin adoption grows"));
        assert_eq!(timeline.len(), 3);
    }
}
