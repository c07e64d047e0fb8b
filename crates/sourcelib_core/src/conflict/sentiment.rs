//! Keyword polarity classification.

use crate::config::{EngineConfig, SentimentScope};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Polarity of a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Mixed,
    Neutral,
}

impl Sentiment {
    /// Returns whether `self` and `other` are a strict positive/negative pair.
    pub fn opposes(self, other: Sentiment) -> bool {
        matches!(
            (self, other),
            (Sentiment::Positive, Sentiment::Negative) | (Sentiment::Negative, Sentiment::Positive)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Mixed => "mixed",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `text` by substring presence of configured sentiment keywords.
pub fn classify(text: &str, config: &EngineConfig) -> Sentiment {
    let has_positive = config
        .positive_keywords
        .iter()
        .any(|keyword| text.contains(keyword.as_str()));
    let has_negative = config
        .negative_keywords
        .iter()
        .any(|keyword| text.contains(keyword.as_str()));

    match (has_positive, has_negative) {
        (true, false) => Sentiment::Positive,
        (false, true) => Sentiment::Negative,
        (true, true) => Sentiment::Mixed,
        (false, false) => Sentiment::Neutral,
    }
}

/// Classifies a claims text toward one entity according to the configured scope.
pub fn sentiment_toward(claims_text: &str, entity: &str, config: &EngineConfig) -> Sentiment {
    match config.sentiment_scope {
        SentimentScope::WholeClaims => classify(claims_text, config),
        SentimentScope::EntityWindow { radius } => {
            classify(&entity_context(claims_text, entity, radius), config)
        }
    }
}

/// Collects the text within `radius` bytes around every mention of `entity`.
///
/// Window edges are snapped outward to char boundaries; overlapping windows
/// are merged. Returns an empty string when `entity` does not occur.
pub fn entity_context(text: &str, entity: &str, radius: usize) -> String {
    if entity.is_empty() {
        return String::new();
    }

    let mut spans = Vec::<(usize, usize)>::new();
    for (start, matched) in text.match_indices(entity) {
        let from = floor_char_boundary(text, start.saturating_sub(radius));
        let end = start.saturating_add(matched.len()).saturating_add(radius);
        let to = ceil_char_boundary(text, end);
        match spans.last_mut() {
            Some(last) if from <= last.1 => last.1 = last.1.max(to),
            _ => spans.push((from, to)),
        }
    }

    spans
        .iter()
        .map(|(from, to)| &text[*from..*to])
        .collect::<Vec<_>>()
        .join(" ")
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
