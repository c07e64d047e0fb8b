//! Engine vocabularies and thresholds.
//!
//! # Responsibility
//! - Hold every tunable input of the relationship engine in one value.
//! - Load overrides from a JSON file; absent fields keep built-in defaults.
//!
//! # Invariants
//! - Engine functions receive configuration explicitly; there is no global copy.
//! - Vocabulary entries are lowercase so they match lowercased record text.

use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Minimum edge strength for an edge to join records into a cluster.
pub const DEFAULT_CLUSTER_MIN_STRENGTH: usize = 2;
/// Minimum shared domain keywords for a keyword-overlap edge.
pub const DEFAULT_KEYWORD_MIN_OVERLAP: usize = 3;

const DEFAULT_DOMAIN_KEYWORDS: &[&str] = &[
    "agents",
    "openclaw",
    "crypto",
    "bitcoin",
    "ethereum",
    "saas",
    "macro",
    "trading",
    "venture",
    "startup",
    "llm",
    "market",
    "capital",
    "inflation",
    "geopolitics",
    "platform",
];

const DEFAULT_ENTITIES: &[&str] = &[
    "bitcoin",
    "btc",
    "ethereum",
    "eth",
    "crypto",
    "ai",
    "agents",
    "llm",
    "fed",
    "inflation",
    "recession",
    "economy",
    "china",
    "saas",
    "startup",
    "venture",
    "tesla",
    "nvidia",
    "trump",
    "solana",
];

const DEFAULT_POSITIVE_KEYWORDS: &[&str] = &[
    "bullish",
    "growth",
    "increase",
    "rise",
    "surge",
    "rally",
    "optimistic",
    "positive",
    "strong",
    "recovery",
    "expansion",
    "success",
];

const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "bearish",
    "decline",
    "decrease",
    "fall",
    "crash",
    "dump",
    "pessimistic",
    "negative",
    "weak",
    "recession",
    "contraction",
    "failure",
];

/// Text span used when scoring a record's sentiment toward an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum SentimentScope {
    /// Whole claims text; the same polarity is reused for every entity.
    #[default]
    WholeClaims,
    /// Only text within `radius` bytes around each mention of the entity.
    EntityWindow { radius: usize },
}

/// Vocabularies and thresholds consumed by the relationship engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Terms matched as substrings of claims text for keyword-overlap edges.
    pub domain_keywords: Vec<String>,
    /// Named subjects tracked by conflict detection, in report order.
    pub entities: Vec<String>,
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    /// Edges weaker than this never join a cluster.
    pub cluster_min_strength: usize,
    /// Keyword-overlap edges need at least this many shared keywords.
    pub keyword_min_overlap: usize,
    pub sentiment_scope: SentimentScope,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domain_keywords: to_owned_list(DEFAULT_DOMAIN_KEYWORDS),
            entities: to_owned_list(DEFAULT_ENTITIES),
            positive_keywords: to_owned_list(DEFAULT_POSITIVE_KEYWORDS),
            negative_keywords: to_owned_list(DEFAULT_NEGATIVE_KEYWORDS),
            cluster_min_strength: DEFAULT_CLUSTER_MIN_STRENGTH,
            keyword_min_overlap: DEFAULT_KEYWORD_MIN_OVERLAP,
            sentiment_scope: SentimentScope::WholeClaims,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document and normalizes vocabulary casing.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: EngineConfig = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.normalize();
        Ok(config)
    }

    /// Lowercases and trims vocabularies, dropping blanks and duplicates.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.domain_keywords,
            &mut self.entities,
            &mut self.positive_keywords,
            &mut self.negative_keywords,
        ] {
            let mut normalized = Vec::<String>::with_capacity(list.len());
            for value in list.iter() {
                let value = value.trim().to_lowercase();
                if !value.is_empty() && !normalized.contains(&value) {
                    normalized.push(value);
                }
            }
            *list = normalized;
        }
    }
}

/// Loads engine configuration from a JSON file.
///
/// # Errors
/// - Returns [`ConfigError::Io`] when the file cannot be read.
/// - Returns [`ConfigError::Parse`] when the JSON does not match the schema.
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    let config = EngineConfig::from_json_str(&raw)?;
    info!(
        "event=config_load module=config status=ok keywords={} entities={} cluster_min_strength={} keyword_min_overlap={}",
        config.domain_keywords.len(),
        config.entities.len(),
        config.cluster_min_strength,
        config.keyword_min_overlap
    );
    Ok(config)
}

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{EngineConfig, SentimentScope};

    #[test]
    fn defaults_keep_fixed_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.cluster_min_strength, 2);
        assert_eq!(config.keyword_min_overlap, 3);
        assert_eq!(config.sentiment_scope, SentimentScope::WholeClaims);
        assert!(config.entities.contains(&"bitcoin".to_string()));
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let config = EngineConfig::from_json_str(
            r#"{"entities": [" Apple ", "apple", ""], "keyword_min_overlap": 2}"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.entities, vec!["apple".to_string()]);
        assert_eq!(config.keyword_min_overlap, 2);
        assert_eq!(config.cluster_min_strength, 2);
        assert_eq!(
            config.domain_keywords,
            EngineConfig::default().domain_keywords
        );
    }

    #[test]
    fn sentiment_scope_uses_tagged_wire_shape() {
        let config = EngineConfig::from_json_str(
            r#"{"sentiment_scope": {"mode": "entity_window", "radius": 40}}"#,
        )
        .expect("scope config should parse");
        assert_eq!(
            config.sentiment_scope,
            SentimentScope::EntityWindow { radius: 40 }
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(EngineConfig::from_json_str("{not json").is_err());
    }
}
