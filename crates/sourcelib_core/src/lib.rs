//! Core logic for the source library.
//!
//! The relationship engine (`graph`, `conflict`) is pure over a record slice
//! and an [`EngineConfig`]; storage, rendering and logging live around it.

pub mod config;
pub mod conflict;
pub mod graph;
pub mod library;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use config::{load_config, ConfigError, EngineConfig, SentimentScope};
pub use conflict::{find_conflicts, ConflictFinding, Sentiment};
pub use graph::{
    analyze_connections, build_connections, extract_clusters, find_orphans, Cluster,
    ConnectionEdge, ConnectionGraph, EdgeKind,
};
pub use library::{
    format_listing_line, render_stats, suggest_tags, Freshness, FreshnessTier, KeyInsight,
    LibraryStats, SourceFilter, SourceListing, TeachReport, DEFAULT_TEACH_LIMIT,
};
pub use logging::{
    default_log_level, init_logging, logging_status, LoggingError, LoggingStatus,
};
pub use model::source::{slugify, SourceMeta, SourceRecord};
pub use repo::source_repo::{
    FsSourceRepository, RepoError, RepoResult, SourceDocument, SourceRepository,
};
pub use report::{render_connections, ReportView};
pub use service::library_service::{LibraryError, LibraryResult, LibraryService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
