//! Library views over the source corpus.
//!
//! # Responsibility
//! - Listing with type/tag filters and freshness tiers.
//! - Aggregate statistics, tag suggestion and related-source lookup.
//! - Topic briefings built from matching sources' claims.
//!
//! # Invariants
//! - Nothing here writes to storage.

pub mod freshness;
pub mod listing;
pub mod stats;
pub mod tags;
pub mod teach;

pub use freshness::{calculate_freshness, Freshness, FreshnessTier};
pub use listing::{format_listing_line, list_sources, SourceFilter, SourceListing};
pub use stats::{library_stats, render_stats, LibraryStats};
pub use tags::{related_sources, suggest_tags};
pub use teach::{build_teach_report, KeyInsight, TeachReport, TeachSource, DEFAULT_TEACH_LIMIT};
