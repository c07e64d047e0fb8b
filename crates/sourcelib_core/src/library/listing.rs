//! Filtered source listing.
//!
//! # Invariants
//! - Listing is sorted by date descending; undated sources come last.
//! - Ties keep repository (slug) order.

use super::freshness::{calculate_freshness, parse_source_date, Freshness};
use crate::model::source::{normalize_tag, SourceMeta};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;

/// Listing filter options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFilter {
    /// Exact `**Type:**` match.
    pub kind: Option<String>,
    /// Single tag match, normalized before comparison.
    pub tag: Option<String>,
    /// Annotate each item with its freshness tier.
    pub with_freshness: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceListing {
    pub meta: SourceMeta,
    pub freshness: Option<Freshness>,
}

/// Applies `filter` to `metas` and sorts the survivors newest first.
pub fn list_sources(
    metas: Vec<SourceMeta>,
    filter: &SourceFilter,
    today: NaiveDate,
) -> Vec<SourceListing> {
    let tag = filter.tag.as_deref().and_then(normalize_tag);

    let mut items = metas
        .into_iter()
        .filter(|meta| filter.kind.as_ref().map_or(true, |kind| &meta.kind == kind))
        .filter(|meta| tag.as_ref().map_or(true, |tag| meta.tags.contains(tag)))
        .map(|meta| {
            let freshness = filter
                .with_freshness
                .then(|| calculate_freshness(&meta.date, &meta.decay, today));
            SourceListing { meta, freshness }
        })
        .collect::<Vec<_>>();

    items.sort_by_key(|item| Reverse(parse_source_date(&item.meta.date)));
    items
}

/// Formats one listing line as `slug (type) - title`, prefixed by freshness when present.
pub fn format_listing_line(item: &SourceListing) -> String {
    let base = format!(
        "{} ({}) - {}",
        item.meta.slug, item.meta.kind, item.meta.title
    );
    match item.freshness {
        Some(freshness) => format!(
            "{} {base} ({}d ago)",
            freshness.tier.marker(),
            freshness.days
        ),
        None => base,
    }
}
