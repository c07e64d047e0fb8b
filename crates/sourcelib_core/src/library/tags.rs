//! Tag suggestion and related-source lookup.

use crate::model::source::SourceRecord;

/// Minimum shared tags for a source to count as related.
pub const RELATED_MIN_SHARED_TAGS: usize = 2;

const KEYWORD_TAGS: &[(&str, &[&str])] = &[
    ("bitcoin", &["crypto", "bitcoin"]),
    ("btc", &["crypto", "bitcoin"]),
    ("ethereum", &["crypto", "ethereum"]),
    ("eth", &["crypto", "ethereum"]),
    ("solana", &["crypto", "solana"]),
    ("defi", &["crypto", "defi"]),
    ("ai", &["ai-agents"]),
    ("llm", &["ai-agents"]),
    ("agent", &["ai-agents"]),
    ("macro", &["macro", "economics"]),
    ("fed", &["macro", "economics"]),
    ("inflation", &["macro", "economics"]),
    ("recession", &["macro", "economics"]),
    ("geopolitics", &["geopolitics"]),
    ("war", &["geopolitics"]),
    ("startup", &["venture", "startups"]),
    ("vc", &["venture", "startups"]),
    ("security", &["security"]),
    ("exploit", &["security"]),
    ("saas", &["saas", "business"]),
    ("trump", &["politics"]),
    ("election", &["politics"]),
];

/// Suggests tags for free text by substring keyword matching.
///
/// Tags keep first-seen order and are deduplicated.
pub fn suggest_tags(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tags = Vec::<String>::new();
    for (keyword, mapped) in KEYWORD_TAGS {
        if !lowered.contains(keyword) {
            continue;
        }
        for tag in mapped.iter() {
            if !tags.iter().any(|seen| seen == tag) {
                tags.push(tag.to_string());
            }
        }
    }
    tags
}

/// Records other than `slug` sharing at least [`RELATED_MIN_SHARED_TAGS`] of `tags`.
pub fn related_sources<'r>(
    slug: &str,
    tags: &[String],
    records: &'r [SourceRecord],
) -> Vec<&'r SourceRecord> {
    records
        .iter()
        .filter(|record| record.slug != slug)
        .filter(|record| {
            tags.iter().filter(|tag| record.tags.contains(tag)).count() >= RELATED_MIN_SHARED_TAGS
        })
        .collect()
}
