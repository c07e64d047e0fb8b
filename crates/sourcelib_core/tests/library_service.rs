use chrono::NaiveDate;
use sourcelib_core::{EngineConfig, FsSourceRepository, LibraryService, ReportView, SourceFilter};
use std::fs;
use std::path::Path;

fn write_source(root: &Path, slug: &str, content: &str) {
    let dir = root.join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("summary.md"), content).unwrap();
}

fn summary(title: &str, date: &str, kind: &str, tags: &str, claims: &[&str]) -> String {
    let claims = claims
        .iter()
        .map(|claim| format!("- {claim}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "# {title}\n\n**Source:** https://example.com/{title}\n**Author:** tester\n**Date:** {date}\n**Type:** {kind}\n**Tags:** {tags}\n**Decay:** normal\n\n## Key Claims\n{claims}\n\n## Notable Quotes\n- \"quote\"\n\n## Analysis\nNothing bullish here.\n"
    )
}

fn seeded_library() -> (tempfile::TempDir, LibraryService<FsSourceRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_source(
        root,
        "btc-bull",
        &summary(
            "Bull",
            "2026-03-30",
            "article",
            "crypto, bitcoin",
            &["Bitcoin is bullish", "ETF demand surging"],
        ),
    );
    write_source(
        root,
        "btc-bear",
        &summary(
            "Bear",
            "2026-03-01",
            "tweet",
            "crypto, macro",
            &["Bitcoin crashing amid recession fears"],
        ),
    );
    write_source(
        root,
        "agents-a",
        &summary("Agents A", "2026-02-01", "article", "ai-agents, saas", &[]),
    );
    write_source(
        root,
        "agents-b",
        &summary("Agents B", "", "article", "AI-Agents, SaaS", &[]),
    );
    write_source(root, "scrap", "no heading, no tags, nothing");
    fs::write(root.join("README.md"), "# Sources").unwrap();

    let service = LibraryService::new(FsSourceRepository::new(root), EngineConfig::default());
    (dir, service)
}

#[test]
fn graph_report_covers_counts_clusters_edges_and_orphans() {
    let (_dir, service) = seeded_library();
    let report = service.connections_report(ReportView::Graph).unwrap();

    assert!(report.contains("Total sources: 5\nConnections: 2\nClusters: 1\nOrphans: 1\n"));
    assert!(report.contains("### 1. ai-agents, saas (2)\n- Agents A\n- Agents B"));
    assert!(report.contains("Agents A ↔ Agents B (ai-agents, saas)"));
    assert!(report.contains("Bear ↔ Bull (crypto)"));
    assert!(report.ends_with("## Orphans\n\n- scrap\n"));
}

#[test]
fn orphan_and_cluster_views_are_exclusive_renderings() {
    let (_dir, service) = seeded_library();
    let orphans = service.connections_report(ReportView::Orphans).unwrap();
    assert_eq!(orphans, "# Orphan Sources\n\n- scrap (no tags)\n");

    let clusters = service.connections_report(ReportView::Clusters).unwrap();
    assert!(clusters.starts_with("# Source Clusters\n\n## 1. ai-agents, saas (2 sources)\n"));
    assert!(!clusters.contains("Orphan"));
}

#[test]
fn conflicts_report_lists_bitcoin_disagreement() {
    let (_dir, service) = seeded_library();
    let report = service.conflicts_report().unwrap();

    assert!(report.starts_with("Analyzing 2 sources for conflicts...\n"));
    assert!(report.contains("Found 1 potential conflict(s):"));
    assert!(report
        .contains("## 1. Bear vs Bull\n  Conflicting on: bitcoin (negative vs positive)"));
}

#[test]
fn empty_library_reports_no_sources() {
    let dir = tempfile::tempdir().unwrap();
    let service = LibraryService::new(
        FsSourceRepository::new(dir.path().join("missing")),
        EngineConfig::default(),
    );
    assert_eq!(
        service.connections_report(ReportView::Graph).unwrap(),
        "No sources found.\n"
    );
    assert_eq!(
        service.conflicts_report().unwrap(),
        "Need at least 2 sources with Key Claims.\n"
    );
}

#[test]
fn listing_filters_sorts_and_annotates_freshness() {
    let (_dir, service) = seeded_library();
    let today = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();

    let all = service.list(&SourceFilter::default(), today).unwrap();
    let slugs = all
        .iter()
        .map(|item| item.meta.slug.as_str())
        .collect::<Vec<_>>();
    assert_eq!(slugs, vec!["btc-bull", "btc-bear", "agents-a", "agents-b", "scrap"]);

    let filter = SourceFilter {
        kind: Some("article".to_string()),
        tag: Some("crypto".to_string()),
        with_freshness: true,
    };
    let crypto_articles = service.list(&filter, today).unwrap();
    assert_eq!(crypto_articles.len(), 1);
    assert_eq!(crypto_articles[0].meta.slug, "btc-bull");
    assert_eq!(crypto_articles[0].freshness.map(|f| f.days), Some(1));
}

#[test]
fn stats_and_related_read_the_same_corpus() {
    let (_dir, service) = seeded_library();

    let stats = service.stats().unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.by_type.get("article"), Some(&3));
    assert_eq!(stats.by_type.get("unknown"), Some(&1));
    assert_eq!(stats.by_tag.get("crypto"), Some(&2));
    assert!(stats.disk_usage_bytes > 0);

    let related = service.related("agents-a").unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].slug, "agents-b");
}

#[test]
fn json_output_round_trips_through_serde_json() {
    let (_dir, service) = seeded_library();
    let graph: serde_json::Value =
        serde_json::from_str(&service.connections_json().unwrap()).unwrap();
    assert_eq!(graph["total_sources"], 5);
    assert_eq!(graph["orphans"][0], "scrap");

    let conflicts: serde_json::Value =
        serde_json::from_str(&service.conflicts_json().unwrap()).unwrap();
    assert_eq!(conflicts["findings"][0]["a"], "btc-bear");
    assert_eq!(conflicts["findings"][0]["entity"], "bitcoin");
}

#[test]
fn teach_briefing_orders_sources_and_shares_insights() {
    let (_dir, service) = seeded_library();
    assert_eq!(
        service.teach_report("bitcoin", 20).unwrap(),
        "# What you know about: bitcoin\n\n\
         ## Sources (2)\n\
         - Bear (2026-03-01) - Nothing bullish here.\n\
         - Bull (2026-03-30) - Nothing bullish here.\n\n\
         ## Key Insights\n\
         **Bitcoin:**\n\
         - Bitcoin crashing amid recession fears\n\
         - Bitcoin is bullish\n\n\
         ## Timeline\n\
         **2026-03-01:** Bear\n\
         - Bitcoin crashing amid recession fears\n\n\
         **2026-03-30:** Bull\n\
         - Bitcoin is bullish\n"
    );

    let oldest = service.teach("bitcoin", 1).unwrap();
    assert_eq!(oldest.sources.len(), 1);
    assert_eq!(oldest.sources[0].slug, "btc-bear");

    assert_eq!(
        service.teach_report("quantum", 20).unwrap(),
        "No sources found for: quantum\n"
    );
}
