//! Source library use-case service.
//!
//! # Responsibility
//! - Load documents through a repository and parse them into records.
//! - Run the connection and conflict passes and hand results to renderers.
//! - Short-circuit degenerate corpora with fixed messages.
//!
//! # Invariants
//! - Each call takes a fresh snapshot of the corpus; nothing is cached.
//! - Empty results are successful outcomes, never errors.

use crate::config::EngineConfig;
use crate::conflict::find_conflicts;
use crate::graph::{analyze_connections, ConnectionGraph};
use crate::library::{
    build_teach_report, library_stats, list_sources, related_sources, LibraryStats,
    SourceFilter, SourceListing, TeachReport,
};
use crate::model::source::{SourceMeta, SourceRecord};
use crate::repo::source_repo::{RepoError, SourceRepository};
use crate::report::{
    conflict_report, graph_report, render_conflicts, render_connections, render_teach,
    ReportView, NOT_ENOUGH_CLAIMS_MESSAGE, NO_SOURCES_MESSAGE,
};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for library use-cases.
#[derive(Debug)]
pub enum LibraryError {
    /// Storage-layer failure.
    Repo(RepoError),
    /// Requested source slug does not exist.
    SourceNotFound(String),
    /// JSON rendering failure.
    Serialize(serde_json::Error),
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::SourceNotFound(slug) => write!(f, "source not found: {slug}"),
            Self::Serialize(err) => write!(f, "failed to render json: {err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::SourceNotFound(_) => None,
        }
    }
}

impl From<RepoError> for LibraryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Library facade over a repository and engine configuration.
pub struct LibraryService<R: SourceRepository> {
    repo: R,
    config: EngineConfig,
}

impl<R: SourceRepository> LibraryService<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        Self { repo, config }
    }

    /// Loads and parses every readable source.
    pub fn load_records(&self) -> LibraryResult<Vec<SourceRecord>> {
        let started_at = Instant::now();
        let records = self
            .repo
            .load_documents()?
            .iter()
            .map(|document| SourceRecord::parse(&document.content, &document.slug))
            .collect::<Vec<_>>();
        info!(
            "event=corpus_load module=service status=ok sources={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    /// Computes the connection graph over the current corpus.
    pub fn connections(&self) -> LibraryResult<(Vec<SourceRecord>, ConnectionGraph)> {
        let records = self.load_records()?;
        let graph = analyze_connections(&records, &self.config);
        Ok((records, graph))
    }

    /// Renders the connections report in `view`.
    ///
    /// Returns [`NO_SOURCES_MESSAGE`] without computing anything for an
    /// empty corpus.
    pub fn connections_report(&self, view: ReportView) -> LibraryResult<String> {
        let records = self.load_records()?;
        if records.is_empty() {
            return Ok(format!("{NO_SOURCES_MESSAGE}\n"));
        }
        let graph = analyze_connections(&records, &self.config);
        info!(
            "event=connections_report module=service status=ok sources={} edges={} clusters={} orphans={}",
            records.len(),
            graph.edges.len(),
            graph.clusters.len(),
            graph.orphans.len()
        );
        Ok(render_connections(&records, &graph, view))
    }

    /// Renders the connection graph as pretty JSON keyed by slug.
    pub fn connections_json(&self) -> LibraryResult<String> {
        let (records, graph) = self.connections()?;
        Ok(serde_json::to_string_pretty(&graph_report(&records, &graph))?)
    }

    /// Renders the conflict report.
    ///
    /// Returns [`NOT_ENOUGH_CLAIMS_MESSAGE`] when fewer than two sources
    /// carry Key Claims.
    pub fn conflicts_report(&self) -> LibraryResult<String> {
        let records = self.load_records()?;
        let analyzed = records.iter().filter(|record| record.has_claims()).count();
        if analyzed < 2 {
            return Ok(format!("{NOT_ENOUGH_CLAIMS_MESSAGE}\n"));
        }
        let findings = find_conflicts(&records, &self.config);
        info!(
            "event=conflicts_report module=service status=ok analyzed={} findings={}",
            analyzed,
            findings.len()
        );
        Ok(render_conflicts(&records, &findings, analyzed))
    }

    /// Renders conflict findings as pretty JSON keyed by slug.
    ///
    /// Always emits a document, even below two claim-bearing sources: only
    /// such sources are paired, so `findings` is then empty and `analyzed`
    /// tells the caller why.
    pub fn conflicts_json(&self) -> LibraryResult<String> {
        let records = self.load_records()?;
        let analyzed = records.iter().filter(|record| record.has_claims()).count();
        let findings = find_conflicts(&records, &self.config);
        let report = conflict_report(&records, &findings, analyzed);
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Lists source metadata with filters applied.
    pub fn list(
        &self,
        filter: &SourceFilter,
        today: NaiveDate,
    ) -> LibraryResult<Vec<SourceListing>> {
        let metas = self
            .repo
            .load_documents()?
            .iter()
            .map(|document| SourceMeta::parse(&document.content, &document.slug))
            .collect();
        Ok(list_sources(metas, filter, today))
    }

    /// Aggregates library statistics.
    pub fn stats(&self) -> LibraryResult<LibraryStats> {
        Ok(library_stats(&self.repo.load_documents()?))
    }

    /// Builds a briefing on `topic` from at most `limit` matching sources.
    pub fn teach(&self, topic: &str, limit: usize) -> LibraryResult<TeachReport> {
        let documents = self.repo.load_documents()?;
        let report = build_teach_report(&documents, topic, limit);
        info!(
            "event=teach module=service status=ok corpus={} sources={} insights={}",
            documents.len(),
            report.sources.len(),
            report.insights.len()
        );
        Ok(report)
    }

    /// Renders the topic briefing.
    ///
    /// Returns [`NO_SOURCES_MESSAGE`] for an empty corpus.
    pub fn teach_report(&self, topic: &str, limit: usize) -> LibraryResult<String> {
        if self.repo.load_documents()?.is_empty() {
            return Ok(format!("{NO_SOURCES_MESSAGE}\n"));
        }
        Ok(render_teach(&self.teach(topic, limit)?))
    }

    /// Renders the topic briefing as pretty JSON.
    pub fn teach_json(&self, topic: &str, limit: usize) -> LibraryResult<String> {
        Ok(serde_json::to_string_pretty(&self.teach(topic, limit)?)?)
    }

    /// Returns sources sharing at least two tags with `slug`.
    pub fn related(&self, slug: &str) -> LibraryResult<Vec<SourceRecord>> {
        let records = self.load_records()?;
        let target = records
            .iter()
            .find(|record| record.slug == slug)
            .ok_or_else(|| LibraryError::SourceNotFound(slug.to_string()))?;
        Ok(related_sources(slug, &target.tags, &records)
            .into_iter()
            .cloned()
            .collect())
    }
}
