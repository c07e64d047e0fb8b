//! Report rendering for connection, conflict and briefing results.
//!
//! # Responsibility
//! - Turn structured engine output into the supported text views.
//! - Provide slug-based JSON projections for machine consumers.
//!
//! # Invariants
//! - Renderers never recompute engine results; they only format them.

pub mod json;
pub mod text;

use crate::graph::ConnectionGraph;
use crate::model::source::SourceRecord;

pub use json::{conflict_report, graph_report, ConflictReport, GraphReport};
pub use text::{
    render_clusters, render_conflicts, render_graph, render_orphans, render_teach,
    NOT_ENOUGH_CLAIMS_MESSAGE, NO_SOURCES_MESSAGE,
};

/// Mutually exclusive views of the connections report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportView {
    /// Summary counts, clusters, edges and orphans.
    #[default]
    Graph,
    Clusters,
    Orphans,
}

/// Renders `graph` in the selected view.
pub fn render_connections(
    records: &[SourceRecord],
    graph: &ConnectionGraph,
    view: ReportView,
) -> String {
    match view {
        ReportView::Graph => render_graph(records, graph),
        ReportView::Clusters => render_clusters(records, graph),
        ReportView::Orphans => render_orphans(records, graph),
    }
}
