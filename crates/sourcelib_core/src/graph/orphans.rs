//! Orphan detection.
//!
//! A record is an orphan iff no edge of any kind or strength touches it.
//! The strength threshold used for clustering does not apply here.

use super::ConnectionEdge;

/// Returns record positions touched by no edge, in record order.
pub fn find_orphans(record_count: usize, edges: &[ConnectionEdge]) -> Vec<usize> {
    let mut connected = vec![false; record_count];
    for edge in edges {
        for index in [edge.a, edge.b] {
            if let Some(flag) = connected.get_mut(index) {
                *flag = true;
            }
        }
    }

    connected
        .iter()
        .enumerate()
        .filter(|(_, is_connected)| !**is_connected)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::find_orphans;
    use crate::graph::{ConnectionEdge, EdgeKind};

    #[test]
    fn weak_edge_still_prevents_orphan_status() {
        let edges = vec![ConnectionEdge::new(
            0,
            2,
            EdgeKind::TagOverlap,
            vec!["crypto".to_string()],
        )];
        assert_eq!(find_orphans(4, &edges), vec![1, 3]);
    }

    #[test]
    fn every_record_is_orphan_without_edges() {
        assert_eq!(find_orphans(3, &[]), vec![0, 1, 2]);
        assert!(find_orphans(0, &[]).is_empty());
    }
}
