//! Snapshot → indexed adjacency extraction.
//!
//! Converts a caller-owned [`Snapshot`] into an [`IndexedGraph`] suitable for
//! metric computation. One pass over the nodes assigns dense indices, one pass
//! over the edges resolves endpoints and fills both representations:
//!
//! - **Neighbor sets**: deduplicated undirected adjacency, consumed by clustering
//! - **Index pairs**: one entry per resolved edge, consumed by union-find
//!
//! Edges that cannot be resolved are dropped and counted rather than failing the
//! build, so one malformed edge never takes down the whole request.

use std::collections::{HashMap, HashSet};

use crate::error::{AnalyticsError, Result};

use super::models::{AnalyticsConfig, IndexedGraph, SkippedEdges, Snapshot};

/// Builds [`IndexedGraph`]s from snapshots.
///
/// Holds no state between builds; every call reads the snapshot as it is now.
pub struct GraphExtractor<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> GraphExtractor<'a> {
    pub fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Index a snapshot.
    ///
    /// - Nodes get indices `0..N` in snapshot order; a repeated id keeps its first index
    /// - Edges with an unknown endpoint are counted as dangling and skipped
    /// - Edges resolving to the same node are counted as self-loops and skipped
    ///
    /// Fails only when the snapshot exceeds `max_graph_nodes`.
    pub fn build(&self, snapshot: &Snapshot) -> Result<IndexedGraph> {
        if let Some(limit) = self.config.max_graph_nodes {
            if snapshot.nodes.len() > limit {
                return Err(AnalyticsError::GraphTooLarge {
                    node_count: snapshot.nodes.len(),
                    limit,
                });
            }
        }

        // 1. Assign dense indices
        let mut ids = Vec::with_capacity(snapshot.nodes.len());
        let mut id_to_index = HashMap::with_capacity(snapshot.nodes.len());
        let mut duplicates = 0usize;

        for node in &snapshot.nodes {
            if id_to_index.contains_key(&node.id) {
                duplicates += 1;
                continue;
            }
            id_to_index.insert(node.id.clone(), ids.len());
            ids.push(node.id.clone());
        }

        if duplicates > 0 {
            tracing::debug!(
                "Snapshot has {} duplicate node id(s); kept first occurrence",
                duplicates
            );
        }

        // 2. Resolve edges
        let mut neighbors: Vec<HashSet<usize>> = vec![HashSet::new(); ids.len()];
        let mut edge_index_pairs = Vec::with_capacity(snapshot.edges.len());
        let mut skipped = SkippedEdges::default();

        for edge in &snapshot.edges {
            let (Some(&u), Some(&v)) = (
                id_to_index.get(&edge.source_id),
                id_to_index.get(&edge.target_id),
            ) else {
                tracing::trace!(
                    "Skipping dangling edge {} -> {}",
                    edge.source_id,
                    edge.target_id
                );
                skipped.dangling += 1;
                continue;
            };

            if u == v {
                skipped.self_loops += 1;
                continue;
            }

            neighbors[u].insert(v);
            neighbors[v].insert(u);
            edge_index_pairs.push((u, v));
        }

        if skipped.dangling > 0 && self.config.log_skipped_edges {
            tracing::warn!(
                "Skipped {} edge(s) referencing unknown node ids ({} edges total)",
                skipped.dangling,
                snapshot.edges.len()
            );
        }

        tracing::debug!(
            "Indexed snapshot: {} nodes, {} edges, {} dangling, {} self-loops",
            ids.len(),
            edge_index_pairs.len(),
            skipped.dangling,
            skipped.self_loops
        );

        Ok(IndexedGraph {
            ids,
            id_to_index,
            neighbors,
            edge_index_pairs,
            skipped,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::{NodeId, SnapshotEdge, SnapshotNode};

    fn snapshot(nodes: &[&str], edges: &[(&str, &str)]) -> Snapshot {
        Snapshot::new(
            nodes.iter().map(|id| SnapshotNode::new(*id)).collect(),
            edges
                .iter()
                .map(|(s, t)| SnapshotEdge::new(*s, *t))
                .collect(),
        )
    }

    fn build(snapshot: &Snapshot) -> IndexedGraph {
        let config = AnalyticsConfig::default();
        GraphExtractor::new(&config).build(snapshot).unwrap()
    }

    #[test]
    fn test_indices_follow_snapshot_order() {
        let graph = build(&snapshot(&["c", "a", "b"], &[]));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.get_index(&NodeId::from("c")), Some(0));
        assert_eq!(graph.get_index(&NodeId::from("a")), Some(1));
        assert_eq!(graph.get_index(&NodeId::from("b")), Some(2));
        assert_eq!(graph.ids[2], NodeId::from("b"));
    }

    #[test]
    fn test_edges_are_undirected() {
        let graph = build(&snapshot(&["a", "b"], &[("a", "b")]));

        assert!(graph.is_adjacent(0, 1));
        assert!(graph.is_adjacent(1, 0));
        assert_eq!(graph.edge_index_pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_parallel_edges_collapse_in_adjacency() {
        let graph = build(&snapshot(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "b")]));

        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        // Each resolved record is still listed for union-find
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.skipped.total(), 0);
    }

    #[test]
    fn test_self_loop_skipped() {
        let graph = build(&snapshot(&["a", "b"], &[("a", "a"), ("a", "b")]));

        assert_eq!(graph.skipped.self_loops, 1);
        assert_eq!(graph.skipped.dangling, 0);
        assert!(!graph.is_adjacent(0, 0));
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_dangling_edges_skipped() {
        let graph = build(&snapshot(
            &["a", "b"],
            &[("a", "b"), ("a", "ghost"), ("ghost", "phantom")],
        ));

        assert_eq!(graph.skipped.dangling, 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(0), 1);
    }

    #[test]
    fn test_self_loop_on_unknown_node_is_dangling() {
        let graph = build(&snapshot(&["a"], &[("ghost", "ghost")]));

        assert_eq!(graph.skipped.dangling, 1);
        assert_eq!(graph.skipped.self_loops, 0);
    }

    #[test]
    fn test_duplicate_node_ids_keep_first_index() {
        let graph = build(&snapshot(&["a", "b", "a"], &[("b", "a")]));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get_index(&NodeId::from("a")), Some(0));
        assert_eq!(graph.neighbors.len(), 2);
        assert!(graph.is_adjacent(1, 0));
    }

    #[test]
    fn test_mixed_identifier_types() {
        let snap = Snapshot::new(
            vec![SnapshotNode::new(1_i64), SnapshotNode::new("1")],
            vec![SnapshotEdge::new(1_i64, "1"), SnapshotEdge::new(1_i64, 2_i64)],
        );
        let graph = build(&snap);

        assert_eq!(graph.node_count(), 2);
        assert!(graph.is_adjacent(0, 1));
        assert_eq!(graph.skipped.dangling, 1);
    }

    #[test]
    fn test_node_limit_enforced() {
        let config = AnalyticsConfig {
            max_graph_nodes: Some(2),
            ..Default::default()
        };
        let err = GraphExtractor::new(&config)
            .build(&snapshot(&["a", "b", "c"], &[]))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::GraphTooLarge {
                node_count: 3,
                limit: 2
            }
        ));

        let unlimited = AnalyticsConfig {
            max_graph_nodes: None,
            ..Default::default()
        };
        assert!(GraphExtractor::new(&unlimited)
            .build(&snapshot(&["a", "b", "c"], &[]))
            .is_ok());
    }

    #[test]
    fn test_empty_snapshot() {
        let graph = build(&Snapshot::default());

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors.is_empty());
    }
}
