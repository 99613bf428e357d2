//! Snapshot Analytics
//!
//! Structural metrics over graph snapshots handed in by an owning graph store:
//! - Average local clustering coefficient (undirected, unweighted)
//! - Connected component count via union-find
//! - Conversion of a snapshot to a `petgraph` graph
//!
//! ```
//! use snapshot_analytics::{AnalyticsEngine, GraphAnalyticsEngine, Snapshot};
//!
//! let snapshot = Snapshot::from_json_str(
//!     r#"{ "rawGraph": {
//!         "nodes": [{ "id": "a" }, { "id": "b" }, { "id": "c" }],
//!         "edges": [{ "source_id": "a", "target_id": "b" }]
//!     } }"#,
//! )?;
//!
//! let engine = GraphAnalyticsEngine::default();
//! assert_eq!(engine.connected_components(&snapshot)?.value, 2);
//! # Ok::<(), snapshot_analytics::AnalyticsError>(())
//! ```

pub mod error;
pub mod graph;

pub use error::{AnalyticsError, Result};
pub use graph::{
    AnalyticsConfig, AnalyticsEngine, ConvertedGraph, GraphAnalyticsEngine, InterchangeFormat,
    MetricReport, NodeId, SkippedEdges, Snapshot, SnapshotEdge, SnapshotNode,
};
