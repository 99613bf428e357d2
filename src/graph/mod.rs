//! Graph analytics layer.
//!
//! Computes structural metrics (average clustering coefficient, connected
//! component count) on a caller-owned graph snapshot. Pure and synchronous:
//! no state survives a call.
//!
//! ## Architecture
//!
//! ```text
//! Snapshot (caller) ──► extraction ──► IndexedGraph
//!                                          │
//!                                     algorithms
//!                                          │
//!                                   MetricReport<T>
//!                                          │
//!                           AnalyticsEngine (entry surface)
//! ```
//!
//! ## Modules
//!
//! - [`models`]: Data structures (Snapshot, IndexedGraph, MetricReport, AnalyticsConfig)
//! - [`extraction`]: Snapshot → IndexedGraph (dense indices, neighbor sets, index pairs)
//! - [`algorithms`]: Clustering coefficient and union-find connected components
//! - [`engine`]: `AnalyticsEngine` trait, `GraphAnalyticsEngine` and conversions

pub mod algorithms;
pub mod engine;
pub mod extraction;
pub mod models;

// Re-export primary types for convenience
pub use engine::{AnalyticsEngine, ConvertedGraph, GraphAnalyticsEngine, InterchangeFormat};
pub use extraction::GraphExtractor;
pub use models::{
    AnalyticsConfig, IndexedGraph, MetricReport, NodeId, SkippedEdges, Snapshot, SnapshotEdge,
    SnapshotNode,
};
