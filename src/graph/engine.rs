//! Analytics engine: the public entry surface.
//!
//! The `AnalyticsEngine` trait is the single entry point for metric consumers.
//! Every call runs the full pipeline on the snapshot it is given:
//!
//! 1. **Extraction**: snapshot → `IndexedGraph` via `GraphExtractor`
//! 2. **Computation**: clustering coefficient or connected components
//!
//! Nothing is cached between calls, so results always reflect the snapshot's
//! current contents. The trait also declares conversions to external graph
//! representations; callers must treat them as capability checks.

use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

use super::algorithms::{average_clustering_coefficient, connected_components};
use super::extraction::GraphExtractor;
use super::models::{AnalyticsConfig, IndexedGraph, MetricReport, NodeId, Snapshot};

// ============================================================================
// Conversion targets
// ============================================================================

/// External graph representations a snapshot can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterchangeFormat {
    /// In-memory `petgraph` undirected graph
    Petgraph,
    /// General-purpose graph-processing library representation (not implemented)
    GraphProcessing,
    /// GEXF interchange file (not implemented)
    Gexf,
}

impl InterchangeFormat {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Petgraph)
    }
}

impl std::fmt::Display for InterchangeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Petgraph => write!(f, "petgraph"),
            Self::GraphProcessing => write!(f, "graph-processing library"),
            Self::Gexf => write!(f, "GEXF"),
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub enum ConvertedGraph {
    Petgraph(UnGraph<NodeId, ()>),
}

// ============================================================================
// Trait
// ============================================================================

/// Analytics engine trait: single entry point for snapshot metrics.
///
/// Consumers hold `Arc<dyn AnalyticsEngine>` or a concrete engine; the snapshot
/// is passed explicitly on every call and must not be mutated while a call runs.
pub trait AnalyticsEngine: Send + Sync {
    /// Average local clustering coefficient over all nodes, in `[0, 1]`.
    ///
    /// Returns [`AnalyticsError::UndefinedMetric`] for a snapshot without nodes.
    fn average_clustering_coefficient(&self, snapshot: &Snapshot) -> Result<MetricReport<f64>>;

    /// Number of connected components; `0` for a snapshot without nodes.
    fn connected_components(&self, snapshot: &Snapshot) -> Result<MetricReport<usize>>;

    /// Convert the snapshot to an external representation.
    ///
    /// Unimplemented targets return [`AnalyticsError::UnsupportedConversion`].
    fn convert(&self, snapshot: &Snapshot, format: InterchangeFormat) -> Result<ConvertedGraph>;
}

// ============================================================================
// Concrete implementation
// ============================================================================

/// Default analytics engine: extract → compute, synchronously, per call.
#[derive(Debug, Clone, Default)]
pub struct GraphAnalyticsEngine {
    config: AnalyticsConfig,
}

impl GraphAnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn extract(&self, snapshot: &Snapshot) -> Result<IndexedGraph> {
        GraphExtractor::new(&self.config).build(snapshot)
    }

    fn run<T, F>(&self, snapshot: &Snapshot, compute: F) -> Result<MetricReport<T>>
    where
        F: FnOnce(&IndexedGraph) -> Result<T>,
    {
        let start = std::time::Instant::now();

        // 1. Extract
        let graph = self.extract(snapshot)?;

        // 2. Compute
        let value = compute(&graph)?;

        Ok(MetricReport {
            value,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            skipped: graph.skipped,
            computation_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }
}

impl AnalyticsEngine for GraphAnalyticsEngine {
    fn average_clustering_coefficient(&self, snapshot: &Snapshot) -> Result<MetricReport<f64>> {
        let report = self.run(snapshot, average_clustering_coefficient)?;
        tracing::debug!(
            "Average clustering coefficient: {:.6} over {} nodes ({}ms)",
            report.value,
            report.node_count,
            report.computation_ms
        );
        Ok(report)
    }

    fn connected_components(&self, snapshot: &Snapshot) -> Result<MetricReport<usize>> {
        let report = self.run(snapshot, |graph| Ok(connected_components(graph)))?;
        tracing::debug!(
            "Connected components: {} over {} nodes ({}ms)",
            report.value,
            report.node_count,
            report.computation_ms
        );
        Ok(report)
    }

    fn convert(&self, snapshot: &Snapshot, format: InterchangeFormat) -> Result<ConvertedGraph> {
        match format {
            InterchangeFormat::Petgraph => {
                let graph = self.extract(snapshot)?;
                Ok(ConvertedGraph::Petgraph(graph.to_petgraph()))
            }
            InterchangeFormat::GraphProcessing | InterchangeFormat::Gexf => {
                Err(AnalyticsError::UnsupportedConversion(format))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
