//! Graph analytics data models.
//!
//! Defines the complete type system for snapshot analytics:
//!
//! ## Input types (snapshot)
//! - [`NodeId`]: caller-defined node identifier (integer or string)
//! - [`SnapshotNode`] / [`SnapshotEdge`]: node and edge records as handed in
//! - [`Snapshot`]: the immutable node/edge list owned by the caller
//!
//! ## Intermediate representation
//! - [`IndexedGraph`]: dense index mapping, neighbor sets and index-pair edges
//! - [`SkippedEdges`]: tally of edges dropped while building the index
//!
//! ## Output types
//! - [`MetricReport`]: a metric value plus the bookkeeping of how it was computed
//!
//! ## Configuration
//! - [`AnalyticsConfig`]: limits and logging switches for the analytics layer

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{AnalyticsError, Result};

// ============================================================================
// Input types: Snapshot
// ============================================================================

/// Identifier of a node within a snapshot.
///
/// Integers and strings are distinct: `1` and `"1"` never resolve to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

/// A node record. Fields other than `id` are ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
}

impl SnapshotNode {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self { id: id.into() }
    }
}

/// An edge record. Treated as undirected by every metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source_id: NodeId,
    pub target_id: NodeId,
}

impl SnapshotEdge {
    pub fn new(source_id: impl Into<NodeId>, target_id: impl Into<NodeId>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}

/// Node/edge list describing a graph at a point in time.
///
/// Node ids are expected to be unique; the analytics layer does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl Snapshot {
    pub fn new(nodes: Vec<SnapshotNode>, edges: Vec<SnapshotEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a snapshot from JSON text. See [`Snapshot::from_json_value`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Read a snapshot from a JSON document.
    ///
    /// Accepts the store's envelope `{ "rawGraph": { "nodes": [...], "edges": [...] } }`
    /// or a bare `{ "nodes": [...], "edges": [...] }` object. Fails fast with
    /// [`AnalyticsError::InvalidInput`] when either list is missing, is not an array,
    /// or holds a record without a readable identifier.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let graph = value.get("rawGraph").unwrap_or(value);

        let nodes = sequence_field(graph, "nodes")?;
        let edges = sequence_field(graph, "edges")?;

        let nodes = Vec::<SnapshotNode>::deserialize(nodes)
            .map_err(|e| AnalyticsError::InvalidInput(format!("nodes: {}", e)))?;
        let edges = Vec::<SnapshotEdge>::deserialize(edges)
            .map_err(|e| AnalyticsError::InvalidInput(format!("edges: {}", e)))?;

        Ok(Self { nodes, edges })
    }

    /// Number of node records (duplicates included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge records (dangling and self-loop edges included).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn sequence_field<'a>(graph: &'a Value, field: &str) -> Result<&'a Value> {
    match graph.get(field) {
        Some(list @ Value::Array(_)) => Ok(list),
        Some(_) => Err(AnalyticsError::InvalidInput(format!(
            "`{}` is not a sequence",
            field
        ))),
        None => Err(AnalyticsError::InvalidInput(format!(
            "snapshot is missing `{}`",
            field
        ))),
    }
}

// ============================================================================
// IndexedGraph: dense adjacency built per request
// ============================================================================

/// Edges dropped while indexing a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEdges {
    /// Edges with at least one endpoint that is not a known node id
    pub dangling: usize,
    /// Edges whose endpoints resolve to the same node
    pub self_loops: usize,
}

impl SkippedEdges {
    pub fn total(&self) -> usize {
        self.dangling + self.self_loops
    }
}

/// Analysis-ready form of a [`Snapshot`].
///
/// Indices are assigned in the order nodes appear in the snapshot. `neighbors`
/// holds the deduplicated undirected adjacency (no node is its own neighbor),
/// `edge_index_pairs` holds one entry per resolved, non-self-loop edge record.
/// Built fresh for each request and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct IndexedGraph {
    /// Index → node id
    pub ids: Vec<NodeId>,
    /// Node id → index
    pub id_to_index: HashMap<NodeId, usize>,
    /// Distinct neighbors of each node
    pub neighbors: Vec<HashSet<usize>>,
    /// Resolved edges as index pairs, in snapshot order
    pub edge_index_pairs: Vec<(usize, usize)>,
    /// Edges that did not make it into the graph
    pub skipped: SkippedEdges,
}

impl IndexedGraph {
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of resolved edge records (parallel edges counted individually).
    pub fn edge_count(&self) -> usize {
        self.edge_index_pairs.len()
    }

    /// Number of distinct other nodes adjacent to `index`.
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors.get(index).map_or(0, HashSet::len)
    }

    pub fn get_index(&self, id: &NodeId) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors.get(u).is_some_and(|n| n.contains(&v))
    }

    /// Build an undirected petgraph graph with one edge per adjacent pair.
    ///
    /// `NodeIndex::new(i)` in the result is the node at index `i` here.
    pub fn to_petgraph(&self) -> UnGraph<NodeId, ()> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        for id in &self.ids {
            graph.add_node(id.clone());
        }

        let mut seen = HashSet::with_capacity(self.edge_index_pairs.len());
        for &(u, v) in &self.edge_index_pairs {
            let key = (u.min(v), u.max(v));
            if seen.insert(key) {
                graph.add_edge(NodeIndex::new(key.0), NodeIndex::new(key.1), ());
            }
        }
        graph
    }
}

// ============================================================================
// Output types
// ============================================================================

/// A computed metric with the context it was computed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport<T> {
    /// The metric value
    pub value: T,
    /// Distinct nodes analyzed
    pub node_count: usize,
    /// Resolved edges analyzed (self-loops and dangling edges excluded)
    pub edge_count: usize,
    /// Edges dropped from the snapshot
    pub skipped: SkippedEdges,
    /// Build + computation time in milliseconds
    pub computation_ms: u64,
}

// ============================================================================
// Configuration
// ============================================================================

/// Default YAML file consulted by [`AnalyticsConfig::from_yaml_and_env`].
pub const DEFAULT_CONFIG_PATH: &str = "analytics.yaml";

/// Default node limit for a single request.
pub const DEFAULT_MAX_GRAPH_NODES: usize = 10_000_000;

/// Tuning parameters for the analytics layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Refuse snapshots with more nodes than this (default: 10M, `None` = no limit)
    pub max_graph_nodes: Option<usize>,
    /// Emit a warning when edges are skipped while indexing (default: true)
    pub log_skipped_edges: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            max_graph_nodes: Some(DEFAULT_MAX_GRAPH_NODES),
            log_skipped_edges: true,
        }
    }
}

impl AnalyticsConfig {
    /// Parse a YAML document. Missing keys take their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// Priority: env vars > YAML file > defaults. A missing or unparsable file
    /// falls back to the defaults.
    ///
    /// - `ANALYTICS_MAX_GRAPH_NODES`: node limit, `0` disables the limit
    /// - `ANALYTICS_LOG_SKIPPED_EDGES`: `true` / `false`
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Self {
        Self::from_yaml_with(yaml_path, |key| std::env::var(key).ok())
    }

    fn from_yaml_with<F>(yaml_path: Option<&Path>, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_yaml(yaml_path).with_overrides(var)
    }

    /// Apply overrides read through `var`. Unparsable values are ignored.
    pub fn with_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = var("ANALYTICS_MAX_GRAPH_NODES").and_then(|s| s.parse::<usize>().ok())
        {
            self.max_graph_nodes = (limit > 0).then_some(limit);
        }
        if let Some(flag) = var("ANALYTICS_LOG_SKIPPED_EDGES").and_then(|s| s.parse().ok()) {
            self.log_skipped_edges = flag;
        }
        self
    }

    fn load_yaml(yaml_path: Option<&Path>) -> Self {
        let path = yaml_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_yaml_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded analytics config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No analytics config at {}, using env vars / defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
