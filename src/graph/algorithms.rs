//! Graph analytics algorithms.
//!
//! Implements the structural metrics on an [`IndexedGraph`]:
//! - **Clustering coefficient**: local clustering per node, averaged over all nodes
//! - **Connected components**: union-find over the resolved edge list
//!
//! Both treat the graph as undirected and unweighted.

use crate::error::{AnalyticsError, Result};

use super::models::IndexedGraph;

// ============================================================================
// Clustering Coefficient
// ============================================================================

/// Compute the local clustering coefficient of every node, in index order.
///
/// coefficient = 2 * T / (k * (k - 1)), where k is the number of distinct
/// neighbors and T the number of neighbor pairs that are adjacent themselves.
/// Nodes with fewer than two neighbors get 0.0.
pub fn local_clustering(graph: &IndexedGraph) -> Vec<f64> {
    graph
        .neighbors
        .iter()
        .map(|adjacent| {
            let k = adjacent.len();
            if k < 2 {
                return 0.0;
            }

            let members: Vec<usize> = adjacent.iter().copied().collect();

            // Count triangles: pairs of neighbors that are connected
            let mut triangles = 0usize;
            for (i, &v) in members.iter().enumerate() {
                for &w in &members[i + 1..] {
                    if graph.is_adjacent(v, w) {
                        triangles += 1;
                    }
                }
            }

            let possible = k * (k - 1) / 2;
            triangles as f64 / possible as f64
        })
        .collect()
}

/// Mean of the local clustering coefficients over all nodes.
///
/// Degree-0 and degree-1 nodes count as 0.0 in the mean. A graph without
/// nodes has no average: [`AnalyticsError::UndefinedMetric`].
pub fn average_clustering_coefficient(graph: &IndexedGraph) -> Result<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Err(AnalyticsError::UndefinedMetric {
            metric: "average clustering coefficient",
        });
    }

    let total: f64 = local_clustering(graph).iter().sum();
    Ok(total / n as f64)
}

// ============================================================================
// Connected Components
// ============================================================================

/// Disjoint-set forest with path compression and union by rank.
///
/// Operations run in amortized O(α(n)).
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Root of the set containing `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is not below the size the forest was created with.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`. Returns false if already merged.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range, as [`UnionFind::find`] does.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }
}

/// Count connected components (isolated nodes included).
///
/// Runs in O(N + E·α(N)); the result does not depend on edge order.
///
/// # Panics
///
/// Panics if an entry of `edge_index_pairs` is not below `node_count()`.
/// Graphs built by [`GraphExtractor`](super::extraction::GraphExtractor) always
/// satisfy this.
pub fn connected_components(graph: &IndexedGraph) -> usize {
    let mut uf = UnionFind::new(graph.node_count());
    for &(u, v) in &graph.edge_index_pairs {
        uf.union(u, v);
    }
    uf.set_count()
}

// ============================================================================
// Tests
// ============================================================================
