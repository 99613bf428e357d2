//! Error types for snapshot analytics.
//!
//! Structural problems with the input abort a request. Data-quality problems
//! (dangling edges, self-loops) are not errors: they are counted in
//! [`SkippedEdges`](crate::graph::SkippedEdges) and computation proceeds on the
//! valid subgraph.

use thiserror::Error;

use crate::graph::InterchangeFormat;

/// Errors returned by the analytics layer.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The snapshot is structurally unusable (missing or non-sequence
    /// `nodes`/`edges`, unreadable identifiers, malformed JSON).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The metric has no value for this graph (e.g. clustering on zero nodes).
    #[error("{metric} is undefined for a graph with no nodes")]
    UndefinedMetric {
        /// Name of the metric that was requested.
        metric: &'static str,
    },

    /// The requested conversion is declared but not implemented.
    #[error("conversion to {0} is not supported")]
    UnsupportedConversion(InterchangeFormat),

    /// The snapshot exceeds the configured node limit.
    #[error("graph has {node_count} nodes, exceeding the limit of {limit}")]
    GraphTooLarge {
        /// Number of nodes in the snapshot.
        node_count: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// A configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<serde_yaml::Error> for AnalyticsError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalyticsError::UndefinedMetric {
            metric: "average clustering coefficient",
        };
        assert_eq!(
            err.to_string(),
            "average clustering coefficient is undefined for a graph with no nodes"
        );

        let err = AnalyticsError::GraphTooLarge {
            node_count: 11,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "graph has 11 nodes, exceeding the limit of 10"
        );

        let err = AnalyticsError::UnsupportedConversion(InterchangeFormat::Gexf);
        assert_eq!(err.to_string(), "conversion to GEXF is not supported");
    }

    #[test]
    fn test_json_error_maps_to_invalid_input() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: AnalyticsError = parse_err.into();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn test_yaml_error_maps_to_config() {
        let parse_err = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let err: AnalyticsError = parse_err.into();
        assert!(matches!(err, AnalyticsError::Config(_)));
    }
}
