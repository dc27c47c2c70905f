use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;


/// Reasons a shortest-path run can't be started or advanced
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("start and end nodes must both be selected")]
    MissingEndpoint,
    #[error("a run is already in progress")]
    AlreadyRunning,
    #[error("no run is in progress")]
    NotRunning,
    #[error("run token {0} is stale, a newer run or reset replaced it")]
    StaleRun(u64), // token held by an obsolete driver
    #[error("node {0} is not part of the graph")]
    UnknownNode(NodeId),
}

/// Failures reported by an external routing service
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("routing service error: {0}")]
    Service(String),
    #[error("no route between the given points")]
    NoRoute,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("spatial index error: {0}")]
    KdTree(String),
}


impl From<kdtree::ErrorKind> for GeometryError {
    fn from(error: kdtree::ErrorKind) -> Self {
        GeometryError::KdTree(error.to_string())
    }
}
