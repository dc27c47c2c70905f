pub mod dijkstra;
mod shortest_path;

pub use dijkstra::{DijkstraRun, Step, StepOutcome};

use shortest_path::shortest_path;

use std::fmt;

use crate::collections::FxIndexMap;
use crate::graph::NodeId;


/// Tentative distance from the start node
/// Every finite value orders before `Infinite`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            Distance::Finite(v) => Some(*v),
            Distance::Infinite => None,
        }
    }

    /// Distance after walking an edge of `weight`, infinity absorbs
    pub fn add_weight(self, weight: u32) -> Distance {
        match self {
            Distance::Finite(v) => Distance::Finite(v.saturating_add(u64::from(weight))),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(v) => write!(f, "{v}"),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}


/// Lifecycle of a shortest-path run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Completed,
    NoPathFound,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Completed | RunPhase::NoPathFound)
    }
}


/// Observable state of a run, what the surface paints
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunState {
    pub distances: FxIndexMap<NodeId, Distance>,
    pub visited_order: Vec<NodeId>, // settled order
    pub path: Vec<NodeId>, // empty until the run terminates
}

impl RunState {

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty() && self.visited_order.is_empty() && self.path.is_empty()
    }

    pub fn distance(&self, id: NodeId) -> Option<Distance> {
        self.distances.get(&id).copied()
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.visited_order.contains(&id)
    }

    pub fn on_path(&self, id: NodeId) -> bool {
        self.path.contains(&id)
    }

    /// True if `a` and `b` are consecutive somewhere on the path
    pub fn path_uses_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.path
            .windows(2)
            .any(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a))
    }
}
