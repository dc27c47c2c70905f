pub mod app;
pub mod collections;
pub mod config;
pub mod editor;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod routing;
pub mod scene;

pub use app::{App, RunToken, Status};
pub use config::{Settings, Speed};
pub use editor::{ClickOutcome, Mode, Selection};
pub use geometry::Point;
pub use graph::{Edge, Graph, Node, NodeId};
pub use graph_algos::{DijkstraRun, Distance, RunPhase, RunState, Step, StepOutcome};
