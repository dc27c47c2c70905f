use tracing::debug;

use crate::errors::GeometryError;
use crate::geometry::Point;
use crate::graph::{Edge, Graph, NodeId};


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Edit,
    Select,
}


/// Start and end node of the next run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
}

impl Selection {

    /// Clicking the start clears it, clicking the end clears it,
    /// anything else fills the first empty slot, start before end
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.start == Some(id) {
            self.start = None;
        } else if self.end == Some(id) {
            self.end = None;
        } else if self.start.is_none() {
            self.start = Some(id);
        } else if self.end.is_none() {
            self.end = Some(id);
        } else {
            return false;
        }
        true
    }

    /// Both endpoints, when set
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        self.start.zip(self.end)
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }
}


/// What a click did to the model
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NodeCreated(NodeId),
    EdgeStarted(NodeId),
    EdgeCreated(Edge),
    EdgeDiscarded, // pair already connected
    SelectionChanged,
    Ignored,
}


/// Interaction state, the graph itself lives with the caller
/// Edit mode adds nodes, edges and drags, select mode picks start and end
#[derive(Clone, Debug, Default)]
pub struct Editor {
    mode: Mode,
    edge_start: Option<NodeId>,
    dragging: Option<NodeId>,
}

impl Editor {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode, any pending edge or drag is dropped
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.cancel_edge();
        self.dragging = None;
    }

    /// Node waiting for a second click to become an edge
    pub fn pending_edge(&self) -> Option<NodeId> {
        self.edge_start
    }

    pub fn cancel_edge(&mut self) {
        self.edge_start = None;
    }

    pub fn dragging(&self) -> Option<NodeId> {
        self.dragging
    }

    /// Forget everything that refers to nodes, used when the graph is cleared
    pub fn reset(&mut self) {
        self.edge_start = None;
        self.dragging = None;
    }

    pub fn click(
        &mut self,
        graph: &mut Graph,
        selection: &mut Selection,
        point: Point,
        weight: u32,
        hit_radius: f64,
    ) -> Result<ClickOutcome, GeometryError> {
        // a node at NaN would poison every later hit test
        if !point.is_finite() {
            return Ok(ClickOutcome::Ignored);
        }
        let hit = graph.node_at(&point, hit_radius)?;

        let outcome = match (self.mode, hit) {
            (Mode::Edit, Some(node)) => self.click_node(graph, node, weight),
            (Mode::Edit, None) if self.edge_start.is_none() => {
                ClickOutcome::NodeCreated(graph.add_node(point))
            }
            (Mode::Edit, None) => ClickOutcome::Ignored,
            (Mode::Select, Some(node)) => {
                if selection.toggle(node) {
                    ClickOutcome::SelectionChanged
                } else {
                    ClickOutcome::Ignored
                }
            }
            (Mode::Select, None) => ClickOutcome::Ignored,
        };

        debug!(?outcome, x = point.x, y = point.y, "click");
        Ok(outcome)
    }

    fn click_node(&mut self, graph: &mut Graph, node: NodeId, weight: u32) -> ClickOutcome {
        match self.edge_start {
            None => {
                self.edge_start = Some(node);
                ClickOutcome::EdgeStarted(node)
            }
            // second click on the same node keeps waiting
            Some(start) if start == node => ClickOutcome::Ignored,
            Some(start) => {
                self.cancel_edge();
                if graph.add_edge(start, node, weight) {
                    ClickOutcome::EdgeCreated(Edge { from: start, to: node, weight })
                } else {
                    ClickOutcome::EdgeDiscarded
                }
            }
        }
    }

    /// Pointer down, grabs the node under the pointer in edit mode
    pub fn press(&mut self, graph: &Graph, point: Point, hit_radius: f64) -> Result<Option<NodeId>, GeometryError> {
        if self.mode != Mode::Edit || !point.is_finite() {
            return Ok(None);
        }
        self.dragging = graph.node_at(&point, hit_radius)?;
        Ok(self.dragging)
    }

    /// Pointer move, returns true if a node moved
    pub fn drag_to(&mut self, graph: &mut Graph, point: Point) -> bool {
        match self.dragging {
            Some(id) if point.is_finite() => graph.move_node(id, point),
            _ => false,
        }
    }

    /// Pointer up or pointer left the surface
    pub fn release(&mut self) {
        self.dragging = None;
    }
}


/// Parse the edge weight input like a lenient integer field
/// Leading digits count, anything absent, non-numeric or below 1 becomes 1
/// Values too large for a weight saturate
pub fn parse_weight(text: &str) -> u32 {
    let text = text.trim_start();
    if text.starts_with('-') {
        return 1;
    }
    let text = text.strip_prefix('+').unwrap_or(text);

    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 1;
    }
    match digits.parse::<u32>() {
        Ok(weight) => weight.max(1),
        // only digits were collected, so the parse can only overflow
        Err(_) => u32::MAX,
    }
}
