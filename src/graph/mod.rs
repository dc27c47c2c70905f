mod generate;

pub use generate::{RandomGraph, random_graph};

use std::fmt;

use crate::collections::FxIndexMap;
use crate::errors::GeometryError;
use crate::geometry::{NodeLocator, Point};


/// Node identifier, assigned sequentially starting at 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeId, position: Point) -> Self {
        Self { id, position, label: id.to_string() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

impl Edge {

    /// True if the edge joins `a` and `b` in either direction
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Endpoint opposite to `node`, None if the edge doesn't touch it
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}


/// Simple undirected graph: no self loops, no parallel edges
/// Nodes keep insertion order, each edge is stored once and traversed both ways
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: FxIndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    next_id: u32,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {

    pub fn new() -> Self {
        Self {
            nodes: FxIndexMap::default(),
            edges: Vec::new(),
            next_id: 1,
        }
    }

    /// Classic six node example used by the teaching tool
    /// Shortest 1 -> 6 is 1, 2, 5, 6 with cost 20
    pub fn sample() -> Self {
        let mut graph = Self::new();

        let positions = [
            (100.0, 100.0),
            (250.0, 150.0),
            (400.0, 100.0),
            (100.0, 250.0),
            (250.0, 300.0),
            (400.0, 250.0),
        ];
        for (x, y) in positions {
            graph.add_node(Point::new(x, y));
        }

        let edges = [
            (1, 2, 7),
            (1, 4, 5),
            (2, 3, 8),
            (2, 4, 9),
            (2, 5, 7),
            (3, 6, 5),
            (4, 5, 15),
            (5, 6, 6),
        ];
        for (from, to, weight) in edges {
            graph.add_edge(NodeId(from), NodeId(to), weight);
        }

        graph
    }

    /// Create a node at `position` with the next sequential id and label
    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, position));
        id
    }

    /// Add an undirected edge
    /// Returns false (graph unchanged) for self loops, unknown endpoints,
    /// zero weights or an already connected pair
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: u32) -> bool {
        if from == to
            || weight == 0
            || !self.nodes.contains_key(&from)
            || !self.nodes.contains_key(&to)
            || self.has_edge(from, to)
        {
            return false;
        }
        self.edges.push(Edge { from, to, weight });
        true
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Move a node, nothing else changes
    pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove everything and restart ids at 1
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_id = 1;
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id the next created node will receive
    pub fn next_id(&self) -> NodeId {
        NodeId(self.next_id)
    }

    /// Neighbors of `id` with the connecting edge weight, in edge order
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.edges
            .iter()
            .filter_map(move |e| e.other(id).map(|n| (n, e.weight)))
    }

    /// Adjacency list for every node, each edge listed from both ends
    pub fn adjacency(&self) -> FxIndexMap<NodeId, Vec<(NodeId, u32)>> {
        let mut adj: FxIndexMap<NodeId, Vec<(NodeId, u32)>> = self
            .nodes
            .keys()
            .map(|&id| (id, Vec::new()))
            .collect();

        for edge in &self.edges {
            if let Some(list) = adj.get_mut(&edge.from) {
                list.push((edge.to, edge.weight));
            }
            if let Some(list) = adj.get_mut(&edge.to) {
                list.push((edge.from, edge.weight));
            }
        }
        adj
    }

    /// Spatial index over the current node positions
    pub fn locator(&self) -> Result<NodeLocator, GeometryError> {
        NodeLocator::build(self.nodes.values().map(|n| (n.id, n.position)))
    }

    /// Node under `point`, if any lies within `radius`
    pub fn node_at(&self, point: &Point, radius: f64) -> Result<Option<NodeId>, GeometryError> {
        if self.nodes.is_empty() {
            return Ok(None);
        }
        self.locator()?.node_at(point, radius)
    }
}
