use crate::geometry::Point;
use crate::graph::{Graph, NodeId};
use crate::graph_algos::{Distance, RunState};
use crate::editor::Selection;


pub const NODE_RADIUS: f64 = 20.0;

pub const COLOR_DEFAULT: &str = "#64748b";
pub const COLOR_START: &str = "#3b82f6";
pub const COLOR_END: &str = "#ef4444";
pub const COLOR_VISITED: &str = "#a855f7";
pub const COLOR_PATH: &str = "#10b981";


/// Drawing backend, re-invoked after every model change and on resize
pub trait Surface {
    fn draw(&mut self, scene: &Scene);
}


#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
    pub from: Point,
    pub to: Point,
    pub color: &'static str,
    pub width: f64,
    pub weight_label: Option<(Point, String)>, // drawn at the midpoint when weights are shown
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub center: Point,
    pub radius: f64,
    pub fill: &'static str,
    pub label: String,
    pub distance_badge: Option<String>,
}

/// What to paint for the current model
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub edges: Vec<SceneEdge>,
    pub nodes: Vec<SceneNode>,
}

impl Scene {

    /// Edges first so nodes are painted on top
    pub fn build(graph: &Graph, selection: &Selection, run: &RunState, show_weights: bool) -> Self {
        let edges = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let from = graph.node(edge.from)?.position;
                let to = graph.node(edge.to)?.position;
                let on_path = run.path.len() > 1 && run.path_uses_edge(edge.from, edge.to);

                Some(SceneEdge {
                    from,
                    to,
                    color: if on_path { COLOR_PATH } else { COLOR_DEFAULT },
                    width: if on_path { 3.0 } else { 2.0 },
                    weight_label: show_weights.then(|| (from.midpoint(&to), edge.weight.to_string())),
                })
            })
            .collect();

        let nodes = graph
            .nodes()
            .map(|node| SceneNode {
                id: node.id,
                center: node.position,
                radius: NODE_RADIUS,
                fill: node_fill(node.id, selection, run),
                label: node.label.clone(),
                distance_badge: match run.distance(node.id) {
                    Some(Distance::Finite(d)) => Some(d.to_string()),
                    _ => None,
                },
            })
            .collect();

        Self { edges, nodes }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Path beats everything, then start, end, visited
fn node_fill(id: NodeId, selection: &Selection, run: &RunState) -> &'static str {
    if run.on_path(id) {
        COLOR_PATH
    } else if selection.start == Some(id) {
        COLOR_START
    } else if selection.end == Some(id) {
        COLOR_END
    } else if run.is_visited(id) {
        COLOR_VISITED
    } else {
        COLOR_DEFAULT
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_algos::DijkstraRun;

    fn sample_selection() -> Selection {
        Selection { start: Some(NodeId(1)), end: Some(NodeId(6)) }
    }

    #[test]
    fn test_idle_scene() {
        let graph = Graph::sample();
        let scene = Scene::build(&graph, &sample_selection(), &RunState::default(), true);

        assert_eq!(scene.edges.len(), 8);
        assert_eq!(scene.nodes.len(), 6);
        assert_eq!(scene.node(NodeId(1)).unwrap().fill, COLOR_START);
        assert_eq!(scene.node(NodeId(6)).unwrap().fill, COLOR_END);
        assert_eq!(scene.node(NodeId(3)).unwrap().fill, COLOR_DEFAULT);
        assert!(scene.nodes.iter().all(|n| n.distance_badge.is_none()));

        let first = &scene.edges[0];
        assert_eq!(first.weight_label, Some((Point::new(175.0, 125.0), "7".to_string())));
        assert_eq!(first.width, 2.0);
    }

    #[test]
    fn test_weights_hidden() {
        let graph = Graph::sample();
        let scene = Scene::build(&graph, &Selection::default(), &RunState::default(), false);
        assert!(scene.edges.iter().all(|e| e.weight_label.is_none()));
    }

    #[test]
    fn test_mid_run_scene() {
        let graph = Graph::sample();
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(6)).unwrap();
        run.step();
        run.step();

        let scene = Scene::build(&graph, &sample_selection(), run.state(), true);

        // start keeps its colour even though it is visited
        assert_eq!(scene.node(NodeId(1)).unwrap().fill, COLOR_START);
        assert_eq!(scene.node(NodeId(4)).unwrap().fill, COLOR_VISITED);
        assert_eq!(scene.node(NodeId(5)).unwrap().distance_badge.as_deref(), Some("20"));
        // still infinite, no badge
        assert_eq!(scene.node(NodeId(6)).unwrap().distance_badge, None);
    }

    #[test]
    fn test_finished_scene_highlights_path() {
        let graph = Graph::sample();
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(6)).unwrap();
        run.run_to_end();

        let scene = Scene::build(&graph, &sample_selection(), run.state(), true);

        for id in [1, 2, 5, 6] {
            assert_eq!(scene.node(NodeId(id)).unwrap().fill, COLOR_PATH);
        }
        assert_eq!(scene.node(NodeId(3)).unwrap().fill, COLOR_VISITED);

        let green: Vec<_> = graph
            .edges()
            .iter()
            .zip(&scene.edges)
            .filter(|(_, s)| s.color == COLOR_PATH)
            .map(|(e, s)| {
                assert_eq!(s.width, 3.0);
                (e.from.0, e.to.0)
            })
            .collect();
        assert_eq!(green, vec![(1, 2), (2, 5), (5, 6)]);
    }

    #[test]
    fn test_single_node_path_has_no_green_edges() {
        let graph = Graph::sample();
        let run = RunState { path: vec![NodeId(6)], ..RunState::default() };
        let scene = Scene::build(&graph, &sample_selection(), &run, true);

        assert_eq!(scene.node(NodeId(6)).unwrap().fill, COLOR_PATH);
        assert!(scene.edges.iter().all(|e| e.color == COLOR_DEFAULT));
    }
}
