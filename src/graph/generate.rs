use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::geometry::Point;
use super::{Graph, NodeId};


/// Keep generated nodes away from the surface border
const MARGIN: f64 = 30.0;

/// Parameters for a random scatter graph
#[derive(Clone, Debug)]
pub struct RandomGraph {
    pub nodes: u32,
    pub width: f64,
    pub height: f64,
    pub edge_probability: f64, // chance that any unordered pair is connected
    pub max_weight: u32,
    pub seed: Option<u64>, // fixed seed for reproducible graphs
}

impl Default for RandomGraph {
    fn default() -> Self {
        Self {
            nodes: 8,
            width: 500.0,
            height: 400.0,
            edge_probability: 0.35,
            max_weight: 15,
            seed: None,
        }
    }
}


/// Build a random graph, seeded when `params.seed` is set
pub fn random_graph(params: &RandomGraph) -> Graph {
    match params.seed {
        Some(seed) => build(params, &mut StdRng::seed_from_u64(seed)),
        None => build(params, &mut rand::rng()),
    }
}

fn build<R: Rng>(params: &RandomGraph, rng: &mut R) -> Graph {
    let mut graph = Graph::new();

    let x_max = (params.width - MARGIN).max(MARGIN);
    let y_max = (params.height - MARGIN).max(MARGIN);

    for _ in 0..params.nodes {
        let x = rng.random_range(MARGIN..=x_max);
        let y = rng.random_range(MARGIN..=y_max);
        graph.add_node(Point::new(x, y));
    }

    let p = params.edge_probability.clamp(0.0, 1.0);
    let max_weight = params.max_weight.max(1);
    let ids: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();

    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if rng.random_bool(p) {
                let weight = rng.random_range(1..=max_weight);
                graph.add_edge(a, b, weight);
            }
        }
    }

    graph
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_graph_is_reproducible() {
        let params = RandomGraph { seed: Some(42), ..RandomGraph::default() };
        let a = random_graph(&params);
        let b = random_graph(&params);

        assert_eq!(a.node_count(), 8);
        assert_eq!(a.edges(), b.edges());
        let pa: Vec<_> = a.nodes().map(|n| n.position).collect();
        let pb: Vec<_> = b.nodes().map(|n| n.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_nodes_inside_bounds_and_weights_positive() {
        let params = RandomGraph {
            nodes: 30,
            edge_probability: 0.5,
            max_weight: 4,
            seed: Some(7),
            ..RandomGraph::default()
        };
        let graph = random_graph(&params);

        for node in graph.nodes() {
            assert!(node.position.x >= MARGIN && node.position.x <= params.width - MARGIN);
            assert!(node.position.y >= MARGIN && node.position.y <= params.height - MARGIN);
        }
        for edge in graph.edges() {
            assert!((1..=4).contains(&edge.weight));
            assert_ne!(edge.from, edge.to);
        }
    }

    #[test]
    fn test_probability_extremes() {
        let none = random_graph(&RandomGraph { edge_probability: 0.0, seed: Some(1), ..RandomGraph::default() });
        assert_eq!(none.edge_count(), 0);

        let all = random_graph(&RandomGraph { nodes: 5, edge_probability: 1.0, seed: Some(1), ..RandomGraph::default() });
        assert_eq!(all.edge_count(), 10);
    }
}
