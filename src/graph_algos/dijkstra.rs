use crate::errors::RunError;
use crate::collections::{FxIndexMap, FxIndexSet};
use crate::graph::{Graph, NodeId};
use super::{shortest_path, Distance, RunPhase, RunState};

use std::{collections::BinaryHeap, cmp::Ordering};
use tracing::{debug, info};


/// Result of settling one node
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub node: NodeId,
    pub distance: Distance,
    pub relaxed: Vec<(NodeId, Distance)>, // neighbors whose tentative distance improved
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Settled(Step),
    Finished(RunPhase),
}


/// Dijkstra's Algorithm, one settled node per `step`
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// The run works on an adjacency snapshot taken when it starts, so edits to
/// the live graph never disturb an in-flight run. Timing between steps is left
/// to the caller. Ties between equally distant nodes go to the lowest id.
#[derive(Clone, Debug)]
pub struct DijkstraRun {
    start: NodeId,
    end: NodeId,
    adjacency: FxIndexMap<NodeId, Vec<(NodeId, u32)>>,
    predecessors: FxIndexMap<NodeId, NodeId>,
    unvisited: FxIndexSet<NodeId>,
    // Nodes to visit - binary heap sorts Biggest to Smallest, Candidate reverses it
    // Entries go stale when a shorter distance is found, they are skipped on pop
    queue: BinaryHeap<Candidate>,
    state: RunState,
    phase: RunPhase,
}

impl DijkstraRun {

    /// Set up a run from `start` to `end` over the current graph
    pub fn new(graph: &Graph, start: NodeId, end: NodeId) -> Result<Self, RunError> {
        for id in [start, end] {
            if !graph.contains(id) {
                return Err(RunError::UnknownNode(id));
            }
        }

        let adjacency = graph.adjacency();

        // every node starts at infinity except start
        let distances: FxIndexMap<NodeId, Distance> = adjacency
            .keys()
            .map(|&id| (id, if id == start { Distance::ZERO } else { Distance::Infinite }))
            .collect();
        let unvisited: FxIndexSet<NodeId> = adjacency.keys().copied().collect();

        let mut queue = BinaryHeap::new();
        queue.push(Candidate { node: start, cost: 0 });

        debug!(%start, %end, nodes = adjacency.len(), "dijkstra run started");

        Ok(Self {
            start,
            end,
            adjacency,
            predecessors: FxIndexMap::default(),
            unvisited,
            queue,
            state: RunState {
                distances,
                visited_order: Vec::new(),
                path: Vec::new(),
            },
            phase: RunPhase::Running,
        })
    }

    /// Settle the next node, or finish the run
    /// Calling it again after the run finished just repeats the final phase
    pub fn step(&mut self) -> StepOutcome {
        if self.phase.is_terminal() {
            return StepOutcome::Finished(self.phase);
        }

        // closest unvisited node, None when the rest are unreachable
        let Some(Candidate { node, cost }) = self.next_candidate() else {
            return StepOutcome::Finished(self.finish());
        };

        if node == self.end {
            return StepOutcome::Finished(self.finish());
        }

        self.unvisited.swap_remove(&node);
        self.state.visited_order.push(node);
        let distance = Distance::Finite(cost);

        // relax edges to neighbors that are still unvisited
        let mut relaxed = Vec::new();
        let neighbors = self.adjacency.get(&node).map(Vec::as_slice).unwrap_or_default();
        for &(neighbor, weight) in neighbors {
            if !self.unvisited.contains(&neighbor) {
                continue;
            }

            // new cost to reach this node = edge cost + node cost
            let new_cost = distance.add_weight(weight);
            let Some(current) = self.state.distances.get_mut(&neighbor) else {
                continue;
            };

            // strictly better only, equal paths keep the first predecessor
            if new_cost < *current {
                *current = new_cost;
                self.predecessors.insert(neighbor, node);
                relaxed.push((neighbor, new_cost));
                if let Some(cost) = new_cost.value() {
                    self.queue.push(Candidate { node: neighbor, cost });
                }
            }
        }

        debug!(%node, %distance, relaxed = relaxed.len(), "settled node");

        StepOutcome::Settled(Step { node, distance, relaxed })
    }

    /// Drive the run until it terminates
    pub fn run_to_end(&mut self) -> RunPhase {
        loop {
            if let StepOutcome::Finished(phase) = self.step() {
                return phase;
            }
        }
    }

    /// Pop until a live entry shows up
    fn next_candidate(&mut self) -> Option<Candidate> {
        while let Some(candidate) = self.queue.pop() {
            if !self.unvisited.contains(&candidate.node) {
                continue;
            }
            // If cost from the heap is higher than the best cost, a better path was found since
            if self.state.distances.get(&candidate.node) != Some(&Distance::Finite(candidate.cost)) {
                continue;
            }
            return Some(candidate);
        }
        None
    }

    fn finish(&mut self) -> RunPhase {
        self.state.path = shortest_path(&self.predecessors, self.end);
        self.phase = if self.state.path.first() == Some(&self.start) {
            RunPhase::Completed
        } else {
            RunPhase::NoPathFound
        };

        info!(
            start = %self.start,
            end = %self.end,
            phase = ?self.phase,
            settled = self.state.visited_order.len(),
            distance = %self.distance(self.end).unwrap_or(Distance::Infinite),
            "dijkstra run finished"
        );

        self.phase
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn distance(&self, id: NodeId) -> Option<Distance> {
        self.state.distance(id)
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.predecessors.get(&id).copied()
    }

    pub fn is_settled(&self, id: NodeId) -> bool {
        !self.unvisited.contains(&id)
    }

    /// Unvisited nodes with a finite tentative distance, closest first
    pub fn frontier(&self) -> Vec<NodeId> {
        let mut frontier: Vec<(Distance, NodeId)> = self
            .unvisited
            .iter()
            .filter_map(|&id| {
                self.state
                    .distance(id)
                    .filter(Distance::is_finite)
                    .map(|d| (d, id))
            })
            .collect();
        frontier.sort();
        frontier.into_iter().map(|(_, id)| id).collect()
    }
}


/// Heap entry
/// - ordering is by cost only, then id so that ties pop the lowest id first
#[derive(Clone, Copy, Debug)]
struct Candidate {
    node: NodeId,
    cost: u64,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}
impl Eq for Candidate {}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn line_graph(weights: &[u32]) -> Graph {
        let mut graph = Graph::new();
        for i in 0..=weights.len() {
            graph.add_node(Point::new(50.0 * i as f64, 0.0));
        }
        for (i, &w) in weights.iter().enumerate() {
            graph.add_edge(NodeId(i as u32 + 1), NodeId(i as u32 + 2), w);
        }
        graph
    }

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().map(|&i| NodeId(i)).collect()
    }

    #[test]
    fn test_sample_graph_shortest_path() {
        let graph = Graph::sample();
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(6)).unwrap();

        assert_eq!(run.run_to_end(), RunPhase::Completed);
        assert_eq!(run.state().path, ids(&[1, 2, 5, 6]));

        assert_eq!(run.distance(NodeId(1)), Some(Distance::Finite(0)));
        assert_eq!(run.distance(NodeId(2)), Some(Distance::Finite(7)));
        assert_eq!(run.distance(NodeId(4)), Some(Distance::Finite(5)));
        assert_eq!(run.distance(NodeId(5)), Some(Distance::Finite(14)));
        assert_eq!(run.distance(NodeId(6)), Some(Distance::Finite(20)));
    }

    #[test]
    fn test_sample_graph_settle_order() {
        let graph = Graph::sample();
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(6)).unwrap();

        let mut settled = Vec::new();
        while let StepOutcome::Settled(step) = run.step() {
            settled.push((step.node, step.distance));
        }

        // end node is never appended to the visited order
        assert_eq!(settled, vec![
            (NodeId(1), Distance::Finite(0)),
            (NodeId(4), Distance::Finite(5)),
            (NodeId(2), Distance::Finite(7)),
            (NodeId(5), Distance::Finite(14)),
            (NodeId(3), Distance::Finite(15)),
        ]);
        assert_eq!(run.state().visited_order, ids(&[1, 4, 2, 5, 3]));
    }

    #[test]
    fn test_step_reports_relaxations() {
        let graph = Graph::sample();
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(6)).unwrap();

        let StepOutcome::Settled(first) = run.step() else {
            panic!("expected the start node to settle");
        };
        assert_eq!(first.node, NodeId(1));
        assert_eq!(first.relaxed, vec![
            (NodeId(2), Distance::Finite(7)),
            (NodeId(4), Distance::Finite(5)),
        ]);
        assert_eq!(run.frontier(), ids(&[4, 2]));
        assert_eq!(run.predecessor(NodeId(2)), Some(NodeId(1)));

        // settling 4 offers 2 at 14, which is worse than 7
        let StepOutcome::Settled(second) = run.step() else {
            panic!("expected node 4 to settle");
        };
        assert_eq!(second.node, NodeId(4));
        assert_eq!(second.relaxed, vec![(NodeId(5), Distance::Finite(20))]);
    }

    #[test]
    fn test_start_equals_end() {
        let graph = Graph::sample();
        let mut run = DijkstraRun::new(&graph, NodeId(3), NodeId(3)).unwrap();

        assert_eq!(run.step(), StepOutcome::Finished(RunPhase::Completed));
        assert_eq!(run.state().path, ids(&[3]));
        assert_eq!(run.distance(NodeId(3)), Some(Distance::ZERO));
        assert!(run.state().visited_order.is_empty());
    }

    #[test]
    fn test_disconnected_end_terminates_without_path() {
        let mut graph = Graph::sample();
        let lonely = graph.add_node(Point::new(600.0, 400.0));
        let mut run = DijkstraRun::new(&graph, NodeId(1), lonely).unwrap();

        assert_eq!(run.run_to_end(), RunPhase::NoPathFound);
        assert_eq!(run.state().path, vec![lonely]);
        assert_eq!(run.distance(lonely), Some(Distance::Infinite));
        // every reachable node was settled before giving up
        assert_eq!(run.state().visited_order.len(), 6);
    }

    #[test]
    fn test_ties_broken_by_lowest_id() {
        // 1 connects to 3, 2, 4 all at weight 2, end is far away
        let mut graph = Graph::new();
        for i in 0..5 {
            graph.add_node(Point::new(40.0 * i as f64, 0.0));
        }
        graph.add_edge(NodeId(1), NodeId(4), 2);
        graph.add_edge(NodeId(1), NodeId(3), 2);
        graph.add_edge(NodeId(1), NodeId(2), 2);
        graph.add_edge(NodeId(4), NodeId(5), 1);

        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(5)).unwrap();
        run.run_to_end();
        assert_eq!(run.state().visited_order, ids(&[1, 2, 3, 4]));
        assert_eq!(run.state().path, ids(&[1, 4, 5]));
    }

    #[test]
    fn test_equal_length_paths_keep_first_predecessor() {
        // 1-2-4 and 1-3-4 both cost 2
        let mut graph = Graph::new();
        for i in 0..4 {
            graph.add_node(Point::new(40.0 * i as f64, 0.0));
        }
        graph.add_edge(NodeId(1), NodeId(2), 1);
        graph.add_edge(NodeId(1), NodeId(3), 1);
        graph.add_edge(NodeId(2), NodeId(4), 1);
        graph.add_edge(NodeId(3), NodeId(4), 1);

        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(4)).unwrap();
        assert_eq!(run.run_to_end(), RunPhase::Completed);
        assert_eq!(run.state().path, ids(&[1, 2, 4]));
    }

    #[test]
    fn test_finished_run_is_stable() {
        let graph = line_graph(&[3, 4]);
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(3)).unwrap();

        assert_eq!(run.run_to_end(), RunPhase::Completed);
        let state = run.state().clone();
        assert_eq!(run.step(), StepOutcome::Finished(RunPhase::Completed));
        assert_eq!(run.state(), &state);
        assert_eq!(run.distance(NodeId(3)), Some(Distance::Finite(7)));
    }

    #[test]
    fn test_snapshot_ignores_later_edits() {
        let mut graph = line_graph(&[5, 5]);
        let mut run = DijkstraRun::new(&graph, NodeId(1), NodeId(3)).unwrap();

        // a shortcut added after the run started is not seen
        graph.add_edge(NodeId(1), NodeId(3), 1);
        graph.clear();

        assert_eq!(run.run_to_end(), RunPhase::Completed);
        assert_eq!(run.distance(NodeId(3)), Some(Distance::Finite(10)));
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let graph = line_graph(&[1]);
        assert_eq!(
            DijkstraRun::new(&graph, NodeId(1), NodeId(9)).unwrap_err(),
            RunError::UnknownNode(NodeId(9))
        );
    }

    #[test]
    fn test_initial_state() {
        let graph = Graph::sample();
        let run = DijkstraRun::new(&graph, NodeId(2), NodeId(6)).unwrap();

        assert_eq!(run.phase(), RunPhase::Running);
        assert_eq!(run.distance(NodeId(2)), Some(Distance::ZERO));
        for id in [1, 3, 4, 5, 6] {
            assert_eq!(run.distance(NodeId(id)), Some(Distance::Infinite));
        }
        assert!(run.state().visited_order.is_empty());
        assert!(run.state().path.is_empty());
        assert_eq!(run.frontier(), ids(&[2]));
    }
}
