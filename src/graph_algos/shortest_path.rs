use std::hash::Hash;

use crate::collections::FxIndexMap;


/// Construct the path ending at `goal` by following predecessor links
/// Returns the ordered path from the first node without a predecessor to goal
/// If the goal was never reached the result is just `[goal]`
/// predecessors: node -> node it was reached from on its best known path
pub(crate) fn shortest_path<N>(predecessors: &FxIndexMap<N, N>, goal: N) -> Vec<N>
where
    N: Eq + Hash + Copy,
{

    let mut path = vec![goal];
    let mut current = goal;

    // Trace back from goal to start
    // predecessor links form a tree, the bound only guards a corrupted map
    while let Some(&parent) = predecessors.get(&current) {
        if path.len() > predecessors.len() {
            break;
        }
        path.push(parent);
        current = parent;
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    path
}
