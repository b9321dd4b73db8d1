//! Successor inversion and positional weights.
//!
//! The positional weight of an operation is its own standard time plus the
//! standard time of every operation that must follow it, directly or
//! transitively. Each follower is counted once, even when it is reachable
//! through several paths.
//!
//! # Algorithm
//! Post-order DFS over successor edges with an explicit colour map. A node's
//! follower set is the union of its successors and their follower sets,
//! memoized for the duration of one call.
//!
//! # Reference
//! Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//! Positional Weight Technique", Journal of Industrial Engineering 12(6)

use std::collections::BTreeSet;

use crate::error::BalanceError;
use crate::graph::{Color, PrecedenceGraph};
use crate::models::Task;

/// Fills `successors` on every task from the graph.
///
/// Tasks that repeat a code get the successors of the code's owner.
pub fn link_successors(tasks: &mut [Task], graph: &PrecedenceGraph) {
    for (pos, task) in tasks.iter_mut().enumerate() {
        task.successors = graph.successor_codes(graph.task_node(pos));
    }
}

/// Computes the positional weight of every node.
///
/// Returns [`BalanceError::CyclicGraph`] instead of looping if the graph is
/// not acyclic.
pub fn positional_weights(
    tasks: &[Task],
    graph: &PrecedenceGraph,
) -> Result<Vec<f64>, BalanceError> {
    let n = graph.node_count();
    let times: Vec<f64> = (0..n)
        .map(|node| tasks[graph.owner(node)].standard_time)
        .collect();

    let mut color = vec![Color::Unvisited; n];
    let mut followers: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];

    for root in 0..n {
        if color[root] != Color::Unvisited {
            continue;
        }
        color[root] = Color::InProgress;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(&(node, cursor)) = stack.last() {
            match graph.successors(node).get(cursor) {
                Some(&next) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    match color[next] {
                        Color::InProgress => {
                            return Err(BalanceError::CyclicGraph {
                                code: graph.code(next).to_string(),
                            });
                        }
                        Color::Done => {}
                        Color::Unvisited => {
                            color[next] = Color::InProgress;
                            stack.push((next, 0));
                        }
                    }
                }
                None => {
                    let mut set = BTreeSet::new();
                    for &succ in graph.successors(node) {
                        set.insert(succ);
                        set.extend(followers[succ].iter().copied());
                    }
                    followers[node] = set;
                    color[node] = Color::Done;
                    stack.pop();
                }
            }
        }
    }

    Ok((0..n)
        .map(|node| times[node] + followers[node].iter().map(|&f| times[f]).sum::<f64>())
        .collect())
}

/// Fills `positional_weight` on every task.
///
/// Expects `standard_time` to be filled already.
pub fn propagate(tasks: &mut [Task], graph: &PrecedenceGraph) -> Result<(), BalanceError> {
    let weights = positional_weights(tasks, graph)?;
    for (pos, task) in tasks.iter_mut().enumerate() {
        task.positional_weight = weights[graph.task_node(pos)];
    }
    Ok(())
}
