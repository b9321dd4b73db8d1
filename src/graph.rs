//! Precedence graph.
//!
//! An arena with one node per distinct operation code. When a code appears
//! more than once, the first task carrying it owns the node and later
//! tasks only map onto it. Predecessor references that do not resolve are
//! kept aside (for diagnostics) and excluded from traversal.
//!
//! Traversals are iterative with an explicit colour map, so stack depth does
//! not grow with the length of the longest precedence chain.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS)

use std::collections::HashMap;

use crate::models::Task;

/// DFS visit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// Arena-indexed precedence graph built from a task list.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceGraph {
    /// Node → code.
    codes: Vec<String>,
    /// Code → node.
    index: HashMap<String, usize>,
    /// Node → position of the task that owns it.
    owners: Vec<usize>,
    /// Task position → node.
    task_nodes: Vec<usize>,
    /// Node → resolved predecessor nodes, as entered.
    predecessors: Vec<Vec<usize>>,
    /// Node → successor nodes, in input order of the dependents.
    successors: Vec<Vec<usize>>,
    /// Positions of tasks whose code was already taken.
    duplicates: Vec<usize>,
    /// (task position, missing code) for every unresolved reference.
    dangling: Vec<(usize, String)>,
}

impl PrecedenceGraph {
    /// Builds the graph. First-seen code wins.
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph = Self::default();

        for (pos, task) in tasks.iter().enumerate() {
            match graph.index.get(&task.code) {
                Some(&node) => {
                    graph.duplicates.push(pos);
                    graph.task_nodes.push(node);
                }
                None => {
                    let node = graph.codes.len();
                    graph.index.insert(task.code.clone(), node);
                    graph.codes.push(task.code.clone());
                    graph.owners.push(pos);
                    graph.task_nodes.push(node);
                }
            }
        }

        let n = graph.codes.len();
        graph.predecessors = vec![Vec::new(); n];
        graph.successors = vec![Vec::new(); n];

        for (pos, task) in tasks.iter().enumerate() {
            let node = graph.task_nodes[pos];
            let is_owner = graph.owners[node] == pos;
            for code in &task.predecessors {
                match graph.index.get(code) {
                    Some(&pred) if is_owner => graph.predecessors[node].push(pred),
                    Some(_) => {}
                    None => graph.dangling.push((pos, code.clone())),
                }
            }
        }

        for node in 0..n {
            for i in 0..graph.predecessors[node].len() {
                let pred = graph.predecessors[node][i];
                graph.successors[pred].push(node);
            }
        }

        graph
    }

    /// Number of distinct codes.
    pub fn node_count(&self) -> usize {
        self.codes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Node for a code.
    pub fn node_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    /// Node a task position maps onto.
    pub fn task_node(&self, position: usize) -> usize {
        self.task_nodes[position]
    }

    /// Position of the task that owns `node`.
    pub fn owner(&self, node: usize) -> usize {
        self.owners[node]
    }

    /// Code of `node`.
    pub fn code(&self, node: usize) -> &str {
        &self.codes[node]
    }

    /// Resolved predecessors of `node`.
    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.predecessors[node]
    }

    /// Successors of `node`.
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }

    /// Successor codes of `node`.
    pub fn successor_codes(&self, node: usize) -> Vec<String> {
        self.successors[node]
            .iter()
            .map(|&s| self.codes[s].clone())
            .collect()
    }

    /// Task positions that repeat an earlier code.
    pub fn duplicates(&self) -> &[usize] {
        &self.duplicates
    }

    /// Unresolved predecessor references as (task position, missing code).
    pub fn dangling(&self) -> &[(usize, String)] {
        &self.dangling
    }

    /// Nodes at which a precedence cycle was closed.
    ///
    /// Walks predecessor edges depth-first from every node in input order.
    /// Each time an in-progress node is reached again, that node is
    /// recorded and the branch is not descended further. Empty for a DAG.
    pub fn cycle_entries(&self) -> Vec<usize> {
        let n = self.node_count();
        let mut color = vec![Color::Unvisited; n];
        let mut entries = Vec::new();

        for root in 0..n {
            if color[root] != Color::Unvisited {
                continue;
            }
            color[root] = Color::InProgress;
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(&(node, cursor)) = stack.last() {
                match self.predecessors[node].get(cursor) {
                    Some(&next) => {
                        if let Some(top) = stack.last_mut() {
                            top.1 += 1;
                        }
                        match color[next] {
                            Color::InProgress => entries.push(next),
                            Color::Done => {}
                            Color::Unvisited => {
                                color[next] = Color::InProgress;
                                stack.push((next, 0));
                            }
                        }
                    }
                    None => {
                        color[node] = Color::Done;
                        stack.pop();
                    }
                }
            }
        }

        entries
    }
}
