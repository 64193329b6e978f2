//! Dependency graph module.
//!
//! Provides the `StatGraph` type, which orders a stat sheet's stats so
//! that every transform's dependencies are resolved before it runs.

use crate::error::RosterError;
use crate::stat::StatKind;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Directed graph of stat dependencies.
///
/// Edges point from a dependency to the stat that reads it.
///
/// # Examples
///
/// ```rust
/// use kivostat::graph::StatGraph;
/// use kivostat::StatKind;
///
/// let mut graph = StatGraph::new();
/// graph.add_edge(StatKind::AverageDamage, StatKind::AttackPower);
///
/// let order = graph.topological_sort().unwrap();
/// let atk = order.iter().position(|s| *s == StatKind::AttackPower).unwrap();
/// let avg = order.iter().position(|s| *s == StatKind::AverageDamage).unwrap();
/// assert!(atk < avg);
/// ```
#[derive(Debug, Default)]
pub struct StatGraph {
    graph: DiGraph<StatKind, ()>,
    node_map: HashMap<StatKind, NodeIndex>,
}

impl StatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing index if already present.
    pub fn add_node(&mut self, stat: StatKind) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&stat) {
            return idx;
        }
        let idx = self.graph.add_node(stat);
        self.node_map.insert(stat, idx);
        idx
    }

    /// Record that `dependent` reads `dependency`.
    pub fn add_edge(&mut self, dependent: StatKind, dependency: StatKind) {
        let from_idx = self.add_node(dependent);
        let to_idx = self.add_node(dependency);
        self.graph.update_edge(to_idx, from_idx, ());
    }

    pub fn contains_node(&self, stat: StatKind) -> bool {
        self.node_map.contains_key(&stat)
    }

    /// Direct dependencies of a stat.
    pub fn dependencies(&self, stat: StatKind) -> Vec<StatKind> {
        self.node_map
            .get(&stat)
            .map(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .map(|n| self.graph[n])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find one cycle, returned as a closed path (first == last).
    pub fn find_cycle(&self) -> Option<Vec<StatKind>> {
        let mut visited = HashSet::new();
        let mut on_stack = Vec::new();

        for start in self.graph.node_indices() {
            if !visited.contains(&start) {
                if let Some(cycle) = self.dfs_cycle(start, &mut visited, &mut on_stack) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn dfs_cycle(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_stack: &mut Vec<NodeIndex>,
    ) -> Option<Vec<StatKind>> {
        visited.insert(node);
        on_stack.push(node);

        for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if let Some(pos) = on_stack.iter().position(|&n| n == next) {
                let mut cycle: Vec<StatKind> =
                    on_stack[pos..].iter().map(|&n| self.graph[n]).collect();
                cycle.push(self.graph[next]);
                return Some(cycle);
            }
            if !visited.contains(&next) {
                if let Some(cycle) = self.dfs_cycle(next, visited, on_stack) {
                    return Some(cycle);
                }
            }
        }

        on_stack.pop();
        None
    }

    /// Stats in an order where dependencies come first.
    pub fn topological_sort(&self) -> Result<Vec<StatKind>, RosterError> {
        if let Some(path) = self.find_cycle() {
            return Err(RosterError::Cycle { path });
        }

        toposort(&self.graph, None)
            .map(|indices| indices.into_iter().map(|idx| self.graph[idx]).collect())
            .map_err(|cycle| RosterError::Cycle {
                path: vec![self.graph[cycle.node_id()]],
            })
    }
}
