//! Simple-cycle enumeration over the file graph.
//!
//! Unbounded searches use Johnson's algorithm inside each strongly connected
//! component. The number of simple cycles can grow exponentially with graph
//! density, so [`CycleLimits`] can cap both the number of cycles reported and
//! their length. A length cap switches to plain backtracking, since Johnson's
//! blocking rule is only sound for exhaustive searches.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use super::symbols::Dependency;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleLimits {
    pub max_cycles: Option<usize>,
    pub max_cycle_length: Option<usize>,
}

impl CycleLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_max_cycle_length(mut self, max_cycle_length: usize) -> Self {
        self.max_cycle_length = Some(max_cycle_length);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Each cycle lists its files once, starting from the earliest-added file.
    pub cycles: Vec<Vec<String>>,
    /// Set when `max_cycles` stopped the search early.
    pub truncated: bool,
}

impl CycleReport {
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Directed file graph with parallel edges collapsed.
pub struct FileGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl FileGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn from_dependencies<'a>(
        files: impl IntoIterator<Item = &'a str>,
        dependencies: &[Dependency],
    ) -> Self {
        let mut file_graph = Self::new();
        for file in files {
            file_graph.add_node(file);
        }
        for dependency in dependencies {
            file_graph.add_edge(&dependency.source, &dependency.target);
        }
        file_graph
    }

    pub fn add_node(&mut self, file: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(file) {
            return index;
        }
        let index = self.graph.add_node(file.to_string());
        self.node_map.insert(file.to_string(), index);
        index
    }

    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<petgraph::graph::EdgeIndex> {
        let source_idx = self.node_map.get(source)?;
        let target_idx = self.node_map.get(target)?;
        Some(self.graph.update_edge(*source_idx, *target_idx, ()))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn find_cycles(&self, limits: &CycleLimits) -> CycleReport {
        let node_count = self.node_count();
        let adjacency: Vec<Vec<usize>> = (0..node_count)
            .map(|v| {
                let mut targets: Vec<usize> = self
                    .graph
                    .neighbors(NodeIndex::new(v))
                    .map(|w| w.index())
                    .collect();
                targets.sort_unstable();
                targets
            })
            .collect();

        let mut search = CycleSearch {
            adjacency: &adjacency,
            limits: *limits,
            cycles: Vec::new(),
            truncated: false,
        };
        search.run();

        let cycles = search
            .cycles
            .into_iter()
            .map(|cycle| {
                cycle
                    .into_iter()
                    .map(|v| self.graph[NodeIndex::new(v)].clone())
                    .collect()
            })
            .collect();

        if search.truncated {
            warn!(
                max_cycles = limits.max_cycles,
                "cycle enumeration stopped at configured limit"
            );
        }

        CycleReport {
            cycles,
            truncated: search.truncated,
        }
    }
}

impl Default for FileGraph {
    fn default() -> Self {
        Self::new()
    }
}

struct CycleSearch<'a> {
    adjacency: &'a [Vec<usize>],
    limits: CycleLimits,
    cycles: Vec<Vec<usize>>,
    truncated: bool,
}

impl CycleSearch<'_> {
    fn run(&mut self) {
        if self.limits.max_cycle_length == Some(0) {
            return;
        }

        for v in 0..self.adjacency.len() {
            if self.adjacency[v].contains(&v) && !self.record(vec![v]) {
                return;
            }
        }

        if self.limits.max_cycle_length == Some(1) {
            return;
        }

        let all: Vec<usize> = (0..self.adjacency.len()).collect();
        let mut pending: Vec<Vec<usize>> = self.components(&all);
        pending.reverse();

        while let Some(mut component) = pending.pop() {
            component.sort_unstable();
            let start = component[0];
            let mut in_scope = vec![false; self.adjacency.len()];
            for &v in &component {
                in_scope[v] = true;
            }

            if !self.cycles_through(start, &in_scope) {
                return;
            }

            let rest: Vec<usize> = component.into_iter().skip(1).collect();
            let mut next = self.components(&rest);
            next.reverse();
            pending.extend(next);
        }
    }

    /// Strongly connected components of the subgraph induced by `nodes` that can
    /// hold a cycle of two or more files, ordered by their smallest member.
    fn components(&self, nodes: &[usize]) -> Vec<Vec<usize>> {
        let mut subgraph: DiGraph<usize, ()> = DiGraph::new();
        let mut local: HashMap<usize, NodeIndex> = HashMap::with_capacity(nodes.len());
        for &v in nodes {
            local.insert(v, subgraph.add_node(v));
        }
        for &v in nodes {
            for w in &self.adjacency[v] {
                if *w == v {
                    continue;
                }
                if let Some(&target) = local.get(w) {
                    subgraph.add_edge(local[&v], target, ());
                }
            }
        }

        let mut components: Vec<Vec<usize>> = tarjan_scc(&subgraph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.into_iter().map(|idx| subgraph[idx]).collect())
            .collect();
        for component in &mut components {
            component.sort_unstable();
        }
        components.sort_by_key(|component| component[0]);
        components
    }

    /// Returns false once the cycle cap is reached.
    fn record(&mut self, cycle: Vec<usize>) -> bool {
        if let Some(max) = self.limits.max_cycles {
            if self.cycles.len() >= max {
                self.truncated = true;
                return false;
            }
        }
        self.cycles.push(cycle);
        true
    }

    /// Enumerate every simple cycle through `start` that stays inside `in_scope`.
    fn cycles_through(&mut self, start: usize, in_scope: &[bool]) -> bool {
        let bounded = self.limits.max_cycle_length;
        let max_len = bounded.unwrap_or(usize::MAX);
        let adjacency = self.adjacency;

        let mut blocked = vec![false; adjacency.len()];
        let mut block_map: Vec<Vec<usize>> = vec![Vec::new(); adjacency.len()];
        let mut path = vec![start];
        let mut closed = vec![false];
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        blocked[start] = true;

        while let Some(&(v, next)) = stack.last() {
            if let Some(&w) = adjacency[v].get(next) {
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                if !in_scope[w] || w == v {
                    continue;
                }
                if w == start {
                    if !self.record(path.clone()) {
                        return false;
                    }
                    if let Some(flag) = closed.last_mut() {
                        *flag = true;
                    }
                } else if !blocked[w] && path.len() < max_len {
                    path.push(w);
                    closed.push(false);
                    stack.push((w, 0));
                    blocked[w] = true;
                }
                continue;
            }

            stack.pop();
            path.pop();
            let found = closed.pop().unwrap_or(false);

            if bounded.is_some() {
                blocked[v] = false;
                continue;
            }

            if found {
                if let Some(flag) = closed.last_mut() {
                    *flag = true;
                }
                unblock(v, &mut blocked, &mut block_map);
            } else {
                for &w in &adjacency[v] {
                    if in_scope[w] && !block_map[w].contains(&v) {
                        block_map[w].push(v);
                    }
                }
            }
        }

        true
    }
}

fn unblock(v: usize, blocked: &mut [bool], block_map: &mut [Vec<usize>]) {
    let mut stack = vec![v];
    while let Some(u) = stack.pop() {
        if blocked[u] {
            blocked[u] = false;
            stack.append(&mut block_map[u]);
        }
    }
}
