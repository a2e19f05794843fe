//! Default relationship store backed by a petgraph stable graph.

use std::collections::HashMap;
use std::hash::Hash;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::store::RelationStore;

/// A [`RelationStore`] over a [`StableDiGraph`] with a value-to-index
/// interning map.
///
/// A stable graph keeps node indices valid across removals, which pair and
/// object removal rely on. Nodes left without any pair are pruned so the
/// store never accumulates isolated entries.
pub struct GraphStore<T> {
    graph: StableDiGraph<T, ()>,
    /// Lookup from value to its node index.
    index: HashMap<T, NodeIndex>,
}

impl<T: Eq + Hash + Clone> GraphStore<T> {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::default(),
            index: HashMap::new(),
        }
    }

    /// Add or retrieve the node for a value.
    fn intern(&mut self, value: T) -> NodeIndex {
        if let Some(&idx) = self.index.get(&value) {
            return idx;
        }
        let idx = self.graph.add_node(value.clone());
        self.index.insert(value, idx);
        idx
    }

    fn lookup(&self, value: &T) -> Option<NodeIndex> {
        self.index.get(value).copied()
    }

    /// Drop the node for `value` if no pair touches it anymore.
    fn prune(&mut self, value: &T) {
        if let Some(idx) = self.lookup(value) {
            if self.graph.neighbors_undirected(idx).next().is_none() {
                self.graph.remove_node(idx);
                self.index.remove(value);
            }
        }
    }

    fn values_directed(&self, of: &T, dir: Direction) -> Vec<T> {
        match self.lookup(of) {
            Some(idx) => self
                .graph
                .neighbors_directed(idx, dir)
                .map(|n| self.graph[n].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    fn has_directed(&self, of: &T, dir: Direction) -> bool {
        self.lookup(of)
            .map(|idx| self.graph.neighbors_directed(idx, dir).next().is_some())
            .unwrap_or(false)
    }
}

impl<T: Eq + Hash + Clone> Default for GraphStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> RelationStore<T> for GraphStore<T> {
    fn add(&mut self, from: T, to: T) {
        let a = self.intern(from);
        let b = self.intern(to);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, ());
        }
    }

    fn exists(&self, from: &T, to: &T) -> bool {
        match (self.lookup(from), self.lookup(to)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    fn requirements(&self, of: &T) -> Vec<T> {
        self.values_directed(of, Direction::Outgoing)
    }

    fn dependents(&self, of: &T) -> Vec<T> {
        self.values_directed(of, Direction::Incoming)
    }

    fn has_requirements(&self, of: &T) -> bool {
        self.has_directed(of, Direction::Outgoing)
    }

    fn has_dependents(&self, of: &T) -> bool {
        self.has_directed(of, Direction::Incoming)
    }

    fn remove(&mut self, from: &T, to: &T) {
        let (Some(a), Some(b)) = (self.lookup(from), self.lookup(to)) else {
            return;
        };
        if let Some(edge) = self.graph.find_edge(a, b) {
            self.graph.remove_edge(edge);
            self.prune(from);
            self.prune(to);
        }
    }

    fn remove_all(&mut self, object: &T) {
        let Some(idx) = self.lookup(object) else {
            return;
        };
        let neighbors: Vec<T> = self
            .graph
            .neighbors_undirected(idx)
            .map(|n| self.graph[n].clone())
            .collect();
        self.graph.remove_node(idx);
        self.index.remove(object);
        for neighbor in &neighbors {
            self.prune(neighbor);
        }
    }

    fn pairs(&self) -> Vec<(T, T)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].clone(), self.graph[b].clone()))
            .collect()
    }

    fn clear(&mut self) {
        self.graph.clear();
        self.index.clear();
    }

    fn len(&self) -> usize {
        self.graph.edge_count()
    }
}
