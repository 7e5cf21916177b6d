use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;

use crate::node::{Kind, Node};
use crate::record::Record;

/**
 * Bipartite graph of performers and the productions they were credited in.
 *
 * All nodes live in a single arena, `nodes`, and are referred to by index.
 * The two name -> index mappings are disjoint: a performer and a production
 * may share a name without sharing a node. The `performers` and
 * `productions` lists keep the first-seen order of the feed, which is the
 * iteration order used for every tie-break.
 *
 * Built once, then only read; traversals keep their own state.
 */
#[derive(Debug, Clone, Default)]
pub struct BipartiteGraph {
    nodes: Vec<Node>,
    performer_index: HashMap<String, usize>,
    production_index: HashMap<String, usize>,
    performers: Vec<usize>,
    productions: Vec<usize>,
    num_edges: usize,
}

impl fmt::Display for BipartiteGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "BipartiteGraph {{")?;
        writeln!(f, "    performers: {}", self.performers.len())?;
        writeln!(f, "    productions: {}", self.productions.len())?;
        writeln!(f, "    credits: {}", self.num_edges)?;
        writeln!(f, "}}")
    }
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from a full scan of (already validated) records.
    pub fn from_records<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Record>,
    {
        let mut graph = Self::new();
        let mut count = 0;
        for record in records {
            let record = record.into();
            graph.add_edge(&record.performer, &record.production);
            count += 1;
        }
        debug!(
            "Built graph from {} records: {} performers, {} productions, {} credits",
            count,
            graph.performers.len(),
            graph.productions.len(),
            graph.num_edges
        );
        graph
    }

    // -- PRIVATE NODES FUNCTIONS -- //

    fn insert_node(&mut self, name: &str, kind: Kind) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node::new(name, kind));
        match kind {
            Kind::Performer => {
                self.performer_index.insert(name.to_string(), index);
                self.performers.push(index);
            }
            Kind::Production => {
                self.production_index.insert(name.to_string(), index);
                self.productions.push(index);
            }
        }
        trace!("New {:?} node {}: '{}'", kind, index, name);
        index
    }

    // -- PUBLIC NODES FUNCTIONS -- //

    pub fn contains_performer(&self, name: &str) -> bool {
        self.performer_index.contains_key(name)
    }

    /// Look up, or create, the performer node with this name.
    pub fn add_performer(&mut self, name: &str) -> usize {
        match self.performer_index.get(name) {
            Some(&index) => index,
            None => self.insert_node(name, Kind::Performer),
        }
    }

    /// Look up, or create, the production node with this title.
    pub fn add_production(&mut self, title: &str) -> usize {
        match self.production_index.get(title) {
            Some(&index) => index,
            None => self.insert_node(title, Kind::Production),
        }
    }

    pub fn performer(&self, name: &str) -> Option<usize> {
        self.performer_index.get(name).copied()
    }

    pub fn production(&self, title: &str) -> Option<usize> {
        self.production_index.get(title).copied()
    }

    /// Panics if `index` did not come from this graph.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn name(&self, index: usize) -> &str {
        self.nodes[index].name()
    }

    /// Performer nodes, in the order they first appeared in the feed.
    pub fn performers(&self) -> impl Iterator<Item = (usize, &Node)> + '_ {
        self.performers.iter().map(move |&i| (i, &self.nodes[i]))
    }

    /// Production nodes, in the order they first appeared in the feed.
    pub fn productions(&self) -> impl Iterator<Item = (usize, &Node)> + '_ {
        self.productions.iter().map(move |&i| (i, &self.nodes[i]))
    }

    /// Names of the nodes adjacent to `index`, in insertion order.
    pub fn neighbor_names(&self, index: usize) -> Vec<String> {
        self.nodes[index]
            .neighbors()
            .iter()
            .map(|&j| self.nodes[j].name().to_string())
            .collect()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_performers(&self) -> usize {
        self.performers.len()
    }

    pub fn num_productions(&self) -> usize {
        self.productions.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- PUBLIC EDGES FUNCTIONS -- //

    pub fn contains_edge(&self, performer: &str, production: &str) -> bool {
        match (self.performer(performer), self.production(production)) {
            (Some(a), Some(b)) => self.nodes[a].has_neighbor(b),
            _ => false,
        }
    }

    /// Credit `performer` in `production`, creating either node as needed.
    /// Repeating an existing credit leaves the graph unchanged.
    pub fn add_edge(&mut self, performer: &str, production: &str) -> &mut Self {
        let a = self.add_performer(performer);
        let b = self.add_production(production);
        if self.nodes[a].link(b) {
            let linked = self.nodes[b].link(a);
            debug_assert!(linked, "adjacency out of sync: {} <-> {}", a, b);
            self.num_edges += 1;
        } else {
            trace!("Duplicate credit ignored: '{}' in '{}'", performer, production);
        }
        self
    }
}
