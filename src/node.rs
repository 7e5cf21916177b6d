use std::fmt;

/// Which side of the bipartite graph a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Performer,
    Production,
}

impl Kind {
    pub fn opposite(self) -> Self {
        match self {
            Kind::Performer => Kind::Production,
            Kind::Production => Kind::Performer,
        }
    }
}

/**
 * A named vertex of the graph: either a performer or a production.
 *
 * Neighbours are arena indices into the owning graph, and always belong to
 * the opposite side. They are kept in insertion order, which fixes the order
 * that a traversal visits them.
 *
 * Nodes carry no traversal state; see `search::Traversal`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    kind: Kind,
    neighbors: Vec<usize>,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Node {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            neighbors: Vec::new(),
        }
    }

    // -- PUBLIC QUERY FUNCTIONS -- //

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_performer(&self) -> bool {
        self.kind == Kind::Performer
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn has_neighbor(&self, node: usize) -> bool {
        self.neighbors.iter().any(|x| *x == node)
    }

    // -- MODIFIER FUNCTIONS -- //

    /// Returns `false`, and leaves the list untouched, if already adjacent.
    pub(crate) fn link(&mut self, node: usize) -> bool {
        if self.has_neighbor(node) {
            return false;
        }
        self.neighbors.push(node);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_keeps_insertion_order_and_skips_duplicates() {
        let mut node = Node::new("Footloose", Kind::Production);
        assert!(node.link(4));
        assert!(node.link(1));
        assert!(!node.link(4));
        assert_eq!(node.neighbors(), &[4, 1]);
        assert_eq!(node.degree(), 2);
    }

    #[test]
    fn opposite_kind() {
        assert_eq!(Kind::Performer.opposite(), Kind::Production);
        assert_eq!(Kind::Production.opposite(), Kind::Performer);
        assert!(Node::new("Kevin Bacon", Kind::Performer).is_performer());
    }
}
