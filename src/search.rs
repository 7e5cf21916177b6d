use log::{debug, trace};
use std::collections::VecDeque;
use std::fmt;

use crate::bipartite::BipartiteGraph;
use crate::error::{BaconError, Result};

/// Distance, in production hops, from a performer to the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distance {
    Hops(usize),
    Unreachable,
}

impl Distance {
    pub fn hops(self) -> Option<usize> {
        match self {
            Distance::Hops(n) => Some(n),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Hops(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Hops(n) => write!(f, "{}", n),
            Distance::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Alternating performer and production names, source first, center last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Path(Vec<String>),
    Unreachable,
}

impl Route {
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Route::Path(names) => Some(names),
            Route::Unreachable => None,
        }
    }

    /// The distance this route represents.
    pub fn distance(&self) -> Distance {
        match self {
            Route::Path(names) => Distance::Hops(names.len() / 2),
            Route::Unreachable => Distance::Unreachable,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Path(names) => write!(f, "{}", names.join(" -> ")),
            Route::Unreachable => write!(f, "unreachable"),
        }
    }
}

/**
 * Working state for one breadth-first search.
 *
 * The per-node fields (`visited`, `edges`, `previous`) are parallel arrays
 * over the graph's node arena. A `Traversal` is created for every query and
 * dropped when the query returns, so no state survives between queries and
 * any number of traversals may read the same graph.
 */
#[derive(Debug)]
pub struct Traversal<'g> {
    graph: &'g BipartiteGraph,
    visited: Vec<bool>,
    edges: Vec<usize>,
    previous: Vec<Option<usize>>,
    queue: VecDeque<usize>,
}

impl<'g> Traversal<'g> {
    pub fn new(graph: &'g BipartiteGraph) -> Self {
        let n = graph.num_nodes();
        Self {
            graph,
            visited: vec![false; n],
            edges: vec![0; n],
            previous: vec![None; n],
            queue: VecDeque::new(),
        }
    }

    fn discover(&mut self, node: usize, from: Option<usize>) {
        let edges = from.map_or(0, |p| self.edges[p] + 1);
        self.visited[node] = true;
        self.edges[node] = edges;
        self.previous[node] = from;
        self.queue.push_back(node);
    }

    /**
     *  Breadth-first search from `source`.
     *
     *  Neighbours are expanded in adjacency (insertion) order, and a node's
     *  predecessor is whichever node discovered it first. With a `target`,
     *  the search stops as soon as the target is discovered and returns
     *  `true`; without one, it exhausts the component and returns `false`.
     */
    pub fn run(&mut self, source: usize, target: Option<usize>) -> bool {
        let graph = self.graph;
        self.discover(source, None);
        if target == Some(source) {
            return true;
        }

        while let Some(node) = self.queue.pop_front() {
            for &next in graph.node(node).neighbors() {
                if self.visited[next] {
                    continue;
                }
                self.discover(next, Some(node));
                trace!(
                    "visit '{}' via '{}' ({} edges)",
                    graph.name(next),
                    graph.name(node),
                    self.edges[next]
                );
                if target == Some(next) {
                    return true;
                }
            }
        }
        false
    }

    /// Performer-to-performer distance; every hop is two graph edges.
    pub fn distance(&self, node: usize) -> Distance {
        if !self.visited[node] {
            return Distance::Unreachable;
        }
        let edges = self.edges[node];
        debug_assert!(edges % 2 == 0 || !self.graph.node(node).is_performer());
        Distance::Hops(edges / 2)
    }

    /// Names along the predecessor chain, from the source to `node`.
    pub fn path(&self, node: usize) -> Route {
        if !self.visited[node] {
            return Route::Unreachable;
        }
        let mut names = Vec::with_capacity(self.edges[node] + 1);
        let mut curr = Some(node);
        while let Some(i) = curr {
            names.push(self.graph.name(i).to_string());
            curr = self.previous[i];
        }
        names.reverse();
        Route::Path(names)
    }
}

/**
 * Shortest distances and paths between performers of a graph.
 *
 * Each query runs its own `Traversal`; the engine itself holds nothing but a
 * shared reference, so it is `Copy` and may be used from several threads.
 */
#[derive(Debug, Clone, Copy)]
pub struct DistanceEngine<'g> {
    graph: &'g BipartiteGraph,
}

impl<'g> DistanceEngine<'g> {
    pub fn new(graph: &'g BipartiteGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g BipartiteGraph {
        self.graph
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.graph
            .performer(name)
            .ok_or_else(|| BaconError::UnknownPerformer(name.to_string()))
    }

    /// Number of production hops from `source` to `center`.
    pub fn distance_to(&self, source: &str, center: &str) -> Result<Distance> {
        let s = self.lookup(source)?;
        let c = self.lookup(center)?;
        let mut bfs = Traversal::new(self.graph);
        bfs.run(s, Some(c));
        let distance = bfs.distance(c);
        debug!("distance '{}' -> '{}': {}", source, center, distance);
        Ok(distance)
    }

    /// The first shortest path found from `source` to `center`.
    pub fn path_to(&self, source: &str, center: &str) -> Result<Route> {
        let s = self.lookup(source)?;
        let c = self.lookup(center)?;
        let mut bfs = Traversal::new(self.graph);
        bfs.run(s, Some(c));
        let route = bfs.path(c);
        debug!("path '{}' -> '{}': {}", source, center, route);
        Ok(route)
    }

    /**
     *  Distance from `center` to every performer, in performer order.
     *
     *  One exhaustive search replaces a query per performer: edges are
     *  undirected and unit-cost, so the distances are the same either way.
     */
    pub fn distances_from(&self, center: &str) -> Result<Vec<Distance>> {
        let c = self.lookup(center)?;
        let mut bfs = Traversal::new(self.graph);
        bfs.run(c, None);
        Ok(self
            .graph
            .performers()
            .map(|(i, _)| bfs.distance(i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> BipartiteGraph {
        BipartiteGraph::from_records(vec![
            ("Kevin Bacon", "Footloose"),
            ("Kyra Sedgwick", "Footloose"),
            ("Kyra Sedgwick", "The Closer"),
            ("J.K. Simmons", "The Closer"),
            ("Loner", "Solo Show"),
        ])
    }

    #[test]
    fn two_performers_one_production() {
        let g = BipartiteGraph::from_records(vec![
            ("Kevin Bacon", "Footloose"),
            ("Kyra Sedgwick", "Footloose"),
        ]);
        let engine = DistanceEngine::new(&g);
        assert_eq!(
            engine.distance_to("Kyra Sedgwick", "Kevin Bacon").unwrap(),
            Distance::Hops(1)
        );
        let route = engine.path_to("Kyra Sedgwick", "Kevin Bacon").unwrap();
        assert_eq!(
            route.names().unwrap(),
            &["Kyra Sedgwick", "Footloose", "Kevin Bacon"]
        );
        let back = engine.path_to("Kevin Bacon", "Kyra Sedgwick").unwrap();
        assert_eq!(
            back.names().unwrap(),
            &["Kevin Bacon", "Footloose", "Kyra Sedgwick"]
        );
    }

    #[test]
    fn center_to_itself() {
        let g = chain();
        let engine = DistanceEngine::new(&g);
        assert_eq!(
            engine.distance_to("Kevin Bacon", "Kevin Bacon").unwrap(),
            Distance::Hops(0)
        );
        assert_eq!(
            engine.path_to("Kevin Bacon", "Kevin Bacon").unwrap(),
            Route::Path(vec!["Kevin Bacon".to_string()])
        );
    }

    #[test]
    fn unreachable_and_unknown_are_distinct() {
        let g = chain();
        let engine = DistanceEngine::new(&g);
        assert_eq!(
            engine.distance_to("Loner", "Kevin Bacon").unwrap(),
            Distance::Unreachable
        );
        assert_eq!(
            engine.path_to("Loner", "Kevin Bacon").unwrap(),
            Route::Unreachable
        );
        assert!(matches!(
            engine.distance_to("Nobody", "Kevin Bacon"),
            Err(BaconError::UnknownPerformer(name)) if name == "Nobody"
        ));
        assert!(matches!(
            engine.path_to("Kevin Bacon", "Nobody"),
            Err(BaconError::UnknownPerformer(_))
        ));
    }

    #[test]
    fn productions_are_not_endpoints() {
        let g = chain();
        let engine = DistanceEngine::new(&g);
        assert!(matches!(
            engine.distance_to("Footloose", "Kevin Bacon"),
            Err(BaconError::UnknownPerformer(_))
        ));
    }

    #[test]
    fn distances_halve_edges() {
        let g = chain();
        let engine = DistanceEngine::new(&g);
        let d = engine.distances_from("Kevin Bacon").unwrap();
        assert_eq!(
            d,
            vec![
                Distance::Hops(0),
                Distance::Hops(1),
                Distance::Hops(2),
                Distance::Unreachable
            ]
        );
    }

    #[test]
    fn first_discovered_path_wins() {
        // Both productions connect A and C; A's adjacency lists "First"
        // before "Second", so the path goes through "First".
        let g = BipartiteGraph::from_records(vec![
            ("A", "First"),
            ("A", "Second"),
            ("C", "Second"),
            ("C", "First"),
        ]);
        let engine = DistanceEngine::new(&g);
        let route = engine.path_to("A", "C").unwrap();
        assert_eq!(route.names().unwrap(), &["A", "First", "C"]);
        let route = engine.path_to("C", "A").unwrap();
        assert_eq!(route.names().unwrap(), &["C", "Second", "A"]);
    }

    #[test]
    fn repeated_queries_are_independent() {
        let g = chain();
        let engine = DistanceEngine::new(&g);
        let first = engine.path_to("J.K. Simmons", "Kevin Bacon").unwrap();
        for _ in 0..3 {
            assert_eq!(
                engine.path_to("J.K. Simmons", "Kevin Bacon").unwrap(),
                first
            );
            assert_eq!(
                engine.distance_to("Loner", "Kevin Bacon").unwrap(),
                Distance::Unreachable
            );
        }
        assert_eq!(
            engine.distance_to("Kyra Sedgwick", "J.K. Simmons").unwrap(),
            Distance::Hops(1)
        );
        assert_eq!(first.distance(), Distance::Hops(2));
    }
}
