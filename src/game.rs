use log::{debug, info};
use std::fmt;

use crate::analytics::{self, Average, Credits, Entry, Histogram, Longest, Ranked};
use crate::bipartite::BipartiteGraph;
use crate::error::{BaconError, Result};
use crate::record::Record;
use crate::search::{Distance, DistanceEngine, Route};

/**
 * A Bacon-number game: a loaded graph plus the performer that every query is
 * measured against.
 *
 * The center is validated whenever it is set, so every query below can rely
 * on it being a performer of the graph.
 */
#[derive(Debug, Clone)]
pub struct Game {
    graph: BipartiteGraph,
    center: String,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Game {{")?;
        writeln!(f, "    center: {}", self.center)?;
        writeln!(f, "    performers: {}", self.graph.num_performers())?;
        writeln!(f, "    productions: {}", self.graph.num_productions())?;
        writeln!(f, "    credits: {}", self.graph.num_edges())?;
        writeln!(f, "}}")
    }
}

impl Game {
    pub fn new(graph: BipartiteGraph, center: &str) -> Result<Self> {
        if graph.is_empty() {
            return Err(BaconError::EmptyDataset);
        }
        if !graph.contains_performer(center) {
            return Err(BaconError::UnknownPerformer(center.to_string()));
        }
        info!(
            "Loaded {} performers and {} productions, centered on '{}'",
            graph.num_performers(),
            graph.num_productions(),
            center
        );
        Ok(Self {
            graph,
            center: center.to_string(),
        })
    }

    pub fn from_records<I, R>(records: I, center: &str) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Record>,
    {
        Self::new(BipartiteGraph::from_records(records), center)
    }

    // -- CENTER -- //

    pub fn center(&self) -> &str {
        &self.center
    }

    /// Fails, leaving the current center in place, for an unknown name.
    pub fn recenter(&mut self, name: &str) -> Result<()> {
        if !self.graph.contains_performer(name) {
            return Err(BaconError::UnknownPerformer(name.to_string()));
        }
        debug!("recenter: '{}' -> '{}'", self.center, name);
        self.center = name.to_string();
        Ok(())
    }

    // -- DATASET -- //

    pub fn graph(&self) -> &BipartiteGraph {
        &self.graph
    }

    pub fn performer_count(&self) -> usize {
        self.graph.num_performers()
    }

    pub fn production_count(&self) -> usize {
        self.graph.num_productions()
    }

    pub fn credit_count(&self) -> usize {
        self.graph.num_edges()
    }

    pub fn credits_of(&self, name: &str) -> Result<Vec<String>> {
        let i = self
            .graph
            .performer(name)
            .ok_or_else(|| BaconError::UnknownPerformer(name.to_string()))?;
        Ok(self.graph.neighbor_names(i))
    }

    pub fn cast_of(&self, title: &str) -> Result<Vec<String>> {
        let i = self
            .graph
            .production(title)
            .ok_or_else(|| BaconError::UnknownProduction(title.to_string()))?;
        Ok(self.graph.neighbor_names(i))
    }

    // -- QUERIES -- //

    fn engine(&self) -> DistanceEngine<'_> {
        DistanceEngine::new(&self.graph)
    }

    pub fn distance_to(&self, name: &str) -> Result<Distance> {
        self.engine().distance_to(name, &self.center)
    }

    pub fn path_to(&self, name: &str) -> Result<Route> {
        self.engine().path_to(name, &self.center)
    }

    pub fn average_distance(&self) -> Result<Average> {
        analytics::average_distance(&self.graph, &self.center)
    }

    pub fn histogram(&self) -> Result<Histogram> {
        analytics::distance_histogram(&self.graph, &self.center)
    }

    /// Ranking does not depend on the current center, which is untouched.
    pub fn top_centers(&self, n: usize) -> Vec<Ranked> {
        analytics::top_centers(&self.graph, n)
    }

    pub fn most_credited(&self) -> Option<Credits> {
        analytics::most_credited(&self.graph)
    }

    pub fn longest_path(&self) -> Result<Longest> {
        analytics::longest_path(&self.graph, &self.center)
    }

    pub fn all_distances(&self) -> Result<Vec<Entry>> {
        analytics::all_distances(&self.graph, &self.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::from_records(
            vec![
                ("Kevin Bacon", "Footloose"),
                ("Kyra Sedgwick", "Footloose"),
                ("Kyra Sedgwick", "The Closer"),
                ("J.K. Simmons", "The Closer"),
            ],
            "Kevin Bacon",
        )
        .unwrap()
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let records: Vec<(&str, &str)> = Vec::new();
        assert!(matches!(
            Game::from_records(records, "Kevin Bacon"),
            Err(BaconError::EmptyDataset)
        ));
    }

    #[test]
    fn center_must_be_a_performer() {
        let records = vec![("Kevin Bacon", "Footloose")];
        assert!(matches!(
            Game::from_records(records, "Footloose"),
            Err(BaconError::UnknownPerformer(_))
        ));
    }

    #[test]
    fn recenter_validates_and_keeps_old_center() {
        let mut g = game();
        assert!(g.recenter("Nobody").is_err());
        assert_eq!(g.center(), "Kevin Bacon");
        g.recenter("J.K. Simmons").unwrap();
        assert_eq!(g.distance_to("Kevin Bacon").unwrap(), Distance::Hops(2));
        assert_eq!(g.distance_to("J.K. Simmons").unwrap(), Distance::Hops(0));
    }

    #[test]
    fn top_centers_leaves_center_alone() {
        let g = game();
        let top = g.top_centers(1);
        assert_eq!(top[0].name, "Kyra Sedgwick");
        assert_eq!(g.center(), "Kevin Bacon");
    }

    #[test]
    fn credits_and_cast() {
        let g = game();
        assert_eq!(g.credits_of("Kyra Sedgwick").unwrap().len(), 2);
        assert_eq!(
            g.cast_of("Footloose").unwrap(),
            vec!["Kevin Bacon", "Kyra Sedgwick"]
        );
        assert!(matches!(
            g.cast_of("Nope"),
            Err(BaconError::UnknownProduction(_))
        ));
        assert!(matches!(
            g.credits_of("Footloose"),
            Err(BaconError::UnknownPerformer(_))
        ));
        assert_eq!(g.credit_count(), 4);
    }
}
