use log::{debug, info, trace};
use std::fmt;

use crate::bipartite::BipartiteGraph;
use crate::error::Result;
use crate::search::{Distance, DistanceEngine, Route};

/// Mean distance to a center, over the performers that can reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Average {
    /// `None` when no performer can reach the center.
    pub mean: Option<f64>,
    pub reachable: usize,
    pub unreachable: usize,
}

impl Average {
    pub fn from_distances<I>(distances: I) -> Self
    where
        I: IntoIterator<Item = Distance>,
    {
        let mut sum: usize = 0;
        let mut reachable = 0;
        let mut unreachable = 0;
        for d in distances {
            match d {
                Distance::Hops(n) => {
                    sum += n;
                    reachable += 1;
                }
                Distance::Unreachable => unreachable += 1,
            }
        }
        let mean = if reachable > 0 {
            Some(sum as f64 / reachable as f64)
        } else {
            None
        };
        Self {
            mean,
            reachable,
            unreachable,
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mean {
            Some(mean) => write!(f, "{:.4}", mean)?,
            None => write!(f, "undefined")?,
        }
        write!(
            f,
            " ({} reachable, {} unreachable)",
            self.reachable, self.unreachable
        )
    }
}

/// Count of performers at each distance from a center.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    /// `counts[d]` performers at distance `d`, for `d` in `0..=max`.
    pub counts: Vec<usize>,
    pub unreachable: usize,
}

impl Histogram {
    pub fn from_distances<I>(distances: I) -> Self
    where
        I: IntoIterator<Item = Distance>,
    {
        let mut hist = Self::default();
        for d in distances {
            match d {
                Distance::Hops(n) => {
                    if hist.counts.len() <= n {
                        hist.counts.resize(n + 1, 0);
                    }
                    hist.counts[n] += 1;
                }
                Distance::Unreachable => hist.unreachable += 1,
            }
        }
        hist
    }

    pub fn count(&self, distance: Distance) -> usize {
        match distance {
            Distance::Hops(n) => self.counts.get(n).copied().unwrap_or(0),
            Distance::Unreachable => self.unreachable,
        }
    }

    pub fn max_distance(&self) -> Option<usize> {
        self.counts.len().checked_sub(1)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum::<usize>() + self.unreachable
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Histogram {{")?;
        for (d, c) in self.counts.iter().enumerate() {
            writeln!(f, "    {:>11}: {}", d, c)?;
        }
        writeln!(f, "    unreachable: {}", self.unreachable)?;
        writeln!(f, "}}")
    }
}

/// A candidate center and its average distance to every performer.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub name: String,
    pub average: Average,
}

/// The performer with the most production credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credits {
    pub name: String,
    pub count: usize,
    pub productions: Vec<String>,
}

/// The performer furthest (but still reachable) from a center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Longest {
    pub name: String,
    pub distance: usize,
    pub route: Route,
}

/// Per-performer result of `all_distances`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub distance: Distance,
    pub route: Route,
}

// -- AGGREGATE OPERATIONS -- //

pub fn average_distance(graph: &BipartiteGraph, center: &str) -> Result<Average> {
    let distances = DistanceEngine::new(graph).distances_from(center)?;
    let average = Average::from_distances(distances);
    debug!("average distance to '{}': {}", center, average);
    Ok(average)
}

pub fn distance_histogram(
    graph: &BipartiteGraph,
    center: &str,
) -> Result<Histogram> {
    let distances = DistanceEngine::new(graph).distances_from(center)?;
    Ok(Histogram::from_distances(distances))
}

/**
 *  Rank every performer as a candidate center, best (lowest average) first,
 *  and keep the first `n`.
 *
 *  Runs one exhaustive search per performer, so the cost is
 *  O(performers * (nodes + edges)). Equal averages keep feed order.
 */
pub fn top_centers(graph: &BipartiteGraph, n: usize) -> Vec<Ranked> {
    let engine = DistanceEngine::new(graph);
    info!(
        "Ranking {} performers as centers (one search each)",
        graph.num_performers()
    );

    let mut ranked: Vec<Ranked> = Vec::with_capacity(graph.num_performers());
    for (i, (_, node)) in graph.performers().enumerate() {
        let average = match engine.distances_from(node.name()) {
            Ok(distances) => Average::from_distances(distances),
            Err(_) => continue,
        };
        trace!("center[{}] '{}': {}", i, node.name(), average);
        ranked.push(Ranked {
            name: node.name().to_string(),
            average,
        });
    }

    ranked.sort_by(|a, b| match (a.average.mean, b.average.mean) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    ranked.truncate(n);
    ranked
}

/// Ties go to the performer seen first in the feed.
pub fn most_credited(graph: &BipartiteGraph) -> Option<Credits> {
    let mut best: Option<(usize, usize)> = None;
    for (i, node) in graph.performers() {
        match best {
            Some((_, count)) if count >= node.degree() => {}
            _ => best = Some((i, node.degree())),
        }
    }
    best.map(|(i, count)| Credits {
        name: graph.name(i).to_string(),
        count,
        productions: graph.neighbor_names(i),
    })
}

/**
 *  The reachable performer furthest from `center`, ties going to the first
 *  in feed order. The reported route runs from that performer to the
 *  center. The center always reaches itself, so there is always an answer.
 */
pub fn longest_path(graph: &BipartiteGraph, center: &str) -> Result<Longest> {
    let engine = DistanceEngine::new(graph);
    let distances = engine.distances_from(center)?;

    let mut best: Option<(usize, usize)> = None;
    for (k, d) in distances.iter().enumerate() {
        if let Distance::Hops(n) = *d {
            match best {
                Some((_, m)) if m >= n => {}
                _ => best = Some((k, n)),
            }
        }
    }

    // `distances_from` succeeded, so the center exists and has distance 0.
    let (k, distance) = best.unwrap_or((0, 0));
    let name = match graph.performers().nth(k) {
        Some((_, node)) => node.name().to_string(),
        None => center.to_string(),
    };
    let route = engine.path_to(&name, center)?;
    Ok(Longest {
        name,
        distance,
        route,
    })
}

/// Distance and route of every performer, one query each.
pub fn all_distances(graph: &BipartiteGraph, center: &str) -> Result<Vec<Entry>> {
    let engine = DistanceEngine::new(graph);
    let mut entries = Vec::with_capacity(graph.num_performers());
    for (_, node) in graph.performers() {
        let route = engine.path_to(node.name(), center)?;
        entries.push(Entry {
            name: node.name().to_string(),
            distance: route.distance(),
            route,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BaconError;

    fn graph() -> BipartiteGraph {
        BipartiteGraph::from_records(vec![
            ("Kevin Bacon", "Footloose"),
            ("Kyra Sedgwick", "Footloose"),
            ("Kyra Sedgwick", "The Closer"),
            ("J.K. Simmons", "The Closer"),
            ("J.K. Simmons", "Whiplash"),
            ("Miles Teller", "Whiplash"),
            ("Loner", "Solo Show"),
        ])
    }

    #[test]
    fn average_excludes_unreachable() {
        let avg = average_distance(&graph(), "Kevin Bacon").unwrap();
        // 0 + 1 + 2 + 3 over four reachable performers
        assert_eq!(avg.mean, Some(1.5));
        assert_eq!(avg.reachable, 4);
        assert_eq!(avg.unreachable, 1);
    }

    #[test]
    fn average_of_nothing_is_undefined() {
        let avg = Average::from_distances(vec![Distance::Unreachable; 3]);
        assert_eq!(avg.mean, None);
        assert_eq!(avg.unreachable, 3);
        assert!(avg.to_string().starts_with("undefined"));
    }

    #[test]
    fn histogram_buckets() {
        let hist = distance_histogram(&graph(), "Kyra Sedgwick").unwrap();
        assert_eq!(hist.counts, vec![1, 2, 1]);
        assert_eq!(hist.unreachable, 1);
        assert_eq!(hist.max_distance(), Some(2));
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.count(Distance::Hops(9)), 0);
    }

    #[test]
    fn top_centers_ranks_middle_first() {
        let g = graph();
        let top = top_centers(&g, 3);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        // The loner only reaches itself, so its average is zero.
        assert_eq!(names, vec!["Loner", "Kyra Sedgwick", "J.K. Simmons"]);
        assert_eq!(top[1].average.mean, Some(1.0));
        assert_eq!(top_centers(&g, 100).len(), 5);
        assert!(top_centers(&g, 0).is_empty());
    }

    #[test]
    fn most_credited_first_wins_ties() {
        let c = most_credited(&graph()).unwrap();
        assert_eq!(c.name, "Kyra Sedgwick");
        assert_eq!(c.count, 2);
        assert_eq!(c.productions, vec!["Footloose", "The Closer"]);
        assert_eq!(most_credited(&BipartiteGraph::new()), None);
    }

    #[test]
    fn longest_path_skips_unreachable() {
        let longest = longest_path(&graph(), "Kevin Bacon").unwrap();
        assert_eq!(longest.name, "Miles Teller");
        assert_eq!(longest.distance, 3);
        assert_eq!(longest.route.distance(), Distance::Hops(3));
        assert_eq!(
            longest.route.names().unwrap().last().map(String::as_str),
            Some("Kevin Bacon")
        );
    }

    #[test]
    fn longest_path_of_isolated_center_is_itself() {
        let longest = longest_path(&graph(), "Loner").unwrap();
        assert_eq!(longest.name, "Loner");
        assert_eq!(longest.distance, 0);
    }

    #[test]
    fn unknown_center() {
        assert!(matches!(
            average_distance(&graph(), "Nobody"),
            Err(BaconError::UnknownPerformer(_))
        ));
        assert!(matches!(
            average_distance(&BipartiteGraph::new(), "Kevin Bacon"),
            Err(BaconError::UnknownPerformer(_))
        ));
    }

    #[test]
    fn all_distances_agree_with_aggregate() {
        let g = graph();
        let entries = all_distances(&g, "Kevin Bacon").unwrap();
        let avg = Average::from_distances(entries.iter().map(|e| e.distance));
        assert_eq!(avg, average_distance(&g, "Kevin Bacon").unwrap());
        assert_eq!(entries[4].route, Route::Unreachable);
    }
}
