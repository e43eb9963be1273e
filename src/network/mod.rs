pub mod clustering;
pub mod edge;
pub mod placement;

pub use clustering::{Clustering, derive_centers, kmeans};
pub use edge::{Edge, Tier, synthesize_edges};
pub use placement::place_stations;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    pub fn nudged(self) -> Self {
        Self::new(self.x + 1, self.y + 1)
    }
}

/// Throughput per tick, fixed processing delay, per-packet handling cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacilityProps {
    pub throughput: u32,
    pub delay: u32,
    pub cost: f64,
}

impl FacilityProps {
    pub const fn new(throughput: u32, delay: u32, cost: f64) -> Self {
        Self { throughput, delay, cost }
    }
}

// `(10, 2, 0.5)`, the tuple layout the simulation engine scans for
impl fmt::Display for FacilityProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:?})", self.throughput, self.delay, self.cost)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub position: Position,
    pub props: FacilityProps,
}

impl Station {
    pub fn id_for(index: usize) -> String {
        format!("s{}", index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Center {
    pub id: String,
    pub position: Position,
    pub props: FacilityProps,
}

impl Center {
    pub fn id_for(index: usize) -> String {
        format!("c{}", index)
    }
}

/// The facility graph: stations, centers, cluster labels and the directed edge list.
#[derive(Debug, Clone)]
pub struct Network {
    pub stations: Vec<Station>,
    pub centers: Vec<Center>,
    /// `membership[i]` is the index of the center owning station `i`.
    pub membership: Vec<usize>,
    pub edges: Vec<Edge>,
}

impl Network {
    pub fn center_of(&self, station_idx: usize) -> Option<&Center> {
        self.membership
            .get(station_idx)
            .and_then(|&c| self.centers.get(c))
    }

    pub fn edges_of_tier(&self, tier: Tier) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.tier == tier)
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.edges_of_tier(tier).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn props_display_like_a_tuple() {
        assert_eq!(FacilityProps::new(10, 2, 0.5).to_string(), "(10, 2, 0.5)");
        assert_eq!(FacilityProps::new(100, 1, 1.0).to_string(), "(100, 1, 1.0)");
    }

    #[test]
    fn ids_use_separate_namespaces() {
        assert_eq!(Station::id_for(3), "s3");
        assert_eq!(Center::id_for(3), "c3");
    }
}
