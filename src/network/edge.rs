use super::{Center, Station};
use crate::generator::{GeneratorConfig, TierCosts};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// center <-> center
    Airline,
    /// center <-> station in its cluster
    Highway,
    /// station <-> station below the length limit
    Road,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Airline => "airline",
            Tier::Highway => "highway",
            Tier::Road => "road",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge. Endpoints are facility ids, never embedded facilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub src: String,
    pub dst: String,
    pub time_cost: f64,
    pub money_cost: f64,
    pub tier: Tier,
}

impl Edge {
    pub fn reversed(&self) -> Self {
        Self {
            src: self.dst.clone(),
            dst: self.src.clone(),
            ..self.clone()
        }
    }
}

// Every connected pair becomes two records, forward first.
fn push_pair(edges: &mut Vec<Edge>, src: &str, dst: &str, dist: f64, costs: &TierCosts, tier: Tier) {
    let forward = Edge {
        src: src.to_string(),
        dst: dst.to_string(),
        time_cost: costs.time(dist),
        money_cost: costs.money(dist),
        tier,
    };
    let backward = forward.reversed();
    edges.push(forward);
    edges.push(backward);
}

/// Build the airline, highway and road tiers, in that order.
///
/// Scan order is fixed so a given placement and clustering always yields the
/// same list: airlines walk `i < j` over centers, highways walk centers then
/// their stations by index, roads walk `j < i` over stations.
pub fn synthesize_edges(
    stations: &[Station],
    centers: &[Center],
    membership: &[usize],
    config: &GeneratorConfig,
) -> Vec<Edge> {
    let mut edges = Vec::new();

    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            let dist = a.position.distance(&b.position);
            push_pair(&mut edges, &a.id, &b.id, dist, &config.airline, Tier::Airline);
        }
    }
    let airlines = edges.len();

    for (i, center) in centers.iter().enumerate() {
        for (station, _) in stations.iter().zip(membership).filter(|(_, label)| **label == i) {
            let dist = center.position.distance(&station.position);
            push_pair(&mut edges, &center.id, &station.id, dist, &config.highway, Tier::Highway);
        }
    }
    let highways = edges.len() - airlines;

    for (i, a) in stations.iter().enumerate() {
        for b in &stations[..i] {
            let dist = a.position.distance(&b.position);
            if dist < config.road_length_limit {
                push_pair(&mut edges, &a.id, &b.id, dist, &config.road, Tier::Road);
            }
        }
    }
    let roads = edges.len() - airlines - highways;

    debug!("edges: {} airline, {} highway, {} road", airlines, highways, roads);
    edges
}
