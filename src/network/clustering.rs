// k-means over station positions, then one center per cluster

use super::{Center, Position, Station};
use crate::error::{GenError, GenResult};
use crate::generator::GeneratorConfig;
use crate::rng::GenRng;
use rand_distr::{Distribution, WeightedIndex};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Clustering {
    /// Cluster index per input point.
    pub labels: Vec<usize>,
    pub centroids: Vec<[f64; 2]>,
    pub iterations: usize,
}

/// Seeded k-means (k-means++ seeding, then Lloyd iterations).
///
/// Stops once assignments are stable or after `max_iterations` centroid updates.
/// The returned labels always match the returned centroids.
///
/// Fewer than `k` distinct positions, or a cluster left without points, is an
/// `InvalidConfiguration`: every center has to own at least one station.
pub fn kmeans(points: &[Position], k: usize, max_iterations: usize, rng: &mut GenRng) -> GenResult<Clustering> {
    let distinct = points.iter().collect::<HashSet<_>>().len();
    if k == 0 || distinct < k {
        return Err(GenError::InvalidConfiguration(format!(
            "{} clusters requested but only {} distinct station positions",
            k, distinct
        )));
    }

    let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x as f64, p.y as f64]).collect();
    let mut centroids = seed_centroids(&coords, k, rng)?;
    let mut labels = vec![usize::MAX; coords.len()];
    let mut iterations = 0;

    loop {
        let changed = assign(&coords, &centroids, &mut labels);
        if !changed || iterations == max_iterations {
            break;
        }
        update(&coords, &labels, &mut centroids);
        iterations += 1;
    }

    let mut sizes = vec![0usize; k];
    for &label in &labels {
        sizes[label] += 1;
    }
    if let Some(empty) = sizes.iter().position(|&n| n == 0) {
        return Err(GenError::InvalidConfiguration(format!(
            "cluster {} ended up with no stations",
            empty
        )));
    }

    Ok(Clustering { labels, centroids, iterations })
}

fn dist2(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

// k-means++: each next seed is drawn with probability proportional to its
// squared distance from the nearest seed picked so far. Points already used as
// seeds weigh zero, so seeds stay distinct while distinct points remain.
fn seed_centroids(coords: &[[f64; 2]], k: usize, rng: &mut GenRng) -> GenResult<Vec<[f64; 2]>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(coords[rng.gen_range(0..coords.len())]);

    while centroids.len() < k {
        let weights: Vec<f64> = coords
            .iter()
            .map(|c| {
                centroids
                    .iter()
                    .map(|ctr| dist2(c, ctr))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let dist = WeightedIndex::new(&weights)
            .map_err(|e| GenError::InvalidConfiguration(format!("k-means seeding: {}", e)))?;
        centroids.push(coords[dist.sample(rng.inner())]);
    }

    Ok(centroids)
}

fn assign(coords: &[[f64; 2]], centroids: &[[f64; 2]], labels: &mut [usize]) -> bool {
    let mut changed = false;
    for (i, c) in coords.iter().enumerate() {
        let mut best_cluster = 0;
        let mut best_dist = f64::INFINITY;
        for (j, ctr) in centroids.iter().enumerate() {
            let d = dist2(c, ctr);
            if d < best_dist {
                best_dist = d;
                best_cluster = j;
            }
        }
        if labels[i] != best_cluster {
            labels[i] = best_cluster;
            changed = true;
        }
    }
    changed
}

fn update(coords: &[[f64; 2]], labels: &[usize], centroids: &mut [[f64; 2]]) {
    let k = centroids.len();
    let mut sums = vec![[0.0, 0.0]; k];
    let mut counts = vec![0usize; k];
    for (c, &label) in coords.iter().zip(labels) {
        sums[label][0] += c[0];
        sums[label][1] += c[1];
        counts[label] += 1;
    }
    for j in 0..k {
        if counts[j] > 0 {
            centroids[j] = [sums[j][0] / counts[j] as f64, sums[j][1] / counts[j] as f64];
        }
    }
}

/// Turn centroids into centers: truncate to the integer grid, step off any
/// station cell, and pick properties from the center candidates.
///
/// The nudge walks the diagonal `(+1, +1)`. Stations can block at most
/// `station_num` cells of that diagonal, so `station_num + 1` steps always
/// find a free cell; the bound only exists to make the loop obviously finite.
pub fn derive_centers(
    stations: &[Station],
    clustering: &Clustering,
    config: &GeneratorConfig,
    rng: &mut GenRng,
) -> GenResult<Vec<Center>> {
    let occupied: HashSet<Position> = stations.iter().map(|s| s.position).collect();
    let max_nudges = stations.len() + 1;

    let mut centers = Vec::with_capacity(clustering.centroids.len());
    for (i, centroid) in clustering.centroids.iter().enumerate() {
        let id = Center::id_for(i);
        let mut position = Position::new(centroid[0] as i32, centroid[1] as i32);

        let mut nudges = 0;
        while occupied.contains(&position) {
            if nudges == max_nudges {
                return Err(GenError::CenterPlacement { center: id, attempts: nudges });
            }
            warn!("Center {} overlaps a station at ({}, {}), moving it", id, position.x, position.y);
            position = position.nudged();
            nudges += 1;
        }

        let props = *rng.pick(&config.center_props);
        debug!("center {} at ({}, {}) {}", id, position.x, position.y, props);
        centers.push(Center { id, position, props });
    }

    Ok(centers)
}
