use crate::error::{GenError, GenResult};
use crate::network::FacilityProps;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Distance multipliers for one edge tier: `time = time_per_dist * d`,
/// `money = money_per_dist * d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierCosts {
    pub time_per_dist: f64,
    pub money_per_dist: f64,
}

impl TierCosts {
    pub const fn new(time_per_dist: f64, money_per_dist: f64) -> Self {
        Self { time_per_dist, money_per_dist }
    }

    pub fn time(&self, dist: f64) -> f64 {
        self.time_per_dist * dist
    }

    pub fn money(&self, dist: f64) -> f64 {
        self.money_per_dist * dist
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of stations, the leaf facilities packets travel between.
    pub station_num: usize,
    /// Number of clusters, and therefore distribution centers.
    pub center_num: usize,
    /// Number of packets in the workload. Zero is allowed.
    pub packet_num: usize,

    /// Stations are placed on the integer grid `[0, map_size]^2`.
    pub map_size: i32,

    /// center <-> center
    pub airline: TierCosts,
    /// center <-> its own stations
    pub highway: TierCosts,
    /// station <-> station, only below `road_length_limit`
    pub road: TierCosts,
    /// Road edges need a Euclidean distance strictly below this.
    pub road_length_limit: f64,

    /// Relative weights of `[standard, express]`.
    pub category_split: [f64; 2],
    /// Packet create times are uniform in `[0, time_window)`.
    pub time_window: f64,

    /// Candidate (throughput, delay, cost) tuples, one picked per station.
    pub station_props: Vec<FacilityProps>,
    /// Candidate tuples for centers.
    pub center_props: Vec<FacilityProps>,

    /// Lloyd iteration cap for k-means.
    pub max_iterations: usize,
    /// Cap on destination redraws while `dst == src`.
    pub max_resample: usize,

    /// Fixed seed for a reproducible run. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Also write `clusters.csv` (station -> center).
    pub write_membership: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            station_num: 15,
            center_num: 5,
            packet_num: 2500,
            map_size: 100,
            airline: TierCosts::new(0.25, 0.2),
            highway: TierCosts::new(0.6, 0.12),
            road: TierCosts::new(0.8, 0.07),
            road_length_limit: 30.0,
            category_split: [0.7, 0.3],
            time_window: 1.0,
            station_props: vec![
                FacilityProps::new(10, 2, 0.5),
                FacilityProps::new(15, 2, 0.6),
                FacilityProps::new(20, 1, 0.8),
                FacilityProps::new(25, 1, 0.9),
            ],
            center_props: vec![
                FacilityProps::new(100, 2, 0.5),
                FacilityProps::new(150, 2, 0.5),
                FacilityProps::new(125, 1, 0.5),
                FacilityProps::new(175, 1, 0.5),
            ],
            max_iterations: 300,
            max_resample: 1000,
            seed: None,
            write_membership: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn to_json(&self) -> GenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_counts(mut self, stations: usize, centers: usize, packets: usize) -> Self {
        self.station_num = stations;
        self.center_num = centers;
        self.packet_num = packets;
        self
    }

    pub fn with_road_length_limit(mut self, limit: f64) -> Self {
        self.road_length_limit = limit;
        self
    }

    /// Express share of the category split, e.g. 0.3 for `[0.7, 0.3]`.
    pub fn express_ratio(&self) -> f64 {
        let total = self.category_split[0] + self.category_split[1];
        self.category_split[1] / total
    }

    pub fn with_express_ratio(mut self, ratio: f64) -> Self {
        self.category_split = [1.0 - ratio, ratio];
        self
    }

    /// Validate and return self, for builder chains.
    pub fn validated(self) -> GenResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.station_num < 2 {
            return invalid(format!(
                "station_num must be at least 2 (got {}), packets need a destination different from their source",
                self.station_num
            ));
        }
        if self.center_num == 0 {
            return invalid("center_num must be at least 1".to_string());
        }
        if self.center_num > self.station_num {
            return invalid(format!(
                "center_num ({}) cannot exceed station_num ({})",
                self.center_num, self.station_num
            ));
        }
        if self.map_size < 0 {
            return invalid(format!("map_size must be non-negative (got {})", self.map_size));
        }

        for (name, tier) in [("airline", &self.airline), ("highway", &self.highway), ("road", &self.road)] {
            if !non_negative(tier.time_per_dist) || !non_negative(tier.money_per_dist) {
                return invalid(format!("{} coefficients must be finite and non-negative", name));
            }
        }

        // NaN fails this check too
        if !(self.road_length_limit >= 0.0) {
            return invalid(format!(
                "road_length_limit must be non-negative (got {})",
                self.road_length_limit
            ));
        }

        let [standard, express] = self.category_split;
        if !non_negative(standard) || !non_negative(express) || standard + express <= 0.0 {
            return invalid(format!(
                "category_split needs two non-negative weights with a positive sum (got [{}, {}])",
                standard, express
            ));
        }
        if !(self.time_window.is_finite() && self.time_window > 0.0) {
            return invalid(format!("time_window must be positive (got {})", self.time_window));
        }

        if self.station_props.is_empty() || self.center_props.is_empty() {
            return invalid("property candidate sets cannot be empty".to_string());
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        if self.max_resample == 0 {
            return invalid("max_resample must be at least 1".to_string());
        }

        Ok(())
    }
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn invalid(msg: String) -> GenResult<()> {
    Err(GenError::InvalidConfiguration(msg))
}
