pub mod config;
pub use config::{GeneratorConfig, TierCosts};

use crate::error::GenResult;
use crate::network::{self, Network, Position, Tier};
use crate::rng::GenRng;
use crate::workload::{self, Category, Packet};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Everything one run produces, ready for the output writer.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub seed: u64,
    pub network: Network,
    pub packets: Vec<Packet>,
}

impl Scenario {
    pub fn express_count(&self) -> usize {
        self.packets.iter().filter(|p| p.category == Category::Express).count()
    }
}

pub struct Generator {
    config: GeneratorConfig,
    rng: GenRng,
    progress: ProgressBar,
}

impl Generator {
    /// Validates the config up front, nothing is generated for a bad one.
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GenRng::new(seed),
            None => GenRng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            progress: ProgressBar::hidden(),
        })
    }

    /// Show a progress bar on stderr while packets are drawn.
    pub fn with_progress(mut self) -> Self {
        let pb = ProgressBar::new(self.config.packet_num as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.orange/yellow} {pos}/{len} packets")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        self.progress = pb;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Placement -> clustering -> edges -> packets. One pass, one rng.
    pub fn run(&mut self) -> GenResult<Scenario> {
        let config = &self.config;
        let rng = &mut self.rng;

        info!("Generating network (seed {})", rng.seed());
        info!(
            "Stations: {}, Centers: {}, Packets: {}",
            config.station_num, config.center_num, config.packet_num
        );

        let stations = network::place_stations(config, rng);

        let positions: Vec<Position> = stations.iter().map(|s| s.position).collect();
        let clustering = network::kmeans(&positions, config.center_num, config.max_iterations, rng)?;
        info!("k-means settled after {} iterations", clustering.iterations);

        let centers = network::derive_centers(&stations, &clustering, config, rng)?;
        let edges = network::synthesize_edges(&stations, &centers, &clustering.labels, config);

        let network = Network {
            stations,
            centers,
            membership: clustering.labels,
            edges,
        };
        info!("Edges: {} total", network.edges.len());
        for tier in [Tier::Airline, Tier::Highway, Tier::Road] {
            info!("  {}: {}", tier, network.tier_count(tier));
        }

        let packets = workload::generate_packets(config, &network.stations, rng, &self.progress)?;
        self.progress.finish_and_clear();

        let scenario = Scenario {
            seed: rng.seed(),
            network,
            packets,
        };
        info!(
            "Packets: {} ({} express, target share {:.2})",
            scenario.packets.len(),
            scenario.express_count(),
            config.express_ratio()
        );

        Ok(scenario)
    }
}
