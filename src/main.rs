// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use parcelnet::prelude::*;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Synthetic logistics network and packet workload generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a network and workload and write the output files
    Generate {
        /// JSON config, missing fields fall back to defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short = 'n', long)]
        stations: Option<usize>,
        #[arg(short = 'k', long)]
        centers: Option<usize>,
        #[arg(short, long)]
        packets: Option<usize>,
        #[arg(long)]
        road_limit: Option<f64>,
        #[arg(long)]
        express_ratio: Option<f64>,
        /// Also write clusters.csv (station -> center)
        #[arg(long)]
        membership: bool,
        #[arg(long)]
        no_progress: bool,
    },

    /// Print the default config as JSON
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a config file without generating anything
    Check {
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let program_start = Instant::now();

    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            config,
            out,
            seed,
            stations,
            centers,
            packets,
            road_limit,
            express_ratio,
            membership,
            no_progress,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                cfg.seed = Some(seed);
            }
            if let Some(n) = stations {
                cfg.station_num = n;
            }
            if let Some(k) = centers {
                cfg.center_num = k;
            }
            if let Some(p) = packets {
                cfg.packet_num = p;
            }
            if let Some(limit) = road_limit {
                cfg.road_length_limit = limit;
            }
            if let Some(ratio) = express_ratio {
                cfg = cfg.with_express_ratio(ratio);
            }
            cfg.write_membership |= membership;

            generate(cfg, &out, !no_progress)?;
        }

        Commands::Config { output } => {
            let json = GeneratorConfig::default().to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json + "\n")
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Default config written to: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Check { config } => {
            let cfg = load_config(Some(config.as_path()))?
                .validated()
                .with_context(|| format!("{} is not a usable config", config.display()))?;
            info!("{} is valid", config.display());
            info!(
                "Stations: {}, Centers: {}, Packets: {}, Road limit: {}",
                cfg.station_num, cfg.center_num, cfg.packet_num, cfg.road_length_limit
            );
        }
    }

    let total_time = program_start.elapsed();
    info!("Total runtime: {:.2}s", total_time.as_secs_f64());

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn generate(config: GeneratorConfig, out: &Path, progress: bool) -> Result<()> {
    let writer = OutputWriter::new(out).with_membership(config.write_membership);

    // validation happens here, before anything is generated or written
    let mut generator = Generator::new(config)?;
    if progress {
        generator = generator.with_progress();
    }

    let scenario = generator.run()?;
    let written = writer
        .write(&scenario)
        .with_context(|| format!("writing output to {}", out.display()))?;

    info!("{} files in {}", written.len(), writer.dir().display());
    info!("Re-run with --seed {} to reproduce", scenario.seed);

    Ok(())
}
