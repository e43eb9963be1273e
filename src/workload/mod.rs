pub mod packet;

pub use packet::{Category, Packet, PacketId};

use crate::error::{GenError, GenResult};
use crate::generator::GeneratorConfig;
use crate::network::Station;
use crate::rng::GenRng;
use indicatif::ProgressBar;
use rand_distr::{Distribution, OpenClosed01, Uniform, WeightedIndex};
use tracing::debug;

/// Random positive weights over stations, normalised to sum to 1.
/// Not a traffic model, just enough skew that some stations are busier.
pub fn station_weights(station_num: usize, rng: &mut GenRng) -> Vec<f64> {
    let raw: Vec<f64> = (0..station_num)
        .map(|_| OpenClosed01.sample(rng.inner()))
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Draw `packet_num` packets between distinct stations, sorted by create time.
///
/// `dst` is redrawn while it equals `src`, at most `max_resample` times.
pub fn generate_packets(
    config: &GeneratorConfig,
    stations: &[Station],
    rng: &mut GenRng,
    progress: &ProgressBar,
) -> GenResult<Vec<Packet>> {
    if stations.len() < 2 {
        return Err(GenError::InvalidConfiguration(format!(
            "need at least 2 stations to route packets, got {}",
            stations.len()
        )));
    }

    let src_prob = station_weights(stations.len(), rng);
    let dst_prob = station_weights(stations.len(), rng);
    debug!("src weights: {:?}", src_prob);
    debug!("dst weights: {:?}", dst_prob);

    let invalid = |e: rand_distr::WeightedError| GenError::InvalidConfiguration(e.to_string());
    let src_dist = WeightedIndex::new(&src_prob).map_err(invalid)?;
    let dst_dist = WeightedIndex::new(&dst_prob).map_err(invalid)?;
    let category_dist = WeightedIndex::new(config.category_split).map_err(invalid)?;
    let time_dist = Uniform::new(0.0, config.time_window);

    progress.set_length(config.packet_num as u64);

    let mut packets = Vec::with_capacity(config.packet_num);
    for _ in 0..config.packet_num {
        let src = src_dist.sample(rng.inner());

        let mut dst = dst_dist.sample(rng.inner());
        let mut draws = 1;
        while dst == src {
            if draws > config.max_resample {
                return Err(GenError::SamplingExhausted {
                    src: stations[src].id.clone(),
                    attempts: draws,
                });
            }
            dst = dst_dist.sample(rng.inner());
            draws += 1;
        }

        let category = Category::from_index(category_dist.sample(rng.inner()));
        let create_time = time_dist.sample(rng.inner());
        let id = PacketId::random(rng);

        packets.push(Packet {
            id,
            create_time,
            category,
            src: stations[src].id.clone(),
            dst: stations[dst].id.clone(),
        });
        progress.inc(1);
    }

    // stable, so equal times keep generation order
    packets.sort_by(|a, b| a.create_time.total_cmp(&b.create_time));

    Ok(packets)
}
