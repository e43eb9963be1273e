use super::{Position, Station};
use crate::generator::GeneratorConfig;
use crate::rng::GenRng;
use tracing::debug;

/// Scatter `station_num` stations uniformly over the integer grid, both ends inclusive.
/// Duplicate positions are possible and left alone.
pub fn place_stations(config: &GeneratorConfig, rng: &mut GenRng) -> Vec<Station> {
    let size = config.map_size;

    (0..config.station_num)
        .map(|i| {
            let position = Position::new(rng.gen_range(0..=size), rng.gen_range(0..=size));
            let props = *rng.pick(&config.station_props);
            let station = Station {
                id: Station::id_for(i),
                position,
                props,
            };
            debug!("station {} at ({}, {}) {}", station.id, position.x, position.y, props);
            station
        })
        .collect()
}
