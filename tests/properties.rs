use parcelnet::prelude::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn scenario(stations: usize, centers: usize, packets: usize, limit: f64, seed: u64) -> Scenario {
    let config = GeneratorConfig::default()
        .with_counts(stations, centers, packets)
        .with_road_length_limit(limit)
        .with_seed(seed);
    Generator::new(config).unwrap().run().unwrap()
}

fn arb_sizes() -> impl Strategy<Value = (usize, usize)> {
    (2usize..40).prop_flat_map(|stations| (Just(stations), 1..=stations.min(8)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn facility_counts_and_ids((stations, centers) in arb_sizes(), seed in any::<u64>()) {
        let s = scenario(stations, centers, 0, 30.0, seed);
        prop_assert_eq!(s.network.stations.len(), stations);
        prop_assert_eq!(s.network.centers.len(), centers);

        let ids: HashSet<&str> = s.network.stations.iter().map(|f| f.id.as_str())
            .chain(s.network.centers.iter().map(|f| f.id.as_str()))
            .collect();
        prop_assert_eq!(ids.len(), stations + centers);
    }

    #[test]
    fn centers_never_sit_on_stations((stations, centers) in arb_sizes(), seed in any::<u64>()) {
        let s = scenario(stations, centers, 0, 30.0, seed);
        let occupied: HashSet<Position> = s.network.stations.iter().map(|f| f.position).collect();
        for c in &s.network.centers {
            prop_assert!(!occupied.contains(&c.position), "{} on a station", c.id);
        }
    }

    #[test]
    fn roads_respect_the_limit(
        (stations, centers) in arb_sizes(),
        limit in 0.0f64..80.0,
        seed in any::<u64>(),
    ) {
        let s = scenario(stations, centers, 0, limit, seed);
        let positions: HashMap<&str, Position> = s.network.stations.iter()
            .map(|f| (f.id.as_str(), f.position))
            .collect();

        let mut expected = 0;
        for (i, a) in s.network.stations.iter().enumerate() {
            for b in &s.network.stations[..i] {
                if a.position.distance(&b.position) < limit {
                    expected += 2;
                }
            }
        }

        let roads: Vec<_> = s.network.edges_of_tier(Tier::Road).collect();
        prop_assert_eq!(roads.len(), expected);
        for e in roads {
            let d = positions[e.src.as_str()].distance(&positions[e.dst.as_str()]);
            prop_assert!(d < limit);
        }

        // the other tiers are complete regardless of distance
        prop_assert_eq!(s.network.tier_count(Tier::Airline), centers * (centers - 1));
        prop_assert_eq!(s.network.tier_count(Tier::Highway), 2 * stations);
    }

    #[test]
    fn edges_come_in_mirrored_pairs((stations, centers) in arb_sizes(), seed in any::<u64>()) {
        let s = scenario(stations, centers, 0, 30.0, seed);
        for pair in s.network.edges.chunks(2) {
            prop_assert_eq!(pair.len(), 2);
            prop_assert_eq!(&pair[1], &pair[0].reversed());
            prop_assert!(pair[0].time_cost >= 0.0 && pair[0].money_cost >= 0.0);
        }
    }

    #[test]
    fn packets_are_well_formed(
        (stations, centers) in arb_sizes(),
        packets in 0usize..400,
        seed in any::<u64>(),
    ) {
        let s = scenario(stations, centers, packets, 30.0, seed);
        let station_ids: HashSet<&str> = s.network.stations.iter().map(|f| f.id.as_str()).collect();

        prop_assert_eq!(s.packets.len(), packets);
        for p in &s.packets {
            prop_assert_ne!(&p.src, &p.dst);
            prop_assert!(station_ids.contains(p.src.as_str()));
            prop_assert!(station_ids.contains(p.dst.as_str()));
            prop_assert!((0.0..1.0).contains(&p.create_time));
        }
        prop_assert!(s.packets.windows(2).all(|w| w[0].create_time <= w[1].create_time));
    }
}

#[test]
fn ten_thousand_unique_ids_and_split() {
    let s = scenario(15, 5, 10_000, 30.0, 123);
    let ids: HashSet<PacketId> = s.packets.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 10_000);

    let share = s.express_count() as f64 / 10_000.0;
    assert!((share - 0.3).abs() < 0.03, "express share {share}");
}
