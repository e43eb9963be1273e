use parcelnet::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

fn generate_into(dir: &Path, config: GeneratorConfig) -> Scenario {
    let scenario = Generator::new(config).unwrap().run().unwrap();
    OutputWriter::new(dir).write(&scenario).unwrap();
    scenario
}

// same order as the binary: writer first, then validation, generation, write
fn try_generate_into(dir: &Path, config: GeneratorConfig) -> GenResult<Vec<PathBuf>> {
    let writer = OutputWriter::new(dir).with_membership(config.write_membership);
    let scenario = Generator::new(config)?.run()?;
    writer.write(&scenario)
}

fn rows(dir: &Path, name: &str) -> Vec<Vec<String>> {
    fs::read_to_string(dir.join(name))
        .unwrap()
        .lines()
        .map(|l| l.split(',').map(str::to_string).collect())
        .collect()
}

#[test]
fn four_stations_one_center() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default().with_counts(4, 1, 10).with_seed(2024);
    let scenario = generate_into(dir.path(), config);

    let positions = rows(dir.path(), "positions.csv");
    assert_eq!(positions.len(), 5);
    let ids: Vec<_> = positions.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, vec!["s0", "s1", "s2", "s3", "c0"]);

    let routes = rows(dir.path(), "routes.csv");
    let highway: Vec<_> = routes.iter().filter(|r| r[0] == "c0" || r[1] == "c0").collect();
    assert_eq!(highway.len(), 8);
    for s in ["s0", "s1", "s2", "s3"] {
        assert!(highway.iter().any(|r| r[0] == "c0" && r[1] == s));
        assert!(highway.iter().any(|r| r[0] == s && r[1] == "c0"));
    }

    let roads = scenario.network.tier_count(Tier::Road);
    assert_eq!(routes.len(), 8 + roads);
    assert!(routes.iter().all(|r| r.len() == 3 && r[2].parse::<f64>().is_ok()));

    let categories = rows(dir.path(), "package_ctg.csv");
    assert_eq!(categories.len(), 10);
    assert!(categories.iter().all(|r| r[1] == "0" || r[1] == "1"));
}

#[test]
fn zero_road_limit_means_no_roads() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default()
        .with_counts(40, 3, 10)
        .with_road_length_limit(0.0)
        .with_seed(8);
    let scenario = generate_into(dir.path(), config);

    assert_eq!(scenario.network.tier_count(Tier::Road), 0);
    // 3 centers -> 3 pairs -> 6 airline rows, plus 2 highway rows per station
    let routes = rows(dir.path(), "routes.csv");
    assert_eq!(routes.len(), 6 + 2 * 40);
}

#[test]
fn same_seed_is_byte_identical() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default().with_counts(20, 4, 500).with_seed(31337);

    generate_into(a.path(), config.clone());
    generate_into(b.path(), config);

    for name in ["positions.csv", "routes.csv", "package_ctg.csv", "data.txt"] {
        let left = fs::read(a.path().join(name)).unwrap();
        let right = fs::read(b.path().join(name)).unwrap();
        assert_eq!(left, right, "{} differs", name);
    }
}

#[test]
fn different_seeds_differ() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    generate_into(a.path(), GeneratorConfig::default().with_seed(1));
    generate_into(b.path(), GeneratorConfig::default().with_seed(2));
    assert_ne!(
        fs::read(a.path().join("data.txt")).unwrap(),
        fs::read(b.path().join("data.txt")).unwrap()
    );
}

#[test]
fn invalid_config_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let config = GeneratorConfig::default().with_counts(1, 1, 10).with_seed(3);
    let err = try_generate_into(&out, config).unwrap_err();
    assert!(matches!(err, GenError::InvalidConfiguration(_)));
    assert!(!out.exists());

    // passes validation, fails in clustering: every station lands on (0, 0)
    let mut config = GeneratorConfig::default().with_counts(4, 2, 10).with_seed(3);
    config.map_size = 0;
    let err = try_generate_into(&out, config).unwrap_err();
    assert!(matches!(err, GenError::InvalidConfiguration(_)));
    assert!(!out.exists());

    try_generate_into(&out, GeneratorConfig::default().with_seed(3)).unwrap();
    assert_eq!(fs::read_dir(&out).unwrap().count(), 4);
}

#[test]
fn dump_lines_match_the_reader_layout() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = generate_into(dir.path(), GeneratorConfig::default().with_seed(77));
    let text = fs::read_to_string(dir.path().join("data.txt")).unwrap();

    let mut section = "";
    let mut counts = [0usize; 3];
    for line in text.lines() {
        match line {
            "stations:" | "edges:" | "packets:" => {
                section = line;
                continue;
            }
            _ => {}
        }
        let fields: Vec<&str> = line.split(" , ").collect();
        match section {
            "stations:" => {
                assert_eq!(fields.len(), 2, "{}", line);
                assert!(fields[1].starts_with('(') && fields[1].ends_with(')'));
                assert_eq!(fields[1].split(", ").count(), 3);
                counts[0] += 1;
            }
            "edges:" => {
                assert_eq!(fields.len(), 4, "{}", line);
                assert!(fields[2].parse::<f64>().is_ok() && fields[3].parse::<f64>().is_ok());
                counts[1] += 1;
            }
            "packets:" => {
                assert_eq!(fields.len(), 5, "{}", line);
                let t: f64 = fields[1].parse().unwrap();
                assert!((0.0..1.0).contains(&t));
                assert!(fields[2] == "0" || fields[2] == "1");
                assert!(fields[3].starts_with('s') && fields[4].starts_with('s'));
                counts[2] += 1;
            }
            other => panic!("line outside a section: {:?} ({})", line, other),
        }
    }

    let network = &scenario.network;
    assert_eq!(counts[0], network.stations.len() + network.centers.len());
    assert_eq!(counts[1], network.edges.len());
    assert_eq!(counts[2], scenario.packets.len());
}

#[test]
fn packet_rows_follow_time_order() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = generate_into(dir.path(), GeneratorConfig::default().with_counts(10, 2, 1000).with_seed(5));

    let categories = rows(dir.path(), "package_ctg.csv");
    let ids: Vec<String> = scenario.packets.iter().map(|p| p.id.to_string()).collect();
    let written: Vec<String> = categories.iter().map(|r| r[0].clone()).collect();
    assert_eq!(ids, written);

    let unique: HashSet<_> = written.iter().collect();
    assert_eq!(unique.len(), 1000);
    assert!(scenario.packets.windows(2).all(|w| w[0].create_time <= w[1].create_time));
}
