//! Encoders for the individual output files.
//!
//! The CSVs have no header row. Floats are written in shortest round-trip
//! form with a trailing `.0` on whole numbers (`12.5`, `10.0`).

use crate::error::GenResult;
use crate::generator::Scenario;
use crate::network::Network;
use crate::workload::Packet;
use csv::{Terminator, WriterBuilder};
use std::io::Write;

pub const POSITIONS: &str = "positions.csv";
pub const ROUTES: &str = "routes.csv";
pub const CATEGORIES: &str = "package_ctg.csv";
pub const DUMP: &str = "data.txt";
pub const MEMBERSHIP: &str = "clusters.csv";

pub fn float(v: f64) -> String {
    format!("{:?}", v)
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}

/// `id,x,y`, stations first then centers.
pub fn write_positions<W: Write>(out: W, network: &Network) -> GenResult<()> {
    let mut writer = csv_writer(out);
    for s in &network.stations {
        writer.write_record([s.id.clone(), s.position.x.to_string(), s.position.y.to_string()])?;
    }
    for c in &network.centers {
        writer.write_record([c.id.clone(), c.position.x.to_string(), c.position.y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// `src_id,dst_id,time_cost`. Money cost only goes to `data.txt`.
pub fn write_routes<W: Write>(out: W, network: &Network) -> GenResult<()> {
    let mut writer = csv_writer(out);
    for e in &network.edges {
        let time = float(e.time_cost);
        writer.write_record([e.src.as_str(), e.dst.as_str(), time.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// `packet_id,category` with the raw category code.
pub fn write_categories<W: Write>(out: W, packets: &[Packet]) -> GenResult<()> {
    let mut writer = csv_writer(out);
    for p in packets {
        writer.write_record([p.id.to_string(), p.category.code().to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// `station_id,center_id`
pub fn write_membership<W: Write>(out: W, network: &Network) -> GenResult<()> {
    let mut writer = csv_writer(out);
    for (i, s) in network.stations.iter().enumerate() {
        if let Some(center) = network.center_of(i) {
            writer.write_record([s.id.as_str(), center.id.as_str()])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Sectioned debug dump. The simulation engine reads it token by token, so
/// the ` , ` spacing and the `(a, b, c)` property tuples matter. Centers go
/// in the `stations:` section right after the stations.
pub fn write_dump<W: Write>(mut out: W, scenario: &Scenario) -> GenResult<()> {
    let network = &scenario.network;

    writeln!(out, "stations:")?;
    for s in &network.stations {
        writeln!(out, "{} , {}", s.id, s.props)?;
    }
    for c in &network.centers {
        writeln!(out, "{} , {}", c.id, c.props)?;
    }

    writeln!(out, "edges:")?;
    for e in &network.edges {
        writeln!(out, "{} , {} , {} , {}", e.src, e.dst, float(e.time_cost), float(e.money_cost))?;
    }

    writeln!(out, "packets:")?;
    for p in &scenario.packets {
        writeln!(
            out,
            "{} , {} , {} , {} , {}",
            p.id,
            float(p.create_time),
            p.category.code(),
            p.src,
            p.dst
        )?;
    }

    out.flush()?;
    Ok(())
}
