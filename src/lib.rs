pub mod error;
pub mod rng;
pub mod network;
pub mod workload;
pub mod generator;
pub mod output;

pub use error::{GenError, GenResult};
pub use generator::{Generator, GeneratorConfig, Scenario};
pub use output::OutputWriter;
pub use rng::GenRng;

pub mod prelude {
    pub use crate::error::{GenError, GenResult};
    pub use crate::generator::{Generator, GeneratorConfig, Scenario, TierCosts};
    pub use crate::network::{Center, Edge, FacilityProps, Network, Position, Station, Tier};
    pub use crate::output::OutputWriter;
    pub use crate::rng::GenRng;
    pub use crate::workload::{Category, Packet, PacketId};
}
