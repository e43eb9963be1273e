use crate::rng::GenRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 128-bit random packet token, printed as a v4 UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PacketId(Uuid);

impl PacketId {
    // drawn from the run's rng rather than the OS so a seeded run repeats its ids
    pub fn random(rng: &mut GenRng) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Standard = 0,
    Express = 1,
}

impl Category {
    /// Raw integer encoding used in `package_ctg.csv` and `data.txt`.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Category::Standard,
            _ => Category::Express,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub id: PacketId,
    pub create_time: f64,
    pub category: Category,
    /// Station ids only, never a center.
    pub src: String,
    pub dst: String,
}
