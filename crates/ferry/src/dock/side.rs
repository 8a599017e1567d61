//! Side — the two fixed endpoints of the crossing.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the two crossing endpoints, numbered 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Near,
    Far,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Near, Side::Far];

    pub fn index(self) -> usize {
        match self {
            Side::Near => 0,
            Side::Far => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Near => Side::Far,
            Side::Far => Side::Near,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Side {
        if rng.gen_bool(0.5) {
            Side::Far
        } else {
            Side::Near
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
