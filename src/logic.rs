//! Combinational logic shared by the predictors: hashing a branch address
//! down to a few bits, and saturating counter arithmetic.

use bitvec::prelude::*;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;

use crate::bit::*;
use crate::error::{ Error, Result };

/// Strategy for reducing an address to a fixed number of bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMode {
    /// Fold the address into k-bit chunks and XOR them together.
    #[default]
    Xor,
    /// Address modulo 2^k. Recognized in configurations, not implemented.
    Mod,
}
impl HashMode {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Xor)
    }
}

impl std::fmt::Display for HashMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Xor => "xor",
            Self::Mod => "mod",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for HashMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xor" => Ok(Self::Xor),
            "mod" => Ok(Self::Mod),
            _ => Err(Error::InvalidConfig(format!("unknown hash mode '{}'", s))),
        }
    }
}

/// Arithmetic used when adjusting a counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CountMode {
    /// Clamp at zero and at the all-ones value instead of wrapping.
    #[default]
    Saturating,
}

/// Reduce `address` to exactly `k` bits.
///
/// With [HashMode::Xor] the address is cut into `k`-bit chunks starting at
/// index 0. A short final chunk is padded with zeros at its tail, and all
/// chunks are XOR'ed together position by position.
pub fn hash(address: &BitSlice, k: usize, mode: HashMode) -> Result<Bits> {
    if k == 0 || address.len() < k {
        return Err(Error::InvalidLength {
            name: "hash input",
            expected: k.max(1),
            actual: address.len(),
        });
    }
    match mode {
        HashMode::Xor => {
            let res = address.chunks(k).fold(filled(k, Bit::Zero), |mut res, x| {
                for (i, b) in x.iter().by_vals().enumerate() {
                    let v = res[i] ^ b;
                    res.set(i, v);
                }
                res
            });
            Ok(res)
        },
        HashMode::Mod => Err(Error::UnsupportedHashMode(mode)),
    }
}

/// Returns 'true' if `counter` cannot move any further in the requested
/// direction.
pub fn is_saturated(counter: &BitSlice, increment: bool) -> bool {
    if increment { counter.all() } else { counter.not_any() }
}

/// Add or subtract one from `counter` in place.
///
/// A counter already at its bound (all ones for an increment, all zeros for
/// a decrement) is left alone. Returns 'true' if the value changed.
pub fn count(counter: &mut BitSlice, increment: bool, mode: CountMode) -> bool {
    match mode {
        CountMode::Saturating => {
            if is_saturated(counter, increment) {
                return false;
            }
            // Ripple from the least-significant bit (the tail). Bits equal
            // to the carry flip and propagate; the first other bit flips and
            // absorbs it.
            for i in (0..counter.len()).rev() {
                let bit = counter[i];
                counter.set(i, !bit);
                if bit != increment {
                    break;
                }
            }
            true
        },
    }
}
