//! Types for representing branches and branch outcomes.

use bitvec::prelude::*;
use crate::bit::*;

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BranchResult {
    NotTaken = 0,
    Taken = 1,
}

impl BranchResult {
    pub fn is_taken(&self) -> bool { matches!(self, Self::Taken) }
}

impl std::fmt::Display for BranchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Taken => "T",
            Self::NotTaken => "N",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for BranchResult {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::NotTaken => Self::Taken,
            Self::Taken => Self::NotTaken,
        }
    }
}

impl From<bool> for BranchResult {
    fn from(x: bool) -> Self {
        match x {
            true => Self::Taken,
            false => Self::NotTaken,
        }
    }
}
impl From<BranchResult> for bool {
    fn from(x: BranchResult) -> Self { x.is_taken() }
}

/// A counter's most-significant bit decides the predicted direction.
impl From<Bit> for BranchResult {
    fn from(b: Bit) -> Self { Self::from(bool::from(b)) }
}
impl From<BranchResult> for Bit {
    fn from(x: BranchResult) -> Self { Bit::of(x.is_taken()) }
}


/// A conditional branch instruction, identified by its address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BranchInstruction {
    address: Bits,
}
impl BranchInstruction {
    pub fn new(address: Bits) -> Self {
        Self { address }
    }

    /// Create an instruction from the low `width` bits of `addr`.
    pub fn from_addr(addr: usize, width: usize) -> Self {
        Self::new(from_number(addr, width))
    }

    pub fn address(&self) -> &BitSlice { &self.address }

    /// The address as a number.
    pub fn addr(&self) -> usize { to_number(&self.address) }

    /// The number of address bits.
    pub fn width(&self) -> usize { self.address.len() }
}

impl std::fmt::Display for BranchInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:#x}", self.addr())
    }
}


/// A record of branch execution: an instruction and its resolved outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    pub instr: BranchInstruction,
    pub outcome: BranchResult,
}
impl BranchRecord {
    pub fn new(instr: BranchInstruction, outcome: BranchResult) -> Self {
        Self { instr, outcome }
    }
}
