//! Global-history, per-address-set table (GAs) predictor.

use bitvec::prelude::*;
use log::debug;

use crate::bit::*;
use crate::branch::*;
use crate::error::{ Error, Result };
use crate::logic::{ self, HashMode };
use crate::predictor::*;
use crate::register::ShiftRegister;

/// A two-level predictor whose pattern table is partitioned into sets
/// selected by a hash of the branch address.
///
/// The key for an instruction is `hash(address, K)` followed by the BHR, so
/// the table has `2^(K + bhr_width)` rows. Branches whose addresses hash to
/// different values never share a counter, even with identical history.
#[derive(Clone, Debug)]
pub struct GAs {
    /// Width of a branch address
    address_width: usize,

    /// Number of hashed address bits used to select a set
    hash_width: usize,

    hash_mode: HashMode,

    /// Branch history register
    bhr: ShiftRegister,

    /// Holds the counter used for the last prediction
    sc: ShiftRegister,

    /// Per-set pattern table keyed by (hash, BHR)
    pht: PredictionHistoryTable,
}
impl GAs {
    pub const DEFAULT_BHR_WIDTH: usize = 4;
    pub const DEFAULT_SC_WIDTH: usize = 2;
    pub const DEFAULT_ADDRESS_WIDTH: usize = 8;
    pub const DEFAULT_HASH_WIDTH: usize = 4;

    pub fn new(bhr_width: usize, sc_width: usize, address_width: usize,
        hash_width: usize, hash_mode: HashMode) -> Result<Self>
    {
        check_width("BHR width", bhr_width)?;
        check_width("SC width", sc_width)?;
        check_width("hash width", hash_width)?;
        if hash_width > address_width {
            return Err(Error::InvalidConfig(format!(
                "hash width {} exceeds address width {}",
                hash_width, address_width
            )));
        }
        if !hash_mode.is_supported() {
            return Err(Error::UnsupportedHashMode(hash_mode));
        }

        let key_width = hash_width.checked_add(bhr_width).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "PHT key of {} hash bits and {} history bits is too wide",
                hash_width, bhr_width
            ))
        })?;
        let pht = PredictionHistoryTable::new(key_width, sc_width)?;
        debug!("GAs: {}-bit history, {}-bit counters, {}/{} address bits ({}), {} PHT rows",
            bhr_width, sc_width, hash_width, address_width, hash_mode, pht.size());
        Ok(Self {
            address_width,
            hash_width,
            hash_mode,
            bhr: ShiftRegister::new("BHR", bhr_width),
            sc: ShiftRegister::new("SC", sc_width),
            pht,
        })
    }

    pub fn bhr(&self) -> &ShiftRegister { &self.bhr }
    pub fn sc(&self) -> &ShiftRegister { &self.sc }
    pub fn pht(&self) -> &PredictionHistoryTable { &self.pht }
    pub fn address_width(&self) -> usize { self.address_width }
    pub fn hash_width(&self) -> usize { self.hash_width }
    pub fn hash_mode(&self) -> HashMode { self.hash_mode }

    /// Form the table key for a branch address: the hashed address in the
    /// most-significant bits, then the current history.
    pub fn cache_entry(&self, address: &BitSlice) -> Result<Bits> {
        if address.len() != self.address_width {
            return Err(Error::InvalidLength {
                name: "branch address",
                expected: self.address_width,
                actual: address.len(),
            });
        }
        let set = logic::hash(address, self.hash_width, self.hash_mode)?;
        Ok(concat(&set, self.bhr.read()))
    }
}

impl BranchPredictor for GAs {
    fn name(&self) -> &'static str { "GAs" }

    fn predict(&mut self, instr: &BranchInstruction) -> Result<BranchResult> {
        let key = self.cache_entry(instr.address())?;
        predict_from(&self.pht, &mut self.sc, &key)
    }

    fn update(&mut self, instr: &BranchInstruction, actual: BranchResult)
        -> Result<()>
    {
        let key = self.cache_entry(instr.address())?;
        train(&mut self.pht, &key, actual)?;
        self.bhr.insert(actual.into());
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("GAs predictor snapshot: \n{}{}{}",
            self.bhr.monitor(), self.sc.monitor(), self.pht.monitor())
    }

    fn reset(&mut self) {
        self.bhr.clear();
        self.sc.clear();
        self.pht.clear();
    }
}
