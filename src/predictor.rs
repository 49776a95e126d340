//! Implementations of two-level adaptive branch predictors.

pub mod table;
pub mod pht;
pub mod gag;
pub mod gas;
pub mod simple;

pub use table::*;
pub use pht::*;
pub use gag::*;
pub use gas::*;
pub use simple::*;

use bitvec::prelude::*;
use log::trace;

use crate::bit::*;
use crate::branch::*;
use crate::error::{ Error, Result };
use crate::logic::{ self, CountMode };
use crate::register::ShiftRegister;

/// Interface to a predictor which guesses the direction of a branch and is
/// later told the real outcome.
///
/// For any one instruction, [BranchPredictor::predict] must be called before
/// [BranchPredictor::update], and instructions must be presented in program
/// order. Separate instances share no state.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Return the predicted outcome for this instruction.
    ///
    /// This may latch internal registers, but the state that determines
    /// future predictions only changes in [BranchPredictor::update].
    fn predict(&mut self, instr: &BranchInstruction) -> Result<BranchResult>;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, instr: &BranchInstruction, actual: BranchResult)
        -> Result<()>;

    /// A human-readable snapshot of the predictor's registers and tables.
    fn monitor(&self) -> String;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);
}

/// Reject a zero width for some part of a predictor.
pub(crate) fn check_width(what: &str, width: usize) -> Result<()> {
    if width == 0 {
        return Err(Error::InvalidConfig(format!("{} must be non-zero", what)));
    }
    Ok(())
}

/// Read the counter for `key` into the SC register. The counter's
/// most-significant bit is the prediction.
pub(crate) fn predict_from(pht: &PredictionHistoryTable,
    sc: &mut ShiftRegister, key: &BitSlice) -> Result<BranchResult>
{
    let counter = pht.get(key)?;
    sc.load(&counter)?;
    let res = BranchResult::from(sc.msb());
    trace!("predict key={} counter={} -> {}", render(key), sc, res);
    Ok(res)
}

/// Move the counter for `key` one step towards `actual` and write it back.
pub(crate) fn train(pht: &mut PredictionHistoryTable, key: &BitSlice,
    actual: BranchResult) -> Result<()>
{
    let mut counter = pht.get(key)?;
    logic::count(&mut counter, actual.is_taken(), CountMode::Saturating);
    trace!("update key={} actual={} counter={}",
        render(key), actual, render(&counter));
    pht.put(key, &counter)
}
