//! Global-history, global-table (GAg) predictor.

use log::debug;

use crate::branch::*;
use crate::error::Result;
use crate::predictor::*;
use crate::register::ShiftRegister;

/// A two-level predictor with a single pattern table indexed only by global
/// history.
///
/// The branch history register (BHR) records the last `bhr_width` outcomes,
/// newest first, and directly selects one of `2^bhr_width` saturating
/// counters. The branch address plays no part in the prediction.
#[derive(Clone, Debug)]
pub struct GAg {
    /// Branch history register
    bhr: ShiftRegister,

    /// Holds the counter used for the last prediction
    sc: ShiftRegister,

    /// Pattern table keyed by the BHR
    pht: PredictionHistoryTable,
}
impl GAg {
    pub const DEFAULT_BHR_WIDTH: usize = 4;
    pub const DEFAULT_SC_WIDTH: usize = 2;

    pub fn new(bhr_width: usize, sc_width: usize) -> Result<Self> {
        check_width("BHR width", bhr_width)?;
        check_width("SC width", sc_width)?;
        let pht = PredictionHistoryTable::new(bhr_width, sc_width)?;
        debug!("GAg: {}-bit history, {}-bit counters, {} PHT rows",
            bhr_width, sc_width, pht.size());
        Ok(Self {
            bhr: ShiftRegister::new("BHR", bhr_width),
            sc: ShiftRegister::new("SC", sc_width),
            pht,
        })
    }

    pub fn bhr(&self) -> &ShiftRegister { &self.bhr }
    pub fn sc(&self) -> &ShiftRegister { &self.sc }
    pub fn pht(&self) -> &PredictionHistoryTable { &self.pht }
}

impl BranchPredictor for GAg {
    fn name(&self) -> &'static str { "GAg" }

    fn predict(&mut self, _instr: &BranchInstruction) -> Result<BranchResult> {
        predict_from(&self.pht, &mut self.sc, self.bhr.read())
    }

    fn update(&mut self, _instr: &BranchInstruction, actual: BranchResult)
        -> Result<()>
    {
        train(&mut self.pht, self.bhr.read(), actual)?;
        self.bhr.insert(actual.into());
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("GAg predictor snapshot: \n{}{}{}",
            self.bhr.monitor(), self.sc.monitor(), self.pht.monitor())
    }

    fn reset(&mut self) {
        self.bhr.clear();
        self.sc.clear();
        self.pht.clear();
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::bit::*;
    use rstest::rstest;

    fn counter_at(p: &GAg, history: usize) -> usize {
        let key = from_number(history, p.bhr().len());
        to_number(&p.pht().get(&key).unwrap())
    }

    fn run(p: &mut GAg, outcomes: &[BranchResult]) -> Vec<BranchResult> {
        let instr = BranchInstruction::from_addr(0x40, 8);
        outcomes.iter().map(|o| {
            let pred = p.predict(&instr).unwrap();
            p.update(&instr, *o).unwrap();
            pred
        }).collect()
    }

    #[test]
    fn all_taken_converges() {
        let mut p = GAg::new(4, 2).unwrap();
        let preds = run(&mut p, &[BranchResult::Taken; 20]);

        // History fills with ones after four branches. Row 1111 then counts
        // up from zero and predicts taken once its MSB flips (value 2).
        assert_eq!(counter_at(&p, 0b1111), 3);
        let first_taken = preds.iter()
            .position(|r| r.is_taken())
            .unwrap();
        assert_eq!(first_taken, 6);
        assert!(preds[first_taken..].iter().all(|r| r.is_taken()));
        assert_eq!(p.bhr().as_number(), 0b1111);
    }

    #[test]
    fn ten_taken_then_ten_not_taken() {
        let mut p = GAg::new(4, 2).unwrap();
        run(&mut p, &[BranchResult::Taken; 10]);
        assert_eq!(counter_at(&p, 0b1111), 3);

        let mut p = GAg::new(4, 2).unwrap();
        let preds = run(&mut p, &[BranchResult::NotTaken; 10]);
        assert_eq!(counter_at(&p, 0b0000), 0);
        assert!(preds.iter().all(|r| !r.is_taken()));
        assert_eq!(p.pht().occupied().count(), 0);
    }

    #[test]
    fn learns_alternating_pattern() {
        let mut p = GAg::new(2, 2).unwrap();
        let pattern: Vec<BranchResult> = (0..40)
            .map(|i| BranchResult::from(i % 2 == 0))
            .collect();
        let preds = run(&mut p, &pattern);
        let hits = preds[20..].iter().zip(pattern[20..].iter())
            .filter(|(p, o)| p == o)
            .count();
        assert_eq!(hits, 20);
    }

    #[test]
    fn predict_latches_sc_only() {
        let mut p = GAg::new(4, 2).unwrap();
        let instr = BranchInstruction::from_addr(0, 8);
        p.update(&instr, BranchResult::NotTaken).unwrap();
        let before = p.monitor();
        p.predict(&instr).unwrap();
        p.predict(&instr).unwrap();
        assert_eq!(before, p.monitor());
        assert_eq!(p.bhr().as_number(), 0);
    }

    #[test]
    fn monitor_snapshot() {
        let mut p = GAg::new(2, 2).unwrap();
        let instr = BranchInstruction::from_addr(0, 8);
        p.update(&instr, BranchResult::Taken).unwrap();
        p.predict(&instr).unwrap();
        assert_eq!(p.monitor(),
            "GAg predictor snapshot: \nBHR: 10\nSC: 00\nPHT:\n  00: 01\n");
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut p = GAg::new(3, 2).unwrap();
        run(&mut p, &[BranchResult::Taken; 8]);
        p.reset();
        assert_eq!(p.bhr().len(), 3);
        assert_eq!(p.bhr().as_number(), 0);
        assert_eq!(p.pht().occupied().count(), 0);
    }

    #[rstest]
    #[case(0, 2)]
    #[case(4, 0)]
    fn rejects_zero_widths(#[case] bhr: usize, #[case] sc: usize) {
        assert!(GAg::new(bhr, sc).is_err());
    }
}
