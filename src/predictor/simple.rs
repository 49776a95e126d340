
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::branch::*;
use crate::error::Result;
use crate::predictor::BranchPredictor;

/// A simple predictor with no state: randomly predict an outcome.
#[derive(Clone, Debug)]
pub struct RandomPredictor {
    seed: u64,
    rng: StdRng,
}
impl RandomPredictor {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: StdRng::seed_from_u64(seed) }
    }
}
impl BranchPredictor for RandomPredictor {
    fn name(&self) -> &'static str { "RandomPredictor" }
    fn predict(&mut self, _: &BranchInstruction) -> Result<BranchResult> {
        Ok(self.rng.gen::<bool>().into())
    }
    fn update(&mut self, _: &BranchInstruction, _: BranchResult) -> Result<()> {
        Ok(())
    }
    fn monitor(&self) -> String {
        format!("RandomPredictor snapshot: \nseed: {}\n", self.seed)
    }
    fn reset(&mut self) { self.rng = StdRng::seed_from_u64(self.seed); }
}

/// A simple predictor with no state: always predict 'taken'.
#[derive(Clone, Copy, Debug, Default)]
pub struct TakenPredictor;
impl BranchPredictor for TakenPredictor {
    fn name(&self) -> &'static str { "TakenPredictor" }
    fn predict(&mut self, _: &BranchInstruction) -> Result<BranchResult> {
        Ok(BranchResult::Taken)
    }
    fn update(&mut self, _: &BranchInstruction, _: BranchResult) -> Result<()> {
        Ok(())
    }
    fn monitor(&self) -> String { "TakenPredictor snapshot: \n".to_string() }
    fn reset(&mut self) {}
}

/// A simple predictor with no state: always predict 'not-taken'.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotTakenPredictor;
impl BranchPredictor for NotTakenPredictor {
    fn name(&self) -> &'static str { "NotTakenPredictor" }
    fn predict(&mut self, _: &BranchInstruction) -> Result<BranchResult> {
        Ok(BranchResult::NotTaken)
    }
    fn update(&mut self, _: &BranchInstruction, _: BranchResult) -> Result<()> {
        Ok(())
    }
    fn monitor(&self) -> String { "NotTakenPredictor snapshot: \n".to_string() }
    fn reset(&mut self) {}
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn random_is_reproducible() {
        let instr = BranchInstruction::from_addr(0, 4);
        let mut a = RandomPredictor::new(7);
        let first: Vec<_> = (0..32).map(|_| a.predict(&instr).unwrap()).collect();
        a.reset();
        let again: Vec<_> = (0..32).map(|_| a.predict(&instr).unwrap()).collect();
        assert_eq!(first, again);
        assert!(first.iter().any(|r| r.is_taken()));
        assert!(first.iter().any(|r| !r.is_taken()));
    }

    #[test]
    fn constant_predictors() {
        let instr = BranchInstruction::from_addr(0, 4);
        assert_eq!(TakenPredictor.predict(&instr).unwrap(), BranchResult::Taken);
        assert_eq!(NotTakenPredictor.predict(&instr).unwrap(), BranchResult::NotTaken);
    }
}
