//! Helpers for collecting statistics.

use std::collections::*;
use bitvec::prelude::*;
use itertools::*;

use crate::branch::*;

/// Container for recording simple statistics while evaluating some model.
#[derive(Clone, Debug, Default)]
pub struct TraceStats {
    /// Per-branch statistics (indexed by branch address).
    pub data: BTreeMap<usize, BranchData>,

    /// Number of correct predictions
    pub global_hits: usize,

    /// Number of times any branch instruction was executed
    pub global_brns: usize,
}
impl TraceStats {
    pub fn new() -> Self { Self::default() }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        if self.global_brns == 0 {
            return 0.0;
        }
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Update global and per-branch statistics with one prediction.
    pub fn update(&mut self, record: &BranchRecord, prediction: BranchResult) {
        let hit = prediction == record.outcome;
        self.global_brns += 1;
        if hit { self.global_hits += 1; }

        let data = self.get_mut(record.instr.addr());
        data.occ += 1;
        data.pat.push(record.outcome.into());
        if hit { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, addr: usize) -> Option<&BranchData> {
        self.data.get(&addr)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, addr: usize) -> &mut BranchData {
        self.data.entry(addr).or_default()
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Return the `n` most frequently executed branches.
    pub fn get_common_branches(&self, n: usize) -> Vec<(usize, &BranchData)> {
        self.data.iter()
            .sorted_by(|x, y| y.1.occ.cmp(&x.1.occ))
            .take(n)
            .map(|(addr, s)| (*addr, s))
            .collect()
    }

    /// Return up to `n` branches (executed at least `min_occ` times) with a
    /// hit rate no better than `max_rate`, most frequent first.
    pub fn get_low_rate_branches(&self, n: usize, min_occ: usize, max_rate: f64)
        -> Vec<(usize, &BranchData)>
    {
        self.data.iter()
            .filter(|(_, s)| s.occ >= min_occ && s.hit_rate() <= max_rate)
            .sorted_by(|x, y| y.1.occ.cmp(&x.1.occ))
            .take(n)
            .map(|(addr, s)| (*addr, s))
            .collect()
    }
}

/// Container for per-branch statistics.
#[derive(Clone, Debug, Default)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}
impl BranchData {
    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        if self.occ == 0 {
            return 0.0;
        }
        self.hits as f64 / self.occ as f64
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }

    /// Short description of the observed direction of this branch.
    pub fn bias(&self) -> &'static str {
        if self.pat.is_empty() {
            "unseen"
        } else if self.is_always_taken() {
            "always taken"
        } else if self.is_never_taken() {
            "never taken"
        } else {
            "mixed"
        }
    }
}
