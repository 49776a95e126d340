//! Drive predictors over a trace.

use log::{ info, trace };
use rayon::prelude::*;

use crate::branch::*;
use crate::config::PredictorConfig;
use crate::error::Result;
use crate::predictor::BranchPredictor;
use crate::stats::TraceStats;

/// Run a predictor over some records in program order.
///
/// For each record the predictor makes a prediction, the prediction is
/// tallied, and then the predictor is updated with the real outcome.
pub fn run(p: &mut dyn BranchPredictor, records: &[BranchRecord])
    -> Result<TraceStats>
{
    let mut stat = TraceStats::new();
    for record in records {
        let prediction = p.predict(&record.instr)?;
        if prediction != record.outcome {
            trace!("{} miss at {}: predicted {}", p.name(), record.instr, prediction);
        }
        stat.update(record, prediction);
        p.update(&record.instr, record.outcome)?;
    }
    info!("{}: {}/{} correct ({:.2}%)", p.name(),
        stat.global_hits(), stat.global_brns(), stat.hit_rate() * 100.0);
    Ok(stat)
}

/// Evaluate several configurations against the same records.
///
/// Each configuration gets its own predictor, so the runs are independent
/// and proceed in parallel. Results are returned in the order given.
pub fn sweep(configs: &[PredictorConfig], records: &[BranchRecord])
    -> Vec<Result<TraceStats>>
{
    configs.par_iter()
        .map(|cfg| {
            let mut p = cfg.build()?;
            run(p.as_mut(), records)
        })
        .collect()
}
