//! Evaluate a two-level predictor against a branch trace.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use twolevel::*;
use twolevel::logic::HashMode;
use twolevel::sim;

#[derive(Parser, Debug)]
#[command(about = "Measure branch prediction accuracy of GAg/GAs predictors")]
struct Args {
    /// Text trace (`<address> <T|N>` per line). Uses a synthetic trace if
    /// omitted.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// JSON predictor configuration; overrides the predictor options below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Predictor variant (gag, gas, taken, not-taken, random)
    #[arg(long, default_value = "gag")]
    predictor: PredictorKind,

    /// Branch history register width
    #[arg(long, default_value_t = 4)]
    bhr: usize,

    /// Saturating counter width
    #[arg(long, default_value_t = 2)]
    sc: usize,

    /// Branch address width
    #[arg(long, default_value_t = 8)]
    address_width: usize,

    /// Hashed address bits selecting a PHT set (GAs)
    #[arg(long, default_value_t = 4)]
    hash_width: usize,

    #[arg(long, default_value = "xor")]
    hash_mode: HashMode,

    /// Records in the synthetic trace
    #[arg(long, default_value_t = 100_000)]
    synthetic: usize,

    /// Static branches in the synthetic trace
    #[arg(long, default_value_t = 64)]
    branches: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Also evaluate the static and random baselines
    #[arg(long)]
    baselines: bool,

    /// Print the predictor state after the run
    #[arg(long)]
    monitor: bool,

    /// Print the resolved predictor configuration as JSON
    #[arg(long)]
    dump_config: bool,

    /// Number of most frequently executed branches to list
    #[arg(long, default_value_t = 4)]
    common: usize,
}

impl Args {
    fn predictor_config(&self) -> Result<PredictorConfig> {
        if let Some(path) = &self.config {
            return PredictorConfig::from_file(path);
        }
        let mut cfg = PredictorConfig::gas(self.bhr, self.sc,
            self.address_width, self.hash_width, self.hash_mode);
        cfg.kind = self.predictor;
        cfg.seed = self.seed;
        Ok(cfg)
    }

    fn load_trace(&self, address_width: usize) -> Result<Trace> {
        match &self.trace {
            Some(path) => Trace::from_file(path, address_width),
            None => Trace::synthetic(self.synthetic, address_width,
                self.branches, self.seed),
        }
    }
}

fn report(name: &str, stat: &stats::TraceStats) {
    println!("  {:20} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        name,
        stat.global_hits(),
        stat.global_brns(),
        stat.hit_rate() * 100.0,
        stat.global_miss()
    );
}

fn evaluate(args: &Args) -> Result<()> {
    let cfg = args.predictor_config()?;
    if args.dump_config {
        println!("{}", cfg.to_json()?);
    }
    let address_width = cfg.address_width.unwrap_or(args.address_width);
    let trace = args.load_trace(address_width)?;
    println!("[*] {}, {} records", trace.name(), trace.num_entries());

    let mut p = cfg.build()?;
    let stat = sim::run(p.as_mut(), trace.as_slice())?;
    report(p.name(), &stat);
    let key_width = cfg.key_width()?;
    if key_width > 0 {
        println!("  PHT key width: {} bits ({} rows)", key_width, 1usize << key_width);
    }
    println!("  Unique branches: {}", stat.num_unique_branches());

    let common = stat.get_common_branches(args.common);
    if !common.is_empty() {
        println!("  Most common branches:");
        for (addr, data) in common {
            println!("    {:016x} {:8}/{:8} {:.4} taken {:8} ({})",
                addr, data.hits, data.occ, data.hit_rate(),
                data.times_taken(), data.bias());
        }
    }

    let low = stat.get_low_rate_branches(4, 100, 0.55);
    if !low.is_empty() {
        println!("  Low hit-rate branches:");
        for (addr, data) in low {
            println!("    {:016x} {:8}/{:8} {:.4}",
                addr, data.hits, data.occ, data.hit_rate());
        }
    }

    if args.baselines {
        let baselines = [
            PredictorConfig { kind: PredictorKind::Taken, ..cfg.clone() },
            PredictorConfig { kind: PredictorKind::NotTaken, ..cfg.clone() },
            PredictorConfig { kind: PredictorKind::Random, ..cfg.clone() },
        ];
        for (b, res) in baselines.iter().zip(sim::sweep(&baselines, trace.as_slice())) {
            report(&format!("{:?}", b.kind), &res?);
        }
    }

    if args.monitor {
        print!("{}", p.monitor());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match evaluate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}
