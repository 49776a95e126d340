//! Branch traces: loading them from text and generating synthetic ones.
//!
//! A text trace has one record per line: a branch address and its outcome,
//! e.g. `0x4005d0 T`. Addresses are hexadecimal with a `0x` prefix, or
//! decimal without one. Outcomes are `T`/`N` (or `1`/`0`). Blank lines and
//! anything after `#` are ignored.

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::Path;

use crate::branch::*;
use crate::error::{ Error, Result };

/// A sequence of resolved branches, in program order.
#[derive(Clone, Debug)]
pub struct Trace {
    name: String,
    address_width: usize,
    records: Vec<BranchRecord>,
}

impl Trace {
    pub fn new(name: impl ToString, address_width: usize,
        records: Vec<BranchRecord>) -> Self
    {
        Self { name: name.to_string(), address_width, records }
    }

    /// Parse a text trace. Every address must fit in `address_width` bits.
    pub fn parse(name: impl ToString, text: &str, address_width: usize)
        -> Result<Self>
    {
        let mut records = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            records.push(parse_record(idx + 1, line, address_width)?);
        }
        let res = Self::new(name, address_width, records);
        debug!("Parsed {} records from {}", res.num_entries(), res.name());
        Ok(res)
    }

    /// Read and parse a text trace from a file.
    pub fn from_file(path: impl AsRef<Path>, address_width: usize)
        -> Result<Self>
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &text, address_width)
    }

    /// Generate a reproducible trace of `len` records over `num_branches`
    /// static branches.
    ///
    /// Each branch either leans towards one direction with a random bias, or
    /// behaves like a loop exit (taken `period - 1` times, then not taken).
    pub fn synthetic(len: usize, address_width: usize, num_branches: usize,
        seed: u64) -> Result<Self>
    {
        if address_width == 0 || num_branches == 0 {
            return Err(Error::InvalidConfig(
                "synthetic traces need a non-zero address width and branch count"
                    .to_string()
            ));
        }
        let mask = if address_width >= usize::BITS as usize {
            usize::MAX
        } else {
            (1usize << address_width) - 1
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let mut branches: Vec<SyntheticBranch> = (0..num_branches).map(|_| {
            let addr = rng.gen::<usize>() & mask;
            let behavior = if rng.gen_bool(0.5) {
                Behavior::Biased(rng.gen_range(0.0..=1.0))
            } else {
                Behavior::Loop(rng.gen_range(2..=8))
            };
            SyntheticBranch { addr, behavior, count: 0 }
        }).collect();

        let records = (0..len).map(|_| {
            let idx = rng.gen_range(0..branches.len());
            let brn = &mut branches[idx];
            let outcome = brn.next_outcome(&mut rng);
            BranchRecord::new(
                BranchInstruction::from_addr(brn.addr, address_width),
                outcome,
            )
        }).collect();

        Ok(Self::new(format!("synthetic-{}", seed), address_width, records))
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn address_width(&self) -> usize { self.address_width }

    /// Return the number of records
    pub fn num_entries(&self) -> usize { self.records.len() }

    /// Return a slice of records.
    pub fn as_slice(&self) -> &[BranchRecord] { &self.records }
}

fn parse_record(line: usize, text: &str, address_width: usize)
    -> Result<BranchRecord>
{
    let err = |reason: String| Error::ParseTrace { line, reason };

    let mut fields = text.split_whitespace();
    let (addr, outcome) = match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(o), None) => (a, o),
        _ => return Err(err(format!("expected '<address> <T|N>', got '{}'", text))),
    };

    let value = match addr.strip_prefix("0x").or_else(|| addr.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => addr.parse::<usize>(),
    }.map_err(|e| err(format!("bad address '{}': {}", addr, e)))?;

    if address_width < usize::BITS as usize && (value >> address_width) != 0 {
        return Err(err(format!("address {:#x} does not fit in {} bits",
            value, address_width)));
    }

    let outcome = match outcome {
        "T" | "t" | "1" => BranchResult::Taken,
        "N" | "n" | "0" => BranchResult::NotTaken,
        _ => return Err(err(format!("bad outcome '{}'", outcome))),
    };

    Ok(BranchRecord::new(
        BranchInstruction::from_addr(value, address_width),
        outcome,
    ))
}

#[derive(Clone, Copy, Debug)]
enum Behavior {
    /// Taken with some probability
    Biased(f64),
    /// Not taken once every 'n' executions
    Loop(usize),
}

#[derive(Clone, Copy, Debug)]
struct SyntheticBranch {
    addr: usize,
    behavior: Behavior,
    count: usize,
}
impl SyntheticBranch {
    fn next_outcome(&mut self, rng: &mut StdRng) -> BranchResult {
        self.count += 1;
        match self.behavior {
            Behavior::Biased(p) => rng.gen_bool(p).into(),
            Behavior::Loop(n) => (self.count % n != 0).into(),
        }
    }
}
