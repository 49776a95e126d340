//! Bit-level simulation of two-level adaptive branch predictors.
//!
//! The hardware building blocks ([register::ShiftRegister],
//! [predictor::PredictionHistoryTable] and the functions in [logic]) are
//! composed into the [predictor::GAg] and [predictor::GAs] predictors. The
//! [trace], [stats] and [sim] modules drive a predictor over a branch trace
//! and measure its accuracy.

pub mod bit;
pub mod branch;
pub mod config;
pub mod error;
pub mod logic;
pub mod predictor;
pub mod register;
pub mod sim;
pub mod stats;
pub mod trace;

pub use bit::*;
pub use branch::*;
pub use config::*;
pub use error::*;
pub use predictor::*;
pub use register::*;
pub use trace::*;
