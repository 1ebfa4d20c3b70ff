//! Retirement-trace comparison for RTL-vs-reference differential testing.
//!
//! Parses the commit log produced by an RTL CPU simulation and the
//! `--log-commits` output of Spike (the RISC-V reference simulator),
//! normalizes both into a common event model, buckets the events per
//! architectural register, and reports every point where the two register
//! writeback streams disagree.
//!
//! # Example
//!
//! ```ignore
//! use retrace::{TraceSet, compare, parse};
//!
//! let reference = parse::spike::parse_trace_file("spike.log".as_ref(), 0x8000_0000)?;
//! let rtl = parse::rtl::parse_trace_file("rtl.log".as_ref())?;
//! let report = compare::compare_trace_sets(
//!     &TraceSet::from_events(reference),
//!     &TraceSet::from_events(rtl),
//! );
//! for mismatch in &report.mismatches {
//!     println!("{mismatch}");
//! }
//! ```

pub mod compare;
pub mod event;
pub mod parse;
pub mod traceset;

pub use compare::{Mismatch, MismatchKind, MismatchReport, compare_trace_sets};
pub use event::{Event, EventKind};
pub use traceset::TraceSet;

use thiserror::Error;

/// Number of general-purpose architectural registers. Register 0 is
/// hard-wired to zero and doubles as the retirement bucket.
pub const NUM_REGS: usize = 32;

/// Trace comparison errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
