//! Ordered per-register comparison of two trace sets.

use std::fmt;

use crate::NUM_REGS;
use crate::event::Event;
use crate::traceset::TraceSet;

/// Why two events disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// Program counters differ.
    Pc,
    /// Both sides wrote the register, with different values.
    Value,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pc => write!(f, "PC mismatch"),
            Self::Value => write!(f, "value mismatch"),
        }
    }
}

/// One side of a mismatch, as it appeared in its source log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchSide {
    /// 1-based line number in the source log.
    pub line: usize,
    /// Program counter as logged.
    pub pc: String,
    /// Committed value, for writeback events.
    pub value: Option<String>,
}

impl MismatchSide {
    fn from_event(event: &Event) -> Self {
        Self {
            line: event.line,
            pc: event.pc.clone(),
            value: event.value().map(str::to_string),
        }
    }
}

/// A single point of disagreement between the two writeback streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Architectural register whose stream diverged.
    pub rd: u8,
    /// Position within that register's writeback sequence.
    pub index: usize,
    /// What disagreed.
    pub kind: MismatchKind,
    /// Reference (Spike) side.
    pub reference: MismatchSide,
    /// Design (RTL) side.
    pub rtl: MismatchSide,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MismatchKind::Pc => write!(
                f,
                "x{}[{}]: PC mismatch: line {} (spike) 0x{} != line {} (rtl) 0x{}",
                self.rd,
                self.index,
                self.reference.line,
                self.reference.pc,
                self.rtl.line,
                self.rtl.pc,
            ),
            MismatchKind::Value => write!(
                f,
                "x{}[{}]: value mismatch at 0x{}: line {} (spike) 0x{} != line {} (rtl) 0x{}",
                self.rd,
                self.index,
                self.reference.pc,
                self.reference.line,
                self.reference.value.as_deref().unwrap_or("-"),
                self.rtl.line,
                self.rtl.value.as_deref().unwrap_or("-"),
            ),
        }
    }
}

/// Result of comparing two trace sets.
#[derive(Debug, Default)]
pub struct MismatchReport {
    /// All detected mismatches, in register-then-sequence order.
    pub mismatches: Vec<Mismatch>,
    /// Number of event pairs compared.
    pub compared: usize,
}

impl MismatchReport {
    /// True if the traces agree on every compared pair.
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare the reference trace set against the design trace set.
///
/// Registers 1-31 are walked in lockstep up to the shorter of the two
/// per-register sequences. Register 0 is the retirement bucket and is never
/// compared. The walk does not stop at the first mismatch: a single upstream
/// bug often cascades, and the full divergence picture is wanted in one pass.
/// Tail events beyond the shorter sequence reflect one trace running longer
/// and are not an error.
pub fn compare_trace_sets(reference: &TraceSet, rtl: &TraceSet) -> MismatchReport {
    let mut report = MismatchReport::default();

    for rd in 1..NUM_REGS {
        let rd = rd as u8;
        let ref_seq = reference.register(rd);
        let rtl_seq = rtl.register(rd);

        for (index, (ref_event, rtl_event)) in ref_seq.iter().zip(rtl_seq).enumerate() {
            if ref_event.pc != rtl_event.pc {
                report.mismatches.push(Mismatch {
                    rd,
                    index,
                    kind: MismatchKind::Pc,
                    reference: MismatchSide::from_event(ref_event),
                    rtl: MismatchSide::from_event(rtl_event),
                });
            } else if let (Some(ref_value), Some(rtl_value)) =
                (ref_event.value(), rtl_event.value())
                && ref_value != rtl_value
            {
                report.mismatches.push(Mismatch {
                    rd,
                    index,
                    kind: MismatchKind::Value,
                    reference: MismatchSide::from_event(ref_event),
                    rtl: MismatchSide::from_event(rtl_event),
                });
            }
        }

        report.compared += ref_seq.len().min(rtl_seq.len());
    }

    report
}
