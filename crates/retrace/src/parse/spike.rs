//! Parser for Spike `--log-commits` output.
//!
//! Commit records look like
//! `core   0: 3 0x<PC> (0x<OPCODE>) [x<RD> 0x<VALUE>] [mem 0x<ADDR> ...]`,
//! interleaved with boot chatter and records from other privilege levels.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::event::{Event, EventKind};
use crate::{NUM_REGS, Result};

/// Privilege level at which the program under comparison commits. Records at
/// other levels are boot-ROM or firmware activity and are skipped.
const COMMIT_PRIV: &str = "3";

static COMMIT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn commit_pattern() -> &'static Regex {
    COMMIT_PATTERN.get_or_init(|| {
        Regex::new(r"^core\s+\d+:\s+(\d+)\s+0x([0-9a-fA-F]+)\s+\(0x[0-9a-fA-F]+\)\s*(.*)$")
            .unwrap()
    })
}

/// Reset-anchor state.
///
/// Spike starts emitting commits during boot-ROM execution, before the RTL
/// trace begins. Events are suppressed until the first commit at the reset
/// vector; the transition fires once and is irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetAnchor {
    /// Still before the reset vector; suppress everything.
    Seeking { reset_vector: u64 },
    /// Reset vector seen; emit events from here on.
    Tracking,
}

/// Streaming parser for Spike commit logs.
#[derive(Debug)]
pub struct SpikeParser {
    anchor: ResetAnchor,
}

impl SpikeParser {
    /// Create a parser that suppresses events until `reset_vector`.
    pub fn new(reset_vector: u64) -> Self {
        Self {
            anchor: ResetAnchor::Seeking { reset_vector },
        }
    }

    /// Parse one log line into an [`Event`].
    ///
    /// Returns `None` for non-commit chatter, records at other privilege
    /// levels, records before the reset anchor, and malformed payloads.
    pub fn parse_line(&mut self, line_no: usize, raw: &str) -> Option<Event> {
        let caps = commit_pattern().captures(raw.trim())?;
        if &caps[1] != COMMIT_PRIV {
            return None;
        }
        let pc = caps.get(2)?.as_str();

        if let ResetAnchor::Seeking { reset_vector } = self.anchor {
            let addr = u64::from_str_radix(pc, 16).ok()?;
            if addr != reset_vector {
                return None;
            }
            self.anchor = ResetAnchor::Tracking;
        }

        let payload = caps.get(3)?.as_str();
        let mut tokens = payload.split_whitespace();

        let Some(head) = tokens.next() else {
            // Pure retire: committed without touching a register.
            return Some(retire_event(line_no, pc));
        };

        if head == "mem" {
            // Memory store: register state untouched, but the instruction
            // still retired.
            return Some(retire_event(line_no, pc));
        }

        let rd: u8 = head.strip_prefix('x')?.parse().ok()?;
        if usize::from(rd) >= NUM_REGS {
            return None;
        }
        if rd == 0 {
            // x0 is hard-wired to zero; downgrade to a retirement.
            return Some(retire_event(line_no, pc));
        }

        // Writeback: `x<N> 0x<VALUE>`, optionally followed by `mem 0x<ADDR>`
        // for loads, which we ignore.
        let value = tokens.next()?.strip_prefix("0x")?;
        Some(Event {
            line: line_no,
            pc: pc.to_string(),
            rd,
            kind: EventKind::Writeback {
                value: value.to_string(),
            },
        })
    }
}

fn retire_event(line: usize, pc: &str) -> Event {
    Event {
        line,
        pc: pc.to_string(),
        rd: 0,
        kind: EventKind::RetireOnly,
    }
}

/// Parse a Spike trace file into events, anchored to `reset_vector`.
pub fn parse_trace_file(path: &Path, reset_vector: u64) -> Result<Vec<Event>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut parser = SpikeParser::new(reset_vector);
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parser.parse_line(idx + 1, &line) {
            Some(event) => events.push(event),
            None => trace!(line = idx + 1, "skipped spike line"),
        }
    }

    debug!(events = events.len(), "parsed spike trace");
    Ok(events)
}
