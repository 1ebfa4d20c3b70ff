//! Parser for the RTL simulator's commit log.
//!
//! The RTL trace carries two record shapes:
//!
//! - `PC <hex> WB [rd] = <hex>` — register writeback. The register field is
//!   right-aligned inside the brackets, so it may split into separate tokens
//!   (`[ 5]` vs `[13]`); unbracketed `x<N>` forms are accepted too.
//! - `PC <hex> RETIRE` — instruction committed without a writeback.
//!
//! No reset anchoring is needed here: unlike Spike, the RTL simulation
//! starts at the entry point, so the trace begins where comparison begins.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::event::{Event, EventKind};
use crate::{NUM_REGS, Result};

static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();
static WB_PATTERN: OnceLock<Regex> = OnceLock::new();

fn line_pattern() -> &'static Regex {
    LINE_PATTERN
        .get_or_init(|| Regex::new(r"^PC\s+([0-9a-fA-F]+)\s+(WB|RETIRE)\b\s*(.*)$").unwrap())
}

fn wb_pattern() -> &'static Regex {
    WB_PATTERN.get_or_init(|| {
        Regex::new(r"^\[?\s*x?(\d+)\s*\]?\s*=\s*(?:0x)?([0-9a-fA-F]+)").unwrap()
    })
}

/// Parse one RTL log line into an [`Event`].
///
/// Returns `None` for lines without a `PC` record and for malformed
/// writeback payloads.
pub fn parse_line(line_no: usize, raw: &str) -> Option<Event> {
    let caps = line_pattern().captures(raw.trim())?;
    let pc = caps.get(1)?.as_str();

    match &caps[2] {
        "WB" => {
            let payload = caps.get(3)?.as_str();
            let wb = wb_pattern().captures(payload)?;
            let rd: u8 = wb.get(1)?.as_str().parse().ok()?;
            if usize::from(rd) >= NUM_REGS {
                return None;
            }
            // A writeback to x0 stays a writeback event. It lands in the
            // register-0 retirement bucket and never reaches comparison.
            Some(Event {
                line: line_no,
                pc: pc.to_string(),
                rd,
                kind: EventKind::Writeback {
                    value: wb.get(2)?.as_str().to_string(),
                },
            })
        }
        "RETIRE" => Some(Event {
            line: line_no,
            pc: pc.to_string(),
            rd: 0,
            kind: EventKind::RetireOnly,
        }),
        _ => None,
    }
}

/// Parse an RTL trace file into events.
pub fn parse_trace_file(path: &Path) -> Result<Vec<Event>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(idx + 1, &line) {
            Some(event) => events.push(event),
            None => trace!(line = idx + 1, "skipped rtl line"),
        }
    }

    debug!(events = events.len(), "parsed rtl trace");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_writeback_padded_bracket() {
        let event = parse_line(7, "PC 0000000080000000 WB [ 5] = 0000000000000001").unwrap();

        assert_eq!(event.line, 7);
        assert_eq!(event.pc, "0000000080000000");
        assert_eq!(event.rd, 5);
        assert_eq!(event.value(), Some("0000000000000001"));
    }

    #[test]
    fn test_parse_writeback_two_digit_register() {
        let event = parse_line(1, "PC 0000000080000004 WB [13] = 00000000deadbeef").unwrap();

        assert_eq!(event.rd, 13);
        assert_eq!(event.value(), Some("00000000deadbeef"));
    }

    #[test]
    fn test_parse_writeback_unbracketed_register() {
        let event = parse_line(1, "PC 0000000080000008 WB x7 = 0000000000000042").unwrap();

        assert_eq!(event.rd, 7);
        assert_eq!(event.value(), Some("0000000000000042"));
    }

    #[test]
    fn test_parse_retire() {
        let event = parse_line(3, "PC 000000008000000c RETIRE").unwrap();

        assert_eq!(event.rd, 0);
        assert_eq!(event.kind, EventKind::RetireOnly);
        assert_eq!(event.pc, "000000008000000c");
    }

    #[test]
    fn test_x0_writeback_stays_in_bucket_zero() {
        let event = parse_line(1, "PC 0000000080000010 WB [ 0] = 0000000000000000").unwrap();

        assert_eq!(event.rd, 0);
        assert!(matches!(event.kind, EventKind::Writeback { .. }));
    }

    #[test]
    fn test_register_out_of_range_skipped() {
        assert!(parse_line(1, "PC 0000000080000000 WB [32] = 0000000000000001").is_none());
    }

    #[test]
    fn test_skips_non_commit_lines() {
        assert!(parse_line(1, "").is_none());
        assert!(parse_line(2, "Simulation start.").is_none());
        assert!(parse_line(3, "CYCLE 124 fetch stall").is_none());
        assert!(parse_line(4, "PC 0000000080000000").is_none());
    }

    #[test]
    fn test_skips_malformed_writeback_payload() {
        assert!(parse_line(1, "PC 0000000080000000 WB").is_none());
        assert!(parse_line(2, "PC 0000000080000000 WB [ 5] =").is_none());
    }
}
