//! Per-register demultiplexing of a flat event sequence.

use crate::NUM_REGS;
use crate::event::Event;

/// Events of one trace bucketed per destination register.
///
/// Built once from the flat parser output and read-only afterwards. The
/// partition is stable: within each bucket, events keep the relative order
/// they had in the source log. Global interleaving across registers is
/// deliberately discarded; the two simulators need not retire in the same
/// global order, but the value sequence each register receives must match.
#[derive(Debug)]
pub struct TraceSet {
    regs: [Vec<Event>; NUM_REGS],
}

impl TraceSet {
    /// Bucket a flat event sequence by destination register.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut regs: [Vec<Event>; NUM_REGS] = std::array::from_fn(|_| Vec::new());
        for event in events {
            regs[usize::from(event.rd)].push(event);
        }
        Self { regs }
    }

    /// Events destined for register `rd`, in trace order.
    ///
    /// # Panics
    ///
    /// Panics if `rd` is not in `0..NUM_REGS`.
    pub fn register(&self, rd: u8) -> &[Event] {
        &self.regs[usize::from(rd)]
    }

    /// Total number of events across all buckets.
    pub fn len(&self) -> usize {
        self.regs.iter().map(Vec::len).sum()
    }

    /// True if no events were bucketed.
    pub fn is_empty(&self) -> bool {
        self.regs.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn writeback(line: usize, pc: &str, rd: u8, value: &str) -> Event {
        Event {
            line,
            pc: pc.to_string(),
            rd,
            kind: EventKind::Writeback {
                value: value.to_string(),
            },
        }
    }

    fn retire(line: usize, pc: &str) -> Event {
        Event {
            line,
            pc: pc.to_string(),
            rd: 0,
            kind: EventKind::RetireOnly,
        }
    }

    #[test]
    fn test_partition_is_stable() {
        let events = vec![
            writeback(1, "80000000", 5, "1"),
            writeback(2, "80000004", 3, "2"),
            writeback(3, "80000008", 5, "3"),
            retire(4, "8000000c"),
            writeback(5, "80000010", 5, "4"),
        ];

        let set = TraceSet::from_events(events);

        let x5: Vec<usize> = set.register(5).iter().map(|e| e.line).collect();
        assert_eq!(x5, vec![1, 3, 5]);
        assert_eq!(set.register(3).len(), 1);
        assert_eq!(set.register(0).len(), 1);
    }

    #[test]
    fn test_every_event_lands_in_exactly_one_bucket() {
        let events = vec![
            writeback(1, "80000000", 1, "1"),
            retire(2, "80000004"),
            writeback(3, "80000008", 31, "2"),
            writeback(4, "8000000c", 1, "3"),
        ];
        let total = events.len();

        let set = TraceSet::from_events(events);

        assert_eq!(set.len(), total);
        let sum: usize = (0..NUM_REGS).map(|r| set.register(r as u8).len()).sum();
        assert_eq!(sum, total);
    }

    #[test]
    fn test_empty_trace() {
        let set = TraceSet::from_events(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.register(7).is_empty());
    }
}
