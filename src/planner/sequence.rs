use std::collections::HashMap;

/// Logical fetch slots whose responses may overtake each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Regions,
    Overview,
    Weather,
}

/// Proof that a fetch was started; only the most recent ticket of a slot
/// may write its result back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    slot: Slot,
    seq: u64,
}

impl Ticket {
    pub fn slot(&self) -> Slot {
        self.slot
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlotSequencer {
    latest: HashMap<Slot, u64>,
}

impl SlotSequencer {
    pub fn issue(&mut self, slot: Slot) -> Ticket {
        let seq = self.latest.entry(slot).or_insert(0);
        *seq += 1;
        Ticket { slot, seq: *seq }
    }

    /// Make every outstanding ticket of `slot` stale without starting a fetch.
    pub fn invalidate(&mut self, slot: Slot) {
        *self.latest.entry(slot).or_insert(0) += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.slot).copied() == Some(ticket.seq)
    }
}
