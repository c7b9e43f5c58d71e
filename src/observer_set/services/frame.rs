//! Transient state of one in-flight broadcast.

use crate::observer_set::domain::{DispatchId, DispatchSummary, MessageName, MessageSlot};

/// Cursor and bound of a single broadcast over an
/// [`ObserverRegistry`](super::ObserverRegistry).
///
/// Every member carries the registration stamp it received when it was
/// added, and stamps only grow. A frame therefore needs two numbers:
///
/// - `bound`: the first stamp handed out after the frame opened. Members at
///   or above it joined mid-broadcast and are never visited by this frame.
/// - `cursor`: the stamp of the last member visited. The next visit resolves
///   the first member after it.
///
/// Members removed mid-broadcast simply disappear from the registry's arena,
/// so unvisited ones are skipped without the frame tracking them. Nested
/// broadcasts open their own frame; frames never share cursors.
#[derive(Debug)]
pub(crate) struct DispatchFrame {
    id: DispatchId,
    slot: Option<MessageSlot>,
    cursor: u64,
    bound: u64,
    delivered: usize,
    skipped: usize,
}

impl DispatchFrame {
    pub(crate) fn open(bound: u64, slot: Option<MessageSlot>) -> Self {
        Self {
            id: DispatchId::new(),
            slot,
            cursor: 0,
            bound,
            delivered: 0,
            skipped: 0,
        }
    }

    pub(crate) const fn id(&self) -> DispatchId {
        self.id
    }

    pub(crate) const fn slot(&self) -> Option<MessageSlot> {
        self.slot
    }

    pub(crate) const fn cursor(&self) -> u64 {
        self.cursor
    }

    pub(crate) const fn bound(&self) -> u64 {
        self.bound
    }

    /// Whether a member with `stamp` was committed before the frame opened.
    pub(crate) const fn admits(&self, stamp: u64) -> bool {
        stamp < self.bound
    }

    pub(crate) const fn advance_to(&mut self, stamp: u64) {
        self.cursor = stamp;
    }

    pub(crate) const fn record_delivery(&mut self) {
        self.delivered += 1;
    }

    pub(crate) const fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub(crate) const fn delivered(&self) -> usize {
        self.delivered
    }

    pub(crate) fn finish(self, message: Option<MessageName>) -> DispatchSummary {
        DispatchSummary::new(
            self.id,
            message,
            self.slot.map(MessageSlot::mode),
            self.delivered,
            self.skipped,
        )
    }
}
