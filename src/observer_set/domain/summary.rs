//! Outcome record of a completed broadcast.

use super::{DispatchId, DispatchMode, MessageName};

/// What a broadcast delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    id: DispatchId,
    message: Option<MessageName>,
    mode: Option<DispatchMode>,
    delivered: usize,
    skipped: usize,
}

impl DispatchSummary {
    pub(crate) const fn new(
        id: DispatchId,
        message: Option<MessageName>,
        mode: Option<DispatchMode>,
        delivered: usize,
        skipped: usize,
    ) -> Self {
        Self {
            id,
            message,
            mode,
            delivered,
            skipped,
        }
    }

    /// Returns the identifier of the broadcast's dispatch frame.
    #[must_use]
    pub const fn id(&self) -> DispatchId {
        self.id
    }

    /// Returns the broadcast message, or `None` for a plain `for_each` pass.
    #[must_use]
    pub const fn message(&self) -> Option<&MessageName> {
        self.message.as_ref()
    }

    /// Returns the dispatch mode, or `None` for a plain `for_each` pass.
    #[must_use]
    pub const fn mode(&self) -> Option<DispatchMode> {
        self.mode
    }

    /// Returns how many observers were invoked.
    #[must_use]
    pub const fn delivered(&self) -> usize {
        self.delivered
    }

    /// Returns how many visited observers were skipped because they do not
    /// implement the message.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}
