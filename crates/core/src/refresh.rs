use std::sync::atomic::{AtomicBool, Ordering};

/// Single-slot coalescing for rebuild requests.
///
/// Any number of [`request`](Self::request) calls between two drains
/// collapse into one pending rebuild; [`take`](Self::take) claims it. The
/// worker that drains runs exactly one build against the latest inputs, so
/// bursts of change notifications cost one rebuild, not one each.
///
/// There is no queue and no ambient registration — the host wires its
/// change notifications to `request` and drives the drain explicitly.
#[derive(Debug, Default)]
pub struct RefreshCoalescer {
    pending: AtomicBool,
}

impl RefreshCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that underlying data changed. Returns `true` if this call newly
    /// set the pending slot, `false` if a rebuild was already queued.
    pub fn request(&self) -> bool {
        !self.pending.swap(true, Ordering::AcqRel)
    }

    /// Claim the pending rebuild, clearing the slot. Returns `true` exactly
    /// once per batch of requests.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Whether a rebuild is currently queued.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}
