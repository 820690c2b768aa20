//! Common types and data structures

/// The two preference operations the UI can queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Update,
    Clear,
}

impl EditKind {
    pub fn label(&self) -> &'static str {
        match self {
            EditKind::Update => "update",
            EditKind::Clear => "clear",
        }
    }
}

/// Display-side view of the store's edit queue. Updated from the spawned
/// edit tasks behind an `Arc<Mutex<_>>`; the UI only reads it.
#[derive(Default)]
pub struct EditTracker {
    pub queued: usize,                       // submitted, not yet started
    pub active: Option<(u32, EditKind)>,     // (sequence number, kind)
    pub last_finished: Option<(u32, EditKind)>,
    pub completed: u32,
    pub failed: u32,
}

impl EditTracker {
    /// True while any edit is queued or running.
    pub fn busy(&self) -> bool {
        self.queued > 0 || self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_while_queued_or_active() {
        let mut tracker = EditTracker::default();
        assert!(!tracker.busy());

        tracker.queued = 1;
        assert!(tracker.busy());

        tracker.queued = 0;
        tracker.active = Some((0, EditKind::Update));
        assert!(tracker.busy());

        tracker.active = None;
        assert!(!tracker.busy());
    }
}
