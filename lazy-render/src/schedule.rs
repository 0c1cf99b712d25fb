use alloc::vec::Vec;

/// A trailing-edge debounce handle.
///
/// At most one deadline is pending. Triggering again replaces it, so a burst of events
/// collapses into one firing `delay_ms` after the last event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Cancels any pending deadline and schedules a new one. Returns the new deadline.
    pub fn trigger(&mut self, now_ms: u64) -> u64 {
        let deadline = now_ms.saturating_add(self.delay_ms);
        self.deadline = Some(deadline);
        deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the pending deadline if it has been reached, returning it.
    pub fn fire(&mut self, now_ms: u64) -> Option<u64> {
        let deadline = self.deadline.filter(|&d| d <= now_ms)?;
        self.deadline = None;
        Some(deadline)
    }
}

/// Independent delayed cleanups, one entry per scheduling.
///
/// The same element may be queued more than once (once per pass that found it near); every
/// entry fires on its own.
#[derive(Clone, Debug)]
pub struct CleanupQueue<E> {
    delay_ms: u64,
    // Pushed with non-decreasing due times.
    entries: Vec<(u64, E)>,
}

impl<E> CleanupQueue<E> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            entries: Vec::new(),
        }
    }

    pub fn schedule(&mut self, element: E, now_ms: u64) -> u64 {
        let due = now_ms.saturating_add(self.delay_ms);
        self.entries.push((due, element));
        due
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|(due, _)| *due).min()
    }

    /// Removes and returns every entry due at or before `now_ms`, oldest first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<E> {
        let (due, pending): (Vec<_>, Vec<_>) = core::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(due, _)| *due <= now_ms);
        self.entries = pending;
        due.into_iter().map(|(_, element)| element).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
