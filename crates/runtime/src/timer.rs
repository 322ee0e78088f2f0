//! Cancellable one-shot timers on the runtime timebase.
//!
//! Timers never fire on their own: the owner polls [`TimerQueue::pop_due`]
//! from its frame step. Cancelling removes the entry, so a cancelled timer can
//! never be returned, even when it was already due in the frame being processed.

use foundation::math::precision::stable_total_cmp_f64;
use foundation::time::Time;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct PendingTimer<T> {
    handle: TimerHandle,
    due: Time,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<PendingTimer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Time, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            due,
            payload,
        });
        handle
    }

    /// Cancels a pending timer.
    ///
    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the earliest timer due at or before `now`.
    ///
    /// Ordering contract: earlier `due` first, then scheduling order.
    pub fn pop_due(&mut self, now: Time) -> Option<(TimerHandle, T)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due.0 <= now.0)
            .min_by(|(_, a), (_, b)| {
                stable_total_cmp_f64(a.due.0, b.due.0).then_with(|| a.handle.cmp(&b.handle))
            })
            .map(|(idx, _)| idx)?;
        let timer = self.pending.remove(idx);
        Some((timer.handle, timer.payload))
    }
}
