//! Cooperative timer wheel for a single-threaded world.
//!
//! Repeating tasks fire every `interval` ms starting one interval after they
//! are registered, like an interval timer.  [`Scheduler::pop_due`] hands out
//! due tasks one at a time in due-time order (ties in registration order), so
//! the caller may register or cancel tasks between two firings.

use crate::clock::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    handle: TaskHandle,
    /// `None` for one-shot tasks.
    interval: Option<Millis>,
    due: Millis,
    task: T,
}

#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_handle: 0 }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, interval: Option<Millis>, due: Millis, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry { handle, interval, due, task });
        handle
    }

    /// Run `task` every `interval` ms (at least 1) from `now` on.
    pub fn every(&mut self, now: Millis, interval: Millis, task: T) -> TaskHandle {
        let interval = interval.max(1);
        self.push(Some(interval), now + interval, task)
    }

    /// Run `task` once, `delay` ms from `now`.
    pub fn after(&mut self, now: Millis, delay: Millis, task: T) -> TaskHandle {
        self.push(None, now + delay, task)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all<I: IntoIterator<Item = TaskHandle>>(&mut self, handles: I) -> usize {
        handles.into_iter().filter(|&h| self.cancel(h)).count()
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the earliest task due at or before `now`, returning its handle,
    /// the time it was due, and a copy of its payload.  Repeating tasks are
    /// rescheduled one interval later; one-shots are dropped.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TaskHandle, Millis, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[index];
        let fired = (entry.handle, entry.due, entry.task.clone());
        match entry.interval {
            Some(interval) => entry.due += interval,
            None => {
                self.entries.remove(index);
            }
        }
        Some(fired)
    }
}
