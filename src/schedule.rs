// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Clocks and the timer queue.
//!
//! Time is expressed as a [`Duration`] since the clock's origin. Timers are never cancelled:
//! once scheduled, a one-shot fires exactly once and a repeating timer fires forever.

use std::cell::Cell;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Monotonic time plus the wall-clock instant it corresponds to.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn elapsed(&self) -> Duration;

    /// Current wall-clock time.
    fn wall(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    wall_origin: DateTime<Utc>,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new(wall_origin: DateTime<Utc>) -> Self {
        Self { wall_origin, elapsed: Cell::new(Duration::ZERO) }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    fn wall(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.elapsed.get()).unwrap_or(chrono::Duration::MAX);
        self.wall_origin.checked_add_signed(elapsed).unwrap_or(self.wall_origin)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }

    fn wall(&self) -> DateTime<Utc> {
        (**self).wall()
    }
}

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    every: Option<Duration>,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline.cmp(&other.deadline).then(self.seq.cmp(&other.seq))
    }
}

/// Pending one-shot and repeating timers.
///
/// Due tasks come out in deadline order; tasks sharing a deadline come out in the order they
/// were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires `task` once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: Duration, delay: Duration, task: T) {
        self.push(now + delay, None, task);
    }

    /// Fires `task` every `interval`, first at `now + interval`.
    pub fn schedule_every(&mut self, now: Duration, interval: Duration, task: T) {
        let interval = interval.max(Duration::from_millis(1));
        self.push(now + interval, Some(interval), task);
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pops the earliest task whose deadline is at or before `now`.
    ///
    /// Repeating tasks are re-armed one interval after their previous deadline, so a late caller
    /// catches up tick by tick.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        if self.next_deadline()? > now {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        if let Some(every) = entry.every {
            self.push(entry.deadline + every, Some(every), entry.task.clone());
        }
        Some(entry.task)
    }

    /// Counts pending entries matching `predicate`.
    pub fn count_matching(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.heap.iter().filter(|Reverse(entry)| predicate(&entry.task)).count()
    }

    fn push(&mut self, deadline: Duration, every: Option<Duration>, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse(Entry { deadline, seq, every, task }));
    }
}
