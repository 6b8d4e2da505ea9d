//! Virtual time scheduler for deterministic tests of time-based operators.
//!
//! Time only moves when the test says so:
//!
//! ```rust
//! use rxlite::prelude::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let scheduler = TestScheduler::new();
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! observable::of(42)
//!   .delay(Duration::from_millis(100), scheduler.clone())
//!   .subscribe(move |v| c_seen.borrow_mut().push(v));
//!
//! scheduler.advance_by(Duration::from_millis(99));
//! assert!(seen.borrow().is_empty());
//! scheduler.advance_by(Duration::from_millis(1));
//! assert_eq!(*seen.borrow(), vec![42]);
//! ```
//!
//! Clones share one clock and one queue. Tasks due at the same instant run
//! in the order they were scheduled.

use std::{cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Scheduler, TaskHandle};
use crate::rc::{MutRc, RcDeref, RcDerefMut};

#[derive(Default)]
struct TestSchedulerState {
  now: Duration,
  queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

struct ScheduledTask {
  at: Duration,
  task_id: usize,
  task: Box<dyn FnOnce()>,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool { self.at == other.at && self.task_id == other.task_id }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .at
      .cmp(&self.at)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

#[derive(Clone, Default)]
pub struct TestScheduler(MutRc<TestSchedulerState>);

impl TestScheduler {
  pub fn new() -> Self { Self::default() }

  /// Current virtual time, starting at zero.
  pub fn now(&self) -> Duration { self.0.rc_deref().now }

  /// Tasks still waiting to run, cancelled ones excluded.
  pub fn pending_count(&self) -> usize {
    self
      .0
      .rc_deref()
      .queue
      .iter()
      .filter(|t| t.handle.is_pending())
      .count()
  }

  /// Move the clock forward by `duration`, running every task that falls
  /// due on the way, each at its own instant.
  pub fn advance_by(&self, duration: Duration) {
    let target = self.now() + duration;
    self.run_until(Some(target));
    self.0.rc_deref_mut().now = target;
  }

  /// Run tasks until the queue is empty, moving the clock to each task.
  ///
  /// A stream that reschedules forever (an `interval` nobody stops) makes
  /// this loop forever too; use `advance_by` for those.
  pub fn flush(&self) { self.run_until(None); }

  fn run_until(&self, limit: Option<Duration>) {
    let mut ran = 0usize;
    while let Some(task) = self.pop_due(limit) {
      task.handle.run(task.task);
      ran += 1;
    }
    if ran > 0 {
      log::debug!("test scheduler ran {} task(s), now at {:?}", ran, self.now());
    }
  }

  fn pop_due(&self, limit: Option<Duration>) -> Option<ScheduledTask> {
    let mut state = self.0.rc_deref_mut();
    let due = state
      .queue
      .peek()
      .map_or(false, |t| limit.map_or(true, |limit| t.at <= limit));
    if !due {
      return None;
    }
    let task = state.queue.pop()?;
    if task.at > state.now {
      state.now = task.at;
    }
    Some(task)
  }
}

impl Scheduler for TestScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let mut state = self.0.rc_deref_mut();
    let handle = TaskHandle::new();
    let task_id = state.next_task_id;
    state.next_task_id += 1;
    let at = state.now + delay;
    state.queue.push(ScheduledTask {
      at,
      task_id,
      task: Box::new(task),
      handle: handle.clone(),
    });
    handle
  }
}
