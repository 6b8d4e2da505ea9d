//! Scheduling of delayed work.
//!
//! The engine never sleeps on its own. Time-based factories and operators
//! (`interval`, `timer`, `delay`, delayed `retry`) receive a [`Scheduler`]
//! and ask it to run a callback later. Each request yields a [`TaskHandle`]
//! that works as the cancellation token: a cancelled task never runs.
//!
//! - [`TestScheduler`]: virtual time, advanced by hand; use it in tests.
//! - `LocalScheduler` (`futures-scheduler` + `timer` features): spawns onto
//!   a `futures` `LocalPool`.
//! - `TokioScheduler` (`tokio-scheduler` feature): `spawn_local` on the
//!   current tokio `LocalSet`.

use std::{cell::Cell, rc::Rc};

pub use std::time::Duration;

use crate::subscription::Subscription;

mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
mod local_scheduler;
#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
pub use local_scheduler::LocalScheduler;

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

pub trait Scheduler: Clone + 'static {
  /// Run `task` once `delay` has passed, unless the returned handle is
  /// cancelled first.
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static;

  fn cancel(&self, handle: &TaskHandle) { handle.cancel() }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskState {
  #[default]
  Pending,
  Cancelled,
  Finished,
}

/// Cancellation token of one scheduled task.
#[derive(Clone, Default)]
pub struct TaskHandle(Rc<Cell<TaskState>>);

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  pub fn state(&self) -> TaskState { self.0.get() }

  #[inline]
  pub fn is_pending(&self) -> bool { self.state() == TaskState::Pending }

  pub fn cancel(&self) {
    if self.is_pending() {
      self.0.set(TaskState::Cancelled);
    }
  }

  /// Run `task` if the handle is still pending, marking it finished first.
  ///
  /// Schedulers call this when the delay has elapsed; it is the one place a
  /// cancellation is observed.
  pub fn run(&self, task: impl FnOnce()) {
    if self.is_pending() {
      self.0.set(TaskState::Finished);
      task();
    }
  }
}

impl Subscription for TaskHandle {
  #[inline]
  fn unsubscribe(self) { self.cancel() }

  #[inline]
  fn is_closed(&self) -> bool { !self.is_pending() }
}
