use super::{Duration, Scheduler, TaskHandle};

/// Runs tasks with `tokio::task::spawn_local`.
///
/// Must be used from inside a `tokio::task::LocalSet`, since the engine is
/// single-threaded and its tasks are not `Send`.
#[derive(Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    let c_handle = handle.clone();
    tokio::task::spawn_local(async move {
      if !delay.is_zero() {
        tokio::time::sleep(delay).await;
      }
      c_handle.run(task);
    });
    handle
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[tokio::test(flavor = "current_thread")]
  async fn interval_on_local_set() {
    let local = tokio::task::LocalSet::new();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    local
      .run_until(async move {
        observable::interval(Duration::from_millis(1), TokioScheduler)
          .take(3)
          .subscribe(move |v| c_seen.borrow_mut().push(v));
        tokio::time::sleep(Duration::from_millis(50)).await;
      })
      .await;
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
  }
}
