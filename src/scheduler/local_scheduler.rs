use futures::{executor::LocalSpawner, task::LocalSpawnExt};

use super::{Duration, Scheduler, TaskHandle};

/// Runs tasks on a `futures` `LocalPool`, sleeping with `futures-time`.
///
/// ```rust
/// use futures::executor::LocalPool;
/// use rxlite::prelude::*;
///
/// let mut pool = LocalPool::new();
/// let scheduler = LocalScheduler::new(pool.spawner());
/// observable::timer(7, Duration::from_millis(1), scheduler)
///   .subscribe(|v| assert_eq!(v, 7));
/// pool.run();
/// ```
#[derive(Clone)]
pub struct LocalScheduler(LocalSpawner);

impl LocalScheduler {
  pub fn new(spawner: LocalSpawner) -> Self { LocalScheduler(spawner) }
}

impl Scheduler for LocalScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    let c_handle = handle.clone();
    let fut = async move {
      if !delay.is_zero() {
        futures_time::task::sleep(delay.into()).await;
      }
      c_handle.run(task);
    };
    if let Err(err) = self.0.spawn_local(fut) {
      log::warn!("local scheduler rejected a task: {}", err);
      handle.cancel();
    }
    handle
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use futures::executor::LocalPool;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn runs_scheduled_task() {
    let mut pool = LocalPool::new();
    let scheduler = LocalScheduler::new(pool.spawner());
    let hits = Rc::new(RefCell::new(vec![]));
    let (h1, h2) = (hits.clone(), hits.clone());
    scheduler.schedule(Duration::from_millis(5), move || h1.borrow_mut().push("late"));
    scheduler.schedule(Duration::ZERO, move || h2.borrow_mut().push("now"));
    pool.run();
    assert_eq!(*hits.borrow(), vec!["now", "late"]);
  }

  #[test]
  fn cancelled_before_run() {
    let mut pool = LocalPool::new();
    let scheduler = LocalScheduler::new(pool.spawner());
    let hit = Rc::new(RefCell::new(false));
    let c_hit = hit.clone();
    let handle = scheduler.schedule(Duration::from_millis(1), move || *c_hit.borrow_mut() = true);
    scheduler.cancel(&handle);
    pool.run();
    assert!(!*hit.borrow());
  }
}
