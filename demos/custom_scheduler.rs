//! Example: plugging in your own scheduler
//!
//! Every time-based operator takes its scheduler as an argument, so any type
//! implementing `Scheduler` can drive it. This one logs each request and
//! runs it on the spot, blocking the thread for the delay.

use std::time::Duration;

use rxlite::prelude::*;

#[derive(Clone, Default)]
pub struct VerboseScheduler;

impl Scheduler for VerboseScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    println!("[VerboseScheduler] task requested, delay {:?} (blocking thread...)", delay);
    std::thread::sleep(delay);
    let handle = TaskHandle::new();
    handle.run(task);
    println!("[VerboseScheduler] task finished");
    handle
  }
}

fn main() {
  println!("--- Starting Custom Scheduler Example ---");

  observable::of(10)
    .map(|v| v * 2)
    .delay(Duration::from_millis(500), VerboseScheduler)
    .subscribe(|v| println!("Consumer received value: {}", v));

  observable::from_iter(1..=3)
    .map_err(|e| match e {})
    .try_map(|v| if v < 3 { Ok(v) } else { Err(RxError::operator("too big")) })
    .retry_with(RetryConfig::new(1).delay(Duration::from_millis(100), VerboseScheduler))
    .subscribe_err(
      |v| println!("Consumer received value: {}", v),
      |e| println!("Consumer gave up: {}", e),
    );

  println!("--- Example Finished ---");
}
