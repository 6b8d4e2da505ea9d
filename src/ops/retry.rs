//! Resubscribing to a failed source.
//!
//! `retry(count)` resubscribes right away; [`RetryConfig`] adds a delay
//! between attempts, driven by a [`Scheduler`], and can reset the budget
//! whenever a value gets through:
//!
//! ```rust
//! use rxlite::{ops::retry::RetryConfig, prelude::*};
//!
//! let scheduler = TestScheduler::new();
//! observable::throw_err::<i32, _>(RxError::source("offline"))
//!   .retry_with(RetryConfig::new(3).delay(Duration::from_secs(1), scheduler.clone()))
//!   .subscribe_err(|_| {}, |err| println!("{err}"));
//!
//! scheduler.advance_by(Duration::from_secs(3));
//! // gave up after 4 attempts, last error: source error: offline
//! ```

use crate::{
  error::ExhaustedRetryError,
  observable::{Observable, ObservableExt},
  observer::Observer,
  scheduler::{Duration, Scheduler, TaskHandle},
  subscription::{SerialSubscription, Subscription},
};

/// Decides whether a failed attempt is followed by another one, and when.
pub trait RetryPolicy: Clone + 'static {
  /// Whether to try again after `retries` retries already made.
  fn should_retry(&self, retries: usize) -> bool;

  /// Whether a value getting through resets the retry budget.
  fn reset_on_success(&self) -> bool { false }

  /// Start the next attempt, now or later. A deferred attempt returns the
  /// handle that cancels it.
  fn resubscribe(&self, attempt: impl FnOnce() + 'static) -> Option<TaskHandle> {
    attempt();
    None
  }
}

/// Plain retry budget, retrying immediately.
impl RetryPolicy for usize {
  #[inline]
  fn should_retry(&self, retries: usize) -> bool { retries < *self }
}

/// Builder for [`RetryPolicy`] with a budget, an optional delay between
/// attempts, and an optional budget reset on success.
///
/// `RetryConfig::new(count)` retries immediately; `.delay(duration,
/// scheduler)` turns it into a delayed policy.
#[derive(Clone, Debug)]
pub struct RetryConfig<SD = ()> {
  count: usize,
  delay: Duration,
  scheduler: SD,
  reset_on_success: bool,
}

impl RetryConfig {
  pub fn new(count: usize) -> Self {
    RetryConfig { count, delay: Duration::ZERO, scheduler: (), reset_on_success: false }
  }
}

impl<SD> RetryConfig<SD> {
  /// Wait `delay` on `scheduler` before each new attempt.
  pub fn delay<SD2: Scheduler>(self, delay: Duration, scheduler: SD2) -> RetryConfig<SD2> {
    RetryConfig { count: self.count, delay, scheduler, reset_on_success: self.reset_on_success }
  }

  pub fn reset_on_success(mut self) -> Self {
    self.reset_on_success = true;
    self
  }

  #[inline]
  pub fn count(&self) -> usize { self.count }
}

impl RetryPolicy for RetryConfig<()> {
  #[inline]
  fn should_retry(&self, retries: usize) -> bool { retries < self.count }

  #[inline]
  fn reset_on_success(&self) -> bool { self.reset_on_success }
}

impl<SD: Scheduler> RetryPolicy for RetryConfig<SD> {
  #[inline]
  fn should_retry(&self, retries: usize) -> bool { retries < self.count }

  #[inline]
  fn reset_on_success(&self) -> bool { self.reset_on_success }

  fn resubscribe(&self, attempt: impl FnOnce() + 'static) -> Option<TaskHandle> {
    Some(self.scheduler.schedule(self.delay, attempt))
  }
}

#[derive(Clone)]
pub struct RetryOp<S, P> {
  source: S,
  policy: P,
}

impl<S, P> RetryOp<S, P> {
  #[inline]
  pub(crate) fn new(source: S, policy: P) -> Self { RetryOp { source, policy } }
}

impl<Item, Err, O, S, P> Observable<Item, ExhaustedRetryError<Err>, O> for RetryOp<S, P>
where
  O: Observer<Item, ExhaustedRetryError<Err>> + 'static,
  S: Observable<Item, Err, RetryObserver<S, P, O>> + Clone + 'static,
  S::Unsub: 'static,
  P: RetryPolicy,
{
  type Unsub = SerialSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let serial = SerialSubscription::default();
    subscribe_attempt::<Item, Err, S, P, O>(RetryObserver {
      source: self.source,
      policy: self.policy,
      observer,
      retries: 0,
      generation: 0,
      serial: serial.clone(),
      subscribe_fn: subscribe_attempt::<Item, Err, S, P, O>,
    });
    serial
  }
}

impl<Item, Err, S, P> ObservableExt<Item, ExhaustedRetryError<Err>> for RetryOp<S, P> where
  S: ObservableExt<Item, Err>
{
}

fn subscribe_attempt<Item, Err, S, P, O>(observer: RetryObserver<S, P, O>)
where
  O: Observer<Item, ExhaustedRetryError<Err>> + 'static,
  S: Observable<Item, Err, RetryObserver<S, P, O>> + Clone + 'static,
  S::Unsub: 'static,
  P: RetryPolicy,
{
  let generation = observer.generation;
  let serial = observer.serial.clone();
  let unsub = observer.source.clone().actual_subscribe(observer);
  serial.install(generation, unsub);
}

pub struct RetryObserver<S, P, O> {
  source: S,
  policy: P,
  observer: O,
  retries: usize,
  // bumps on every attempt, keeps `serial` on the newest one
  generation: usize,
  serial: SerialSubscription,
  // a plain fn pointer keeps the resubscribe bounds off the `Observer` impl,
  // which would otherwise require itself
  subscribe_fn: fn(Self),
}

impl<Item, Err, S, P, O> Observer<Item, Err> for RetryObserver<S, P, O>
where
  O: Observer<Item, ExhaustedRetryError<Err>> + 'static,
  S: 'static,
  P: RetryPolicy,
{
  fn next(&mut self, value: Item) {
    if self.policy.reset_on_success() {
      self.retries = 0;
    }
    self.observer.next(value);
  }

  fn error(mut self, err: Err) {
    if self.serial.is_closed() {
      return;
    }
    if !self.policy.should_retry(self.retries) {
      let attempts = self.retries + 1;
      self.observer.error(ExhaustedRetryError { attempts, last: err });
      return;
    }

    self.retries += 1;
    self.generation += 1;
    log::debug!("retry: attempt {} failed, resubscribing", self.retries);
    let (serial, generation) = (self.serial.clone(), self.generation);
    let policy = self.policy.clone();
    let subscribe = self.subscribe_fn;
    // a scheduler may run the attempt before returning its handle
    if let Some(handle) = policy.resubscribe(move || subscribe(self)).filter(TaskHandle::is_pending) {
      serial.install(generation, handle);
    }
  }

  #[inline]
  fn complete(self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.serial.is_closed() || self.observer.is_finished() }
}
