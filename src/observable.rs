//! The `Observable` traits and the source factories.
//!
//! [`Observable`] is the subscription contract: given a concrete observer,
//! start producing into it and return the handle that stops it.
//! [`ObservableExt`] carries every operator and the `subscribe` family, so a
//! pipeline is written as a method chain:
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! observable::from_iter(1..=4)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 10)
//!   .subscribe(|v| println!("{v}"));
//! ```
//!
//! Nothing runs before `subscribe`; every subscription runs the source again
//! from scratch unless a subject sits in between. Callbacks handed to the
//! `subscribe` family are `'static`: share state with them through
//! `Rc<RefCell<_>>` rather than borrowing locals.

use std::fmt::Debug;

use crate::{
  observer::{log_unhandled, noop, BoxObserver, Observer, ObserverAll},
  ops::{
    catch_error::CatchErrorOp,
    delay::DelayOp,
    exhaust_all::ExhaustAllOp,
    filter::FilterOp,
    group_by::GroupByOp,
    map::MapOp,
    map_err::MapErrOp,
    merge_all::MergeAllOp,
    reduce::ReduceOp,
    retry::{RetryOp, RetryPolicy},
    scan::ScanOp,
    switch_all::SwitchAllOp,
    take::TakeOp,
    tap::TapOp,
    try_map::TryMapOp,
  },
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
  subscription::{BoxSubscription, Subscription},
};

mod boxed;
mod create;
mod from_iter;
mod interval;
mod of;
mod timer;
mod trivial;

pub use boxed::*;
pub use create::*;
pub use from_iter::*;
pub use interval::*;
pub use of::*;
pub use timer::*;
pub use trivial::*;

pub trait Observable<Item, Err, O>
where
  O: Observer<Item, Err>,
{
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// Sink built by `subscribe`.
pub type NextSink<N, Err> = Subscriber<ObserverAll<N, fn(Err), fn()>>;
/// Sink built by `subscribe_err`.
pub type NextErrSink<N, E> = Subscriber<ObserverAll<N, E, fn()>>;
/// Sink built by `subscribe_all`.
pub type AllSink<N, E, C> = Subscriber<ObserverAll<N, E, C>>;

pub trait ObservableExt<Item, Err>: Sized {
  /// Apply `f` to every value.
  #[inline]
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp::new(self, f)
  }

  /// Like `map`, but an `Err` returned by `f` ends the stream with that
  /// error and stops the upstream.
  #[inline]
  fn try_map<B, F>(self, f: F) -> TryMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> Result<B, Err>,
  {
    TryMapOp::new(self, f)
  }

  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp::new(self, filter)
  }

  /// Emit the first `count` values, then complete and stop the upstream.
  #[inline]
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp::new(self, count) }

  /// Observe each value without changing the stream.
  #[inline]
  fn tap<F>(self, f: F) -> TapOp<Self, F>
  where
    F: FnMut(&Item),
  {
    TapOp::new(self, f)
  }

  #[inline]
  fn map_err<E2, F>(self, f: F) -> MapErrOp<Self, F, Err>
  where
    F: FnOnce(Err) -> E2,
  {
    MapErrOp::new(self, f)
  }

  /// Running fold seeded with the first value, which is emitted unchanged;
  /// emits the accumulator after every later value.
  #[inline]
  fn scan<F>(self, binary_op: F) -> ScanOp<Self, F, Item, Item>
  where
    Item: Clone,
    F: FnMut(Item, Item) -> Item,
  {
    ScanOp::seeded_by_first(self, binary_op)
  }

  #[inline]
  fn scan_initial<B, F>(self, initial: B, binary_op: F) -> ScanOp<Self, F, Item, B>
  where
    B: Clone,
    F: FnMut(B, Item) -> B,
  {
    ScanOp::new(self, initial, binary_op)
  }

  /// Fold everything, seeded with the first value, emitting only the final
  /// accumulator on completion. An empty source just completes.
  #[inline]
  fn reduce<F>(self, binary_op: F) -> ReduceOp<Self, F, Item, Item>
  where
    F: FnMut(Item, Item) -> Item,
  {
    ReduceOp::seeded_by_first(self, binary_op)
  }

  #[inline]
  fn reduce_initial<B, F>(self, initial: B, binary_op: F) -> ReduceOp<Self, F, Item, B>
  where
    F: FnMut(B, Item) -> B,
  {
    ReduceOp::new(self, initial, binary_op)
  }

  /// Shift every value and the completion later by `delay`. Errors are not
  /// delayed.
  #[inline]
  fn delay<SD>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD>
  where
    SD: Scheduler,
  {
    DelayOp::new(self, delay, scheduler)
  }

  /// Split the stream into one `GroupObservable` per distinct key.
  #[inline]
  fn group_by<Key, F>(self, key: F) -> GroupByOp<Self, F>
  where
    F: FnMut(&Item) -> Key,
  {
    GroupByOp::new(self, key)
  }

  /// Flatten a stream of observables, running at most `concurrent` inner
  /// streams at once and queueing the rest. `usize::MAX` means unbounded.
  #[inline]
  fn merge_all(self, concurrent: usize) -> MergeAllOp<Self, Item> {
    MergeAllOp::new(self, concurrent)
  }

  /// Flatten one inner stream at a time, in arrival order.
  #[inline]
  fn concat_all(self) -> MergeAllOp<Self, Item> { MergeAllOp::new(self, 1) }

  /// Flatten, dropping the running inner stream whenever a new one arrives.
  #[inline]
  fn switch_all(self) -> SwitchAllOp<Self, Item> { SwitchAllOp::new(self) }

  /// Flatten, ignoring inner streams that arrive while one is running.
  #[inline]
  fn exhaust_all(self) -> ExhaustAllOp<Self, Item> { ExhaustAllOp::new(self) }

  #[inline]
  fn merge_map<B, F>(self, f: F) -> MergeAllOp<MapOp<Self, F, Item>, B>
  where
    F: FnMut(Item) -> B,
  {
    MergeAllOp::new(MapOp::new(self, f), usize::MAX)
  }

  #[inline]
  fn concat_map<B, F>(self, f: F) -> MergeAllOp<MapOp<Self, F, Item>, B>
  where
    F: FnMut(Item) -> B,
  {
    MergeAllOp::new(MapOp::new(self, f), 1)
  }

  #[inline]
  fn switch_map<B, F>(self, f: F) -> SwitchAllOp<MapOp<Self, F, Item>, B>
  where
    F: FnMut(Item) -> B,
  {
    SwitchAllOp::new(MapOp::new(self, f))
  }

  #[inline]
  fn exhaust_map<B, F>(self, f: F) -> ExhaustAllOp<MapOp<Self, F, Item>, B>
  where
    F: FnMut(Item) -> B,
  {
    ExhaustAllOp::new(MapOp::new(self, f))
  }

  /// On error, continue with the observable returned by `handler`.
  #[inline]
  fn catch_error<F, R>(self, handler: F) -> CatchErrorOp<Self, F, Err>
  where
    F: FnOnce(Err) -> R,
  {
    CatchErrorOp::new(self, handler)
  }

  /// Resubscribe up to `count` more times on error, immediately. The error
  /// after the last attempt arrives as
  /// [`ExhaustedRetryError`](crate::error::ExhaustedRetryError).
  #[inline]
  fn retry(self, count: usize) -> RetryOp<Self, usize>
  where
    Self: Clone,
  {
    RetryOp::new(self, count)
  }

  /// `retry` driven by a policy, e.g. a
  /// [`RetryConfig`](crate::ops::retry::RetryConfig) with a delay.
  #[inline]
  fn retry_with<P>(self, policy: P) -> RetryOp<Self, P>
  where
    Self: Clone,
    P: RetryPolicy,
  {
    RetryOp::new(self, policy)
  }

  /// Erase the concrete type, e.g. to return different observables from
  /// the branches of a `merge_map` closure.
  #[inline]
  fn box_it(self) -> BoxObservable<Item, Err>
  where
    Self: Observable<Item, Err, BoxObserver<Item, Err>> + 'static,
    <Self as Observable<Item, Err, BoxObserver<Item, Err>>>::Unsub: 'static,
    Item: 'static,
    Err: 'static,
  {
    BoxObservable::new(self)
  }

  /// Apply a reusable pipeline fragment.
  #[inline]
  fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R { f(self) }

  /// Subscribe with a value callback. An error is logged through the `log`
  /// facade, since nobody else will see it.
  fn subscribe<N>(self, next: N) -> BoxSubscription
  where
    N: FnMut(Item) + 'static,
    Item: 'static,
    Err: Debug + 'static,
    Self: Observable<Item, Err, NextSink<N, Err>>,
    <Self as Observable<Item, Err, NextSink<N, Err>>>::Unsub: 'static,
  {
    let error: fn(Err) = log_unhandled::<Err>;
    let complete: fn() = noop;
    subscribe_sink(self, ObserverAll::new(next, error, complete))
  }

  /// Subscribe with value and error callbacks; at most one of `error` or a
  /// silent completion ends the subscription.
  fn subscribe_err<N, E>(self, next: N, error: E) -> BoxSubscription
  where
    N: FnMut(Item) + 'static,
    E: FnOnce(Err) + 'static,
    Item: 'static,
    Err: 'static,
    Self: Observable<Item, Err, NextErrSink<N, E>>,
    <Self as Observable<Item, Err, NextErrSink<N, E>>>::Unsub: 'static,
  {
    let complete: fn() = noop;
    subscribe_sink(self, ObserverAll::new(next, error, complete))
  }

  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> BoxSubscription
  where
    N: FnMut(Item) + 'static,
    E: FnOnce(Err) + 'static,
    C: FnOnce() + 'static,
    Item: 'static,
    Err: 'static,
    Self: Observable<Item, Err, AllSink<N, E, C>>,
    <Self as Observable<Item, Err, AllSink<N, E, C>>>::Unsub: 'static,
  {
    subscribe_sink(self, ObserverAll::new(next, error, complete))
  }
}

fn subscribe_sink<S, Item, Err, O>(source: S, observer: O) -> BoxSubscription
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: 'static,
  S: Observable<Item, Err, Subscriber<O>>,
  S::Unsub: 'static,
{
  let subscriber = Subscriber::new(observer);
  let unsub = source.actual_subscribe(subscriber.clone());
  BoxSubscription::new(crate::subscription::TupleSubscription::new(subscriber, unsub))
}
