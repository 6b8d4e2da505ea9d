//! Subscription handles returned by `subscribe`.
//!
//! A subscription owns the teardown of exactly one running stream.
//! `unsubscribe` consumes the handle; clones of shared handles (`Teardown`,
//! `SerialSubscription`, `Subscriber`) make repeated calls no-ops.

mod boxed;
mod dynamic;
mod serial;
mod teardown;
mod tuple;

pub use boxed::*;
pub use dynamic::*;
pub use serial::*;
pub use teardown::*;
pub use tuple::*;

pub trait Subscription {
  /// Stop the stream this handle belongs to and release its resources.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;

  /// Activates "RAII" behavior for this subscription: `unsubscribe` runs
  /// when the returned guard goes out of scope.
  #[inline]
  #[must_use]
  fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self>
  where
    Self: Sized,
  {
    SubscriptionGuard(Some(self))
  }
}

/// Nothing to tear down, e.g. a source that finished synchronously.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<U: Subscription> Subscription for Option<U> {
  fn unsubscribe(self) {
    if let Some(u) = self {
      u.unsubscribe()
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Subscription::is_closed) }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Give the subscription back without unsubscribing it.
  pub fn release(mut self) -> Option<T> { self.0.take() }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(u) = self.0.take() {
      u.unsubscribe()
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::{cell::Cell, rc::Rc};

  #[test]
  fn guard_unsubscribes_on_drop() {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    {
      let _guard = Teardown::new(move || c_hits.set(c_hits.get() + 1))
        .unsubscribe_when_dropped();
    }
    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn released_guard_keeps_subscription() {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let guard = Teardown::new(move || c_hits.set(c_hits.get() + 1))
      .unsubscribe_when_dropped();
    let teardown = guard.release();
    assert_eq!(hits.get(), 0);
    teardown.unsubscribe();
    assert_eq!(hits.get(), 1);
  }
}
