use super::Subscription;

/// Helper trait for calling unsubscribe on boxed trait objects
///
/// `Subscription::unsubscribe(self)` requires `Sized`, so a
/// `Box<dyn Subscription>` goes through this instead.
pub trait BoxedSubscriptionInner {
  fn boxed_unsubscribe(self: Box<Self>);
  fn boxed_is_closed(&self) -> bool;
}

impl<T: Subscription> BoxedSubscriptionInner for T {
  #[inline]
  fn boxed_unsubscribe(self: Box<Self>) { (*self).unsubscribe() }

  #[inline]
  fn boxed_is_closed(&self) -> bool { self.is_closed() }
}

/// A type-erased subscription.
///
/// Returned by the `subscribe` family and stored by operators juggling
/// subscriptions of different concrete types (inner streams, retries,
/// fallbacks).
pub struct BoxSubscription(Box<dyn BoxedSubscriptionInner>);

impl BoxSubscription {
  pub fn new(subscription: impl Subscription + 'static) -> Self {
    BoxSubscription(Box::new(subscription))
  }
}

impl Subscription for BoxSubscription {
  #[inline]
  fn unsubscribe(self) { self.0.boxed_unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.boxed_is_closed() }
}
