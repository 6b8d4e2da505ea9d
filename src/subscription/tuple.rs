use super::Subscription;

/// Two subscriptions torn down together, e.g. a source subscription and
/// the scheduled work an operator added on top of it.
pub struct TupleSubscription<U1, U2> {
  unsub1: U1,
  unsub2: U2,
}

impl<U1, U2> TupleSubscription<U1, U2> {
  pub fn new(unsub1: U1, unsub2: U2) -> Self { TupleSubscription { unsub1, unsub2 } }
}

impl<U1, U2> Subscription for TupleSubscription<U1, U2>
where
  U1: Subscription,
  U2: Subscription,
{
  fn unsubscribe(self) {
    self.unsub1.unsubscribe();
    self.unsub2.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.unsub1.is_closed() && self.unsub2.is_closed() }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::subscription::Teardown;

  #[test]
  fn closes_both() {
    let first = Teardown::new(|| {});
    let second = Teardown::new(|| {});
    let tuple = TupleSubscription::new(first.clone(), second.clone());
    assert!(!tuple.is_closed());

    tuple.unsubscribe();
    assert!(first.is_closed());
    assert!(second.is_closed());
  }

  #[test]
  fn closed_only_when_both_closed() {
    let first = Teardown::new(|| {});
    let tuple = TupleSubscription::new(first.clone(), ());
    assert!(!tuple.is_closed());
    first.unsubscribe();
    assert!(tuple.is_closed());
  }
}
