use smallvec::SmallVec;

use crate::{
  observer::{BoxObserver, Observer},
  subscriber::Subscriber,
  subscription::{DynamicSubscriptions, Subscription},
};

pub(crate) type SubjectObserver<Item, Err> = Subscriber<BoxObserver<Item, Err>>;

/// Observers registered on a subject, in registration order.
///
/// Broadcasting works on a snapshot taken under the borrow and delivered
/// after it is released, so observers may subscribe, unsubscribe or feed the
/// subject again from inside a callback.
pub(crate) struct Subscribers<Item, Err> {
  inner: DynamicSubscriptions<SubjectObserver<Item, Err>>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Self { inner: DynamicSubscriptions::default() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  #[inline]
  pub fn add(&mut self, observer: SubjectObserver<Item, Err>) -> usize { self.inner.add(observer) }

  #[inline]
  pub fn remove(&mut self, id: usize) -> Option<SubjectObserver<Item, Err>> { self.inner.remove(id) }

  #[inline]
  pub fn len(&self) -> usize { self.inner.len() }

  #[inline]
  pub fn take_all(&mut self) -> SmallVec<[SubjectObserver<Item, Err>; 2]> { self.inner.take_all() }
}

impl<Item: 'static, Err: 'static> Subscribers<Item, Err> {
  /// Drop observers that were unsubscribed or whose pipeline already ended
  /// on its own, e.g. behind a `take` that saw enough.
  pub fn prune(&mut self) {
    self
      .inner
      .retain(|observer| !observer.is_closed() && !Observer::<Item, Err>::is_finished(observer));
  }

  /// Clones of the live observers.
  pub fn snapshot(&mut self) -> SmallVec<[SubjectObserver<Item, Err>; 2]> {
    self.prune();
    self.inner.iter().cloned().collect()
  }
}

/// Deliver `value` to each observer, moving it into the last one.
pub(crate) fn broadcast_value<Item, Err>(
  observers: SmallVec<[SubjectObserver<Item, Err>; 2]>,
  value: Item,
) where
  Item: Clone + 'static,
  Err: 'static,
{
  let mut iter = observers.into_iter().peekable();
  while let Some(mut observer) = iter.next() {
    if iter.peek().is_some() {
      Observer::<Item, Err>::next(&mut observer, value.clone());
    } else {
      Observer::<Item, Err>::next(&mut observer, value);
      break;
    }
  }
}

pub(crate) fn broadcast_error<Item, Err>(
  observers: SmallVec<[SubjectObserver<Item, Err>; 2]>,
  err: Err,
) where
  Item: 'static,
  Err: Clone + 'static,
{
  let mut iter = observers.into_iter().peekable();
  while let Some(observer) = iter.next() {
    if iter.peek().is_some() {
      Observer::<Item, Err>::error(observer, err.clone());
    } else {
      Observer::<Item, Err>::error(observer, err);
      break;
    }
  }
}

pub(crate) fn broadcast_complete<Item, Err>(observers: SmallVec<[SubjectObserver<Item, Err>; 2]>)
where
  Item: 'static,
  Err: 'static,
{
  for observer in observers {
    Observer::<Item, Err>::complete(observer);
  }
}
