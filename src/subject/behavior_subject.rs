use super::{Subject, SubjectSubscription};
use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
};

/// A subject that always has a current value.
///
/// Seeded at construction, updated by every `next`, and handed to each new
/// subscriber before live values.
pub struct BehaviorSubject<Item, Err> {
  subject: Subject<Item, Err>,
  value: MutRc<Item>,
}

impl<Item, Err> Clone for BehaviorSubject<Item, Err> {
  fn clone(&self) -> Self { BehaviorSubject { subject: self.subject.clone(), value: self.value.clone() } }
}

impl<Item, Err> BehaviorSubject<Item, Err> {
  #[inline]
  pub fn new(value: Item) -> Self { Self { subject: Subject::new(), value: MutRc::own(value) } }

  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    self.value.rc_deref().clone()
  }

  pub fn observer_count(&self) -> usize { self.subject.observer_count() }
}

impl<Item, Err> Observer<Item, Err> for BehaviorSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn next(&mut self, value: Item) {
    if !self.subject.is_active() {
      return;
    }
    *self.value.rc_deref_mut() = value.clone();
    self.subject.next(value);
  }

  #[inline]
  fn error(self, err: Err) { self.subject.error(err) }

  #[inline]
  fn complete(self) { Observer::<Item, Err>::complete(self.subject) }

  #[inline]
  fn is_finished(&self) -> bool { !self.subject.is_active() }
}

impl<Item, Err, O> Observable<Item, Err, O> for BehaviorSubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let current = self.value.rc_deref().clone();
    self
      .subject
      .register(observer, move |subscriber| Observer::<Item, Err>::next(subscriber, current))
  }
}

impl<Item, Err> ObservableExt<Item, Err> for BehaviorSubject<Item, Err> {}
