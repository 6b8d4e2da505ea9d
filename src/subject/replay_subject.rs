use std::collections::VecDeque;

use super::{Subject, SubjectSubscription};
use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
};

/// A subject that remembers the last `capacity` values and replays them, in
/// order, to every new subscriber before any live value.
///
/// Replay only happens while the subject is active; after a terminal event
/// late subscribers get just that event.
pub struct ReplaySubject<Item, Err> {
  subject: Subject<Item, Err>,
  buffer: MutRc<ReplayBuffer<Item>>,
}

struct ReplayBuffer<Item> {
  capacity: usize,
  values: VecDeque<Item>,
}

impl<Item, Err> Clone for ReplaySubject<Item, Err> {
  fn clone(&self) -> Self { ReplaySubject { subject: self.subject.clone(), buffer: self.buffer.clone() } }
}

impl<Item, Err> ReplaySubject<Item, Err> {
  pub fn new(capacity: usize) -> Self {
    ReplaySubject {
      subject: Subject::new(),
      buffer: MutRc::own(ReplayBuffer { capacity, values: VecDeque::with_capacity(capacity) }),
    }
  }

  pub fn capacity(&self) -> usize { self.buffer.rc_deref().capacity }

  /// Number of values currently held for replay.
  pub fn buffered(&self) -> usize { self.buffer.rc_deref().values.len() }

  pub fn observer_count(&self) -> usize { self.subject.observer_count() }
}

impl<Item, Err> Observer<Item, Err> for ReplaySubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn next(&mut self, value: Item) {
    if !self.subject.is_active() {
      return;
    }
    {
      let mut buffer = self.buffer.rc_deref_mut();
      if buffer.capacity > 0 {
        if buffer.values.len() == buffer.capacity {
          buffer.values.pop_front();
        }
        buffer.values.push_back(value.clone());
      }
    }
    self.subject.next(value);
  }

  #[inline]
  fn error(self, err: Err) { self.subject.error(err) }

  #[inline]
  fn complete(self) { Observer::<Item, Err>::complete(self.subject) }

  #[inline]
  fn is_finished(&self) -> bool { !self.subject.is_active() }
}

impl<Item, Err, O> Observable<Item, Err, O> for ReplaySubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let buffer = self.buffer;
    self.subject.register(observer, move |subscriber| {
      let replay: Vec<Item> = buffer.rc_deref().values.iter().cloned().collect();
      for value in replay {
        if Observer::<Item, Err>::is_finished(subscriber) {
          break;
        }
        Observer::<Item, Err>::next(subscriber, value);
      }
    })
  }
}

impl<Item, Err> ObservableExt<Item, Err> for ReplaySubject<Item, Err> {}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn late_subscriber_gets_last_n_then_live() {
    let mut subject = ReplaySubject::<i32, ()>::new(2);
    for v in 1..=5 {
      subject.next(v);
    }
    assert_eq!(subject.buffered(), 2);

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.clone().subscribe_err(move |v| c_seen.borrow_mut().push(v), |_| {});
    subject.next(6);
    assert_eq!(*seen.borrow(), vec![4, 5, 6]);
  }

  #[test]
  fn fewer_values_than_capacity() {
    let mut subject = ReplaySubject::<&str, ()>::new(10);
    subject.next("a");
    subject.next("b");

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.clone().subscribe_err(move |v| c_seen.borrow_mut().push(v), |_| {});
    assert_eq!(*seen.borrow(), vec!["a", "b"]);
  }

  #[test]
  fn zero_capacity_replays_nothing() {
    let mut subject = ReplaySubject::<i32, ()>::new(0);
    subject.next(1);
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.clone().subscribe_err(move |v| c_seen.borrow_mut().push(v), |_| {});
    subject.next(2);
    assert_eq!(*seen.borrow(), vec![2]);
  }

  #[test]
  fn no_replay_after_completion() {
    let mut subject = ReplaySubject::<i32, ()>::new(3);
    subject.next(1);
    subject.clone().complete();

    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    subject.clone().subscribe_all(
      move |v| l1.borrow_mut().push(v.to_string()),
      |_| {},
      move || l2.borrow_mut().push("complete".to_owned()),
    );
    assert_eq!(*log.borrow(), vec!["complete"]);
  }

  #[test]
  fn replay_stops_when_subscriber_is_done() {
    let mut subject = ReplaySubject::<i32, ()>::new(5);
    (1..=5).for_each(|v| subject.next(v));

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.clone().take(2).subscribe_err(move |v| c_seen.borrow_mut().push(v), |_| {});
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(subject.observer_count(), 0);
  }
}
