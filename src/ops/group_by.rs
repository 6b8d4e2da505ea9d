use std::{collections::HashMap, hash::Hash};

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  subject::{Subject, SubjectSubscription},
};

/// One keyed sub-stream emitted by `group_by`.
///
/// It is hot: values reach only the observers subscribed at the time they
/// arrive. `group_by` emits the group before pushing the first value into
/// it, so subscribing from the downstream `next` sees every value.
pub struct GroupObservable<Key, Item, Err> {
  key: Key,
  subject: Subject<Item, Err>,
}

impl<Key: Clone, Item, Err> Clone for GroupObservable<Key, Item, Err> {
  fn clone(&self) -> Self { GroupObservable { key: self.key.clone(), subject: self.subject.clone() } }
}

impl<Key, Item, Err> GroupObservable<Key, Item, Err> {
  #[inline]
  pub fn key(&self) -> &Key { &self.key }
}

impl<Key, Item, Err, O> Observable<Item, Err, O> for GroupObservable<Key, Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  #[inline]
  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.subject.actual_subscribe(observer) }
}

impl<Key, Item, Err> ObservableExt<Item, Err> for GroupObservable<Key, Item, Err> {}

#[derive(Clone)]
pub struct GroupByOp<S, F> {
  source: S,
  key: F,
}

impl<S, F> GroupByOp<S, F> {
  #[inline]
  pub(crate) fn new(source: S, key: F) -> Self { GroupByOp { source, key } }
}

impl<Key, Item, Err, O, S, F> Observable<GroupObservable<Key, Item, Err>, Err, O> for GroupByOp<S, F>
where
  O: Observer<GroupObservable<Key, Item, Err>, Err>,
  S: Observable<Item, Err, GroupByObserver<O, F, Key, Item, Err>>,
  F: FnMut(&Item) -> Key,
  Key: Hash + Eq + Clone,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(GroupByObserver {
      observer,
      key: self.key,
      groups: HashMap::new(),
      order: Vec::new(),
    })
  }
}

impl<Key, Item, Err, S, F> ObservableExt<GroupObservable<Key, Item, Err>, Err> for GroupByOp<S, F>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(&Item) -> Key,
{
}

pub struct GroupByObserver<O, F, Key, Item, Err> {
  observer: O,
  key: F,
  groups: HashMap<Key, Subject<Item, Err>>,
  // first-seen order, so terminal events reach the groups deterministically
  order: Vec<Subject<Item, Err>>,
}

impl<O, F, Key, Item, Err> Observer<Item, Err> for GroupByObserver<O, F, Key, Item, Err>
where
  O: Observer<GroupObservable<Key, Item, Err>, Err>,
  F: FnMut(&Item) -> Key,
  Key: Hash + Eq + Clone,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn next(&mut self, value: Item) {
    let key = (self.key)(&value);
    let mut group = match self.groups.get(&key) {
      Some(group) => group.clone(),
      None => {
        let group = Subject::new();
        self.groups.insert(key.clone(), group.clone());
        self.order.push(group.clone());
        log::trace!("group_by: new group, {} groups open", self.order.len());
        self.observer.next(GroupObservable { key, subject: group.clone() });
        group
      }
    };
    group.next(value);
  }

  fn error(self, err: Err) {
    for group in self.order {
      group.error(err.clone());
    }
    self.observer.error(err)
  }

  fn complete(self) {
    for group in self.order {
      Observer::<Item, Err>::complete(group);
    }
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn split_by_parity() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::from_iter(0..6)
      .group_by(|v: &i32| v % 2 == 0)
      .subscribe(move |group| {
        let even = *group.key();
        let log = c_log.clone();
        group.subscribe(move |v| log.borrow_mut().push((even, v)));
      });

    assert_eq!(
      *log.borrow(),
      vec![(true, 0), (false, 1), (true, 2), (false, 3), (true, 4), (false, 5)]
    );
  }

  #[test]
  fn groups_in_first_seen_order() {
    let keys = Rc::new(RefCell::new(vec![]));
    let c_keys = keys.clone();
    observable::from_iter(vec!["b1", "a1", "b2", "c1", "a2"])
      .group_by(|v: &&str| v.chars().next())
      .subscribe(move |group| c_keys.borrow_mut().push(*group.key()));
    assert_eq!(*keys.borrow(), vec![Some('b'), Some('a'), Some('c')]);
  }

  #[test]
  fn completion_reaches_groups_before_downstream() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_log, d_log) = (log.clone(), log.clone());
    observable::from_iter(vec![1, 2, 1])
      .group_by(|v: &i32| *v)
      .subscribe_all(
        move |group| {
          let key = *group.key();
          let log = c_log.clone();
          group.subscribe_all(|_| {}, |_| {}, move || log.borrow_mut().push(format!("group {key} done")));
        },
        |_| {},
        move || d_log.borrow_mut().push("outer done".to_owned()),
      );
    assert_eq!(*log.borrow(), vec!["group 1 done", "group 2 done", "outer done"]);
  }

  #[test]
  fn error_reaches_every_group() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_log, d_log) = (log.clone(), log.clone());
    observable::create(|mut emitter: Emitter<i32, &'static str>| {
      emitter.next(1);
      emitter.next(2);
      emitter.error("cut");
    })
    .group_by(|v: &i32| *v)
    .subscribe_err(
      move |group| {
        let key = *group.key();
        let log = c_log.clone();
        group.subscribe_err(|_| {}, move |e| log.borrow_mut().push(format!("{key}: {e}")));
      },
      move |e| d_log.borrow_mut().push(format!("outer: {e}")),
    );
    assert_eq!(*log.borrow(), vec!["1: cut", "2: cut", "outer: cut"]);
  }
}
