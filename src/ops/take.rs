use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

#[derive(Clone)]
pub struct TakeOp<S> {
  source: S,
  count: usize,
}

impl<S> TakeOp<S> {
  #[inline]
  pub(crate) fn new(source: S, count: usize) -> Self { TakeOp { source, count } }
}

impl<Item, Err, O, S> Observable<Item, Err, O> for TakeOp<S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TakeObserver<O>>,
{
  type Unsub = Option<S::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    if self.count == 0 {
      observer.complete();
      return None;
    }
    let observer = Some(observer);
    Some(self.source.actual_subscribe(TakeObserver { observer, count: self.count, hits: 0 }))
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for TakeOp<S> where S: ObservableExt<Item, Err> {}

pub struct TakeObserver<O> {
  observer: Option<O>,
  count: usize,
  hits: usize,
}

impl<O, Item, Err> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.hits < self.count {
      self.hits += 1;
      self.observer.next(value);
      if self.hits == self.count {
        self.observer.take().complete();
      }
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn base_function() {
    let completed = Rc::new(RefCell::new(false));
    let next_count = Rc::new(RefCell::new(0));
    let (c_completed, c_next) = (completed.clone(), next_count.clone());

    observable::from_iter(0..100).take(5).subscribe_all(
      move |_| *c_next.borrow_mut() += 1,
      |_| {},
      move || *c_completed.borrow_mut() = true,
    );

    assert!(*completed.borrow());
    assert_eq!(*next_count.borrow(), 5);
  }

  #[test]
  fn take_zero_completes_at_once() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::from_iter(0..3).take(0).subscribe_all(
      move |v| l1.borrow_mut().push(v),
      |_| {},
      move || l2.borrow_mut().push(-1),
    );
    assert_eq!(*log.borrow(), vec![-1]);
  }

  #[test]
  fn take_zero_never_runs_the_producer() {
    let produced = Rc::new(RefCell::new(false));
    let c_produced = produced.clone();
    observable::create(move |mut emitter: Emitter<i32, ()>| {
      *c_produced.borrow_mut() = true;
      emitter.next(1);
    })
    .take(0)
    .subscribe_err(|_| {}, |_| {});
    assert!(!*produced.borrow());
  }
}
