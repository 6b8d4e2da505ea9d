use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  type_hint::TypeHint,
};

#[derive(Clone)]
pub struct MapOp<S, M, Item> {
  source: S,
  func: M,
  _hint: TypeHint<Item>,
}

impl<S, M, Item> MapOp<S, M, Item> {
  #[inline]
  pub(crate) fn new(source: S, func: M) -> Self { MapOp { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, Err, O, S, M> Observable<B, Err, O> for MapOp<S, M, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, MapObserver<O, M>>,
  M: FnMut(Item) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let map = self.func;
    self.source.actual_subscribe(MapObserver { observer, map })
  }
}

impl<Item, B, Err, S, M> ObservableExt<B, Err> for MapOp<S, M, Item>
where
  S: ObservableExt<Item, Err>,
  M: FnMut(Item) -> B,
{
}

pub struct MapObserver<O, M> {
  observer: O,
  map: M,
}

impl<Item, Err, O, M, B> Observer<Item, Err> for MapObserver<O, M>
where
  O: Observer<B, Err>,
  M: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

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
  fn primitive_type() {
    let i = Rc::new(RefCell::new(0));
    let c_i = i.clone();
    observable::from_iter(100..101)
      .map(|v| v * 2)
      .subscribe(move |v| *c_i.borrow_mut() += v);
    assert_eq!(*i.borrow(), 200);
  }

  #[test]
  fn map_types_mixed() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::from_iter(vec!['a', 'b', 'c'])
      .map(|_| 1)
      .map(|v| v as f32 / 2.)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![0.5, 0.5, 0.5]);
  }

  #[test]
  fn map_of_interval() {
    let scheduler = TestScheduler::new();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::interval(Duration::from_millis(1000), scheduler.clone())
      .take(3)
      .map(|v| format!("Tick {v}"))
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    scheduler.flush();
    assert_eq!(*seen.borrow(), vec!["Tick 0", "Tick 1", "Tick 2"]);
  }
}
