use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

/// Folds the whole source into one value, emitted right before completion.
/// An error discards the partial result.
#[derive(Clone)]
pub struct ReduceOp<S, BinaryOp, InputItem, OutputItem> {
  source: S,
  binary_op: BinaryOp,
  initial_value: Option<OutputItem>,
  seed: Option<fn(InputItem) -> OutputItem>,
}

impl<S, BinaryOp, InputItem, OutputItem> ReduceOp<S, BinaryOp, InputItem, OutputItem> {
  #[inline]
  pub(crate) fn new(source: S, initial_value: OutputItem, binary_op: BinaryOp) -> Self {
    ReduceOp { source, binary_op, initial_value: Some(initial_value), seed: None }
  }
}

impl<S, BinaryOp, Item> ReduceOp<S, BinaryOp, Item, Item> {
  #[inline]
  pub(crate) fn seeded_by_first(source: S, binary_op: BinaryOp) -> Self {
    ReduceOp { source, binary_op, initial_value: None, seed: Some(std::convert::identity) }
  }
}

impl<OutputItem, InputItem, Err, O, S, BinaryOp> Observable<OutputItem, Err, O>
  for ReduceOp<S, BinaryOp, InputItem, OutputItem>
where
  O: Observer<OutputItem, Err>,
  S: Observable<InputItem, Err, ReduceObserver<O, BinaryOp, InputItem, OutputItem>>,
  BinaryOp: FnMut(OutputItem, InputItem) -> OutputItem,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ReduceObserver {
      observer,
      binary_op: self.binary_op,
      acc: self.initial_value,
      seed: self.seed,
    })
  }
}

impl<OutputItem, InputItem, Err, S, BinaryOp> ObservableExt<OutputItem, Err>
  for ReduceOp<S, BinaryOp, InputItem, OutputItem>
where
  S: ObservableExt<InputItem, Err>,
  BinaryOp: FnMut(OutputItem, InputItem) -> OutputItem,
{
}

pub struct ReduceObserver<O, BinaryOp, InputItem, OutputItem> {
  observer: O,
  binary_op: BinaryOp,
  acc: Option<OutputItem>,
  seed: Option<fn(InputItem) -> OutputItem>,
}

impl<O, BinaryOp, InputItem, OutputItem, Err> Observer<InputItem, Err>
  for ReduceObserver<O, BinaryOp, InputItem, OutputItem>
where
  O: Observer<OutputItem, Err>,
  BinaryOp: FnMut(OutputItem, InputItem) -> OutputItem,
{
  fn next(&mut self, value: InputItem) {
    self.acc = match (self.acc.take(), self.seed) {
      (Some(acc), _) => Some((self.binary_op)(acc, value)),
      (None, seed) => seed.map(|seed| seed(value)),
    };
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if let Some(acc) = self.acc.take() {
      self.observer.next(acc);
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
  fn emits_once_on_complete() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter(1..=4)
      .reduce_initial(10, |acc, v| acc + v)
      .subscribe(move |v| c_emitted.borrow_mut().push(v));
    assert_eq!(*emitted.borrow(), vec![20]);
  }

  #[test]
  fn empty_source_emits_seed() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let c_emitted = emitted.clone();
    observable::empty::<i32>()
      .reduce_initial(7, |acc, v| acc + v)
      .subscribe(move |v| c_emitted.borrow_mut().push(v));
    assert_eq!(*emitted.borrow(), vec![7]);
  }

  #[test]
  fn first_value_seeds_the_fold() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter([2, 3, 4])
      .reduce(|acc, v| acc * v)
      .subscribe(move |v| c_emitted.borrow_mut().push(v));
    assert_eq!(*emitted.borrow(), vec![24]);
  }

  #[test]
  fn empty_source_without_seed_just_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::empty::<i32>().reduce(|acc, v| acc + v).subscribe_all(
      move |v| l1.borrow_mut().push(v.to_string()),
      |_| {},
      move || l2.borrow_mut().push("complete".to_owned()),
    );
    assert_eq!(*log.borrow(), vec!["complete"]);
  }
}
