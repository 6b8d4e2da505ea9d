use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

/// Emits the running accumulation of the source, one output per input.
///
/// Feeds the previous output back into `binary_op` together with each new
/// value; completes and errors along with the source.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(vec![1, 1, 1, 1, 1])
///   .scan_initial(100, |acc, v| acc + v)
///   .subscribe(|v| println!("{}", v));
///
/// // print log:
/// // 101
/// // 102
/// // 103
/// // 104
/// // 105
/// ```
#[derive(Clone)]
pub struct ScanOp<S, BinaryOp, InputItem, OutputItem> {
  source: S,
  binary_op: BinaryOp,
  initial_value: Option<OutputItem>,
  seed: Option<fn(InputItem) -> OutputItem>,
}

impl<S, BinaryOp, InputItem, OutputItem> ScanOp<S, BinaryOp, InputItem, OutputItem> {
  #[inline]
  pub(crate) fn new(source: S, initial_value: OutputItem, binary_op: BinaryOp) -> Self {
    ScanOp { source, binary_op, initial_value: Some(initial_value), seed: None }
  }
}

impl<S, BinaryOp, Item> ScanOp<S, BinaryOp, Item, Item> {
  #[inline]
  pub(crate) fn seeded_by_first(source: S, binary_op: BinaryOp) -> Self {
    ScanOp { source, binary_op, initial_value: None, seed: Some(std::convert::identity) }
  }
}

impl<OutputItem, InputItem, Err, O, S, BinaryOp> Observable<OutputItem, Err, O>
  for ScanOp<S, BinaryOp, InputItem, OutputItem>
where
  O: Observer<OutputItem, Err>,
  S: Observable<InputItem, Err, ScanObserver<O, BinaryOp, InputItem, OutputItem>>,
  BinaryOp: FnMut(OutputItem, InputItem) -> OutputItem,
  OutputItem: Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ScanObserver {
      observer,
      binary_op: self.binary_op,
      acc: self.initial_value,
      seed: self.seed,
    })
  }
}

impl<OutputItem, InputItem, Err, S, BinaryOp> ObservableExt<OutputItem, Err>
  for ScanOp<S, BinaryOp, InputItem, OutputItem>
where
  S: ObservableExt<InputItem, Err>,
  BinaryOp: FnMut(OutputItem, InputItem) -> OutputItem,
{
}

pub struct ScanObserver<O, BinaryOp, InputItem, OutputItem> {
  observer: O,
  binary_op: BinaryOp,
  // `None` until the first value when no seed was given
  acc: Option<OutputItem>,
  seed: Option<fn(InputItem) -> OutputItem>,
}

impl<O, BinaryOp, InputItem, OutputItem, Err> Observer<InputItem, Err>
  for ScanObserver<O, BinaryOp, InputItem, OutputItem>
where
  O: Observer<OutputItem, Err>,
  BinaryOp: FnMut(OutputItem, InputItem) -> OutputItem,
  OutputItem: Clone,
{
  fn next(&mut self, value: InputItem) {
    let acc = match (self.acc.take(), self.seed) {
      (Some(acc), _) => (self.binary_op)(acc, value),
      (None, Some(seed)) => seed(value),
      (None, None) => return,
    };
    self.acc = Some(acc.clone());
    self.observer.next(acc);
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
  fn scan_initial() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter(vec![1, 1, 1, 1, 1])
      .scan_initial(100, |acc, v| acc + v)
      .subscribe(move |v| c_emitted.borrow_mut().push(v));
    assert_eq!(*emitted.borrow(), vec![101, 102, 103, 104, 105]);
  }

  #[test]
  fn first_value_seeds_the_fold() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter(vec![2, 3, 4])
      .scan(|acc, v| acc * v)
      .subscribe(move |v| c_emitted.borrow_mut().push(v));
    assert_eq!(*emitted.borrow(), vec![2, 6, 24]);
  }

  #[test]
  fn scan_changes_type() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let c_emitted = emitted.clone();
    observable::from_iter(vec!['a', 'b'])
      .scan_initial(String::new(), |mut acc, c| {
        acc.push(c);
        acc
      })
      .subscribe(move |v| c_emitted.borrow_mut().push(v));
    assert_eq!(*emitted.borrow(), vec!["a", "ab"]);
  }
}
