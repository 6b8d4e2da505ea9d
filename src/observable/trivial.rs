use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  type_hint::TypeHint,
};

/// Complete immediately without a value.
pub fn empty<Item>() -> EmptyObservable<Item> { EmptyObservable(TypeHint::new()) }

#[derive(Clone)]
pub struct EmptyObservable<Item>(TypeHint<Item>);

impl<Item, O> Observable<Item, Infallible, O> for EmptyObservable<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete() }
}

impl<Item> ObservableExt<Item, Infallible> for EmptyObservable<Item> {}

/// Fail immediately with `err`.
pub fn throw_err<Item, Err>(err: Err) -> ThrowErr<Item, Err> { ThrowErr { err, _hint: TypeHint::new() } }

pub struct ThrowErr<Item, Err> {
  err: Err,
  _hint: TypeHint<Item>,
}

impl<Item, Err: Clone> Clone for ThrowErr<Item, Err> {
  fn clone(&self) -> Self { ThrowErr { err: self.err.clone(), _hint: TypeHint::new() } }
}

impl<Item, Err, O> Observable<Item, Err, O> for ThrowErr<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.err) }
}

impl<Item, Err> ObservableExt<Item, Err> for ThrowErr<Item, Err> {}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn empty_only_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::empty::<i32>().subscribe_all(
      move |v| l1.borrow_mut().push(v.to_string()),
      |_| {},
      move || l2.borrow_mut().push("complete".to_string()),
    );
    assert_eq!(*log.borrow(), vec!["complete"]);
  }

  #[test]
  fn throw_err_only_errors() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::throw_err::<i32, _>("Oops").subscribe_all(
      move |v| l1.borrow_mut().push(v.to_string()),
      move |e| l2.borrow_mut().push(format!("error {e}")),
      || {},
    );
    assert_eq!(*log.borrow(), vec!["error Oops"]);
  }
}
