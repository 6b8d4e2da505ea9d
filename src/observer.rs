//! Observer trait and the closure adapters used by the `subscribe` family.
//!
//! `error` and `complete` consume the observer, so once a terminal event is
//! delivered the type system rules out any further event on it.

use std::fmt::Debug;

/// The consumer side of a stream.
pub trait Observer<Item, Err> {
  /// Receive the next value.
  fn next(&mut self, value: Item);

  /// Receive the terminal error.
  fn error(self, err: Err);

  /// Receive the terminal completion.
  fn complete(self);

  /// Whether this observer accepts no more values.
  ///
  /// Sources emitting in a loop or from a timer consult this to stop early,
  /// e.g. after `take` has seen enough.
  fn is_finished(&self) -> bool;
}

/// Object-safe mirror of [`Observer`], so observers of different concrete
/// types can live in one collection.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_finished(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  #[inline]
  fn box_next(&mut self, value: Item) { self.next(value) }
  #[inline]
  fn box_error(self: Box<Self>, err: Err) { (*self).error(err) }
  #[inline]
  fn box_complete(self: Box<Self>) { (*self).complete() }
  #[inline]
  fn box_is_finished(&self) -> bool { self.is_finished() }
}

pub type BoxObserver<Item, Err> = Box<dyn DynObserver<Item, Err>>;

impl<Item, Err> Observer<Item, Err> for Box<dyn DynObserver<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_finished(&self) -> bool { (**self).box_is_finished() }
}

/// `None` is an observer that has already terminated.
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(inner) = self {
      inner.error(err);
    }
  }

  fn complete(self) {
    if let Some(inner) = self {
      inner.complete();
    }
  }

  fn is_finished(&self) -> bool { self.as_ref().map_or(true, Observer::is_finished) }
}

/// Closure triple behind `subscribe`, `subscribe_err` and `subscribe_all`.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(self) { (self.complete)() }

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Error handler of sinks subscribed without one.
pub(crate) fn log_unhandled<Err: Debug>(err: Err) {
  log::error!("unhandled stream error: {:?}", err);
}

pub(crate) fn noop() {}

#[cfg(test)]
mod test {
  use super::*;
  use std::{cell::Cell, rc::Rc};

  struct Collect {
    values: Vec<i32>,
  }

  impl Observer<i32, ()> for Collect {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(self, _: ()) {}

    fn complete(self) {}

    fn is_finished(&self) -> bool { false }
  }

  #[test]
  fn option_observer() {
    let mut some = Some(Collect { values: vec![] });
    some.next(1);
    some.next(2);
    assert!(!some.is_finished());
    assert_eq!(some.as_ref().map(|c| c.values.clone()), Some(vec![1, 2]));

    let none: Option<Collect> = None;
    assert!(none.is_finished());
  }

  #[test]
  fn boxed_observer() {
    let sum = Rc::new(Cell::new(0));
    let completed = Rc::new(Cell::new(false));
    let (c_sum, c_completed) = (sum.clone(), completed.clone());
    let mut boxed: BoxObserver<i32, ()> = Box::new(ObserverAll::new(
      move |v: i32| c_sum.set(c_sum.get() + v),
      |_: ()| {},
      move || c_completed.set(true),
    ));
    boxed.next(1);
    boxed.next(2);
    boxed.complete();
    assert_eq!(sum.get(), 3);
    assert!(completed.get());
  }
}
