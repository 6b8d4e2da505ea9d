use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted, or stops early once the
/// observer is finished (e.g. behind `take`). Never emits an error.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{v},"));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<O, Iter> Observable<Iter::Item, Infallible, O> for ObservableIter<Iter>
where
  Iter: IntoIterator,
  O: Observer<Iter::Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let mut iter = self.0.into_iter();
    while !observer.is_finished() {
      match iter.next() {
        Some(v) => observer.next(v),
        None => {
          observer.complete();
          return;
        }
      }
    }
  }
}

impl<Iter> ObservableExt<Iter::Item, Infallible> for ObservableIter<Iter> where Iter: IntoIterator {}
