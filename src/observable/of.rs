use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

/// Emit one value, then complete.
pub fn of<Item>(v: Item) -> ObservableOf<Item> { ObservableOf(v) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item, O> Observable<Item, Infallible, O> for ObservableOf<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.0);
    observer.complete();
  }
}

impl<Item> ObservableExt<Item, Infallible> for ObservableOf<Item> {}
