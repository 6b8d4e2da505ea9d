use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  type_hint::TypeHint,
};

#[derive(Clone)]
pub struct TryMapOp<S, M, Item> {
  source: S,
  func: M,
  _hint: TypeHint<Item>,
}

impl<S, M, Item> TryMapOp<S, M, Item> {
  #[inline]
  pub(crate) fn new(source: S, func: M) -> Self { TryMapOp { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, Err, O, S, M> Observable<B, Err, O> for TryMapOp<S, M, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, TryMapObserver<O, M>>,
  M: FnMut(Item) -> Result<B, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(TryMapObserver { observer: Some(observer), map: self.func })
  }
}

impl<Item, B, Err, S, M> ObservableExt<B, Err> for TryMapOp<S, M, Item>
where
  S: ObservableExt<Item, Err>,
  M: FnMut(Item) -> Result<B, Err>,
{
}

/// Becomes finished after the first failure, so the upstream stops
/// producing into it.
pub struct TryMapObserver<O, M> {
  observer: Option<O>,
  map: M,
}

impl<Item, Err, O, M, B> Observer<Item, Err> for TryMapObserver<O, M>
where
  O: Observer<B, Err>,
  M: FnMut(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    match (self.map)(value) {
      Ok(v) => self.observer.next(v),
      Err(err) => self.observer.take().error(err),
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
