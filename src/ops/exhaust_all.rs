use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  ops::switch_all::{subscribe_single_inner, InnerObserver, OnBusy, OuterObserver, SingleInnerSubscription},
  type_hint::TypeHint,
};

/// Flattens an observable of observables, ignoring every inner observable
/// that arrives while another one is still running.
pub struct ExhaustAllOp<S, Inner> {
  source: S,
  _hint: TypeHint<Inner>,
}

impl<S: Clone, Inner> Clone for ExhaustAllOp<S, Inner> {
  fn clone(&self) -> Self { ExhaustAllOp::new(self.source.clone()) }
}

impl<S, Inner> ExhaustAllOp<S, Inner> {
  #[inline]
  pub(crate) fn new(source: S) -> Self { ExhaustAllOp { source, _hint: TypeHint::new() } }
}

impl<Inner, Item, Err, O, S> Observable<Item, Err, O> for ExhaustAllOp<S, Inner>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Inner, Err, OuterObserver<O, Item>>,
  S::Unsub: 'static,
  Inner: Observable<Item, Err, InnerObserver<O>>,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  type Unsub = SingleInnerSubscription<O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    subscribe_single_inner::<S, Inner, Item, Err, O>(self.source, observer, OnBusy::Ignore)
  }
}

impl<Inner, Item, Err, S> ObservableExt<Item, Err> for ExhaustAllOp<S, Inner>
where
  S: ObservableExt<Inner, Err>,
  Inner: ObservableExt<Item, Err>,
{
}
