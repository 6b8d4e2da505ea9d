use crate::{
  observable::{Observable, ObservableExt},
  observer::{BoxObserver, Observer},
  subscriber::Subscriber,
  subscription::{Subscription, TupleSubscription},
  type_hint::TypeHint,
};

/// Handle a `create` producer pushes into.
///
/// Clone it to hand it to timers or callbacks; `error` and `complete`
/// consume a clone. Once either ran, or the consumer unsubscribed, every
/// further call is ignored.
pub type Emitter<Item, Err> = Subscriber<BoxObserver<Item, Err>>;

/// Build an observable from a producer function.
///
/// The producer runs once per subscription and returns its teardown, any
/// [`Subscription`]: `()` when there is nothing to release, or a
/// [`Teardown`](crate::subscription::Teardown) closure.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let numbers = observable::create(|mut emitter: Emitter<i32, RxError>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
///   Teardown::new(|| println!("released"))
/// });
/// numbers.subscribe(|v| println!("{v}"));
/// ```
pub fn create<F, U, Item, Err>(producer: F) -> ObservableFn<F, Item, Err>
where
  F: FnOnce(Emitter<Item, Err>) -> U,
  U: Subscription,
{
  ObservableFn { producer, _hint: TypeHint::new() }
}

pub struct ObservableFn<F, Item, Err> {
  producer: F,
  _hint: TypeHint<(Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for ObservableFn<F, Item, Err> {
  fn clone(&self) -> Self {
    ObservableFn { producer: self.producer.clone(), _hint: TypeHint::new() }
  }
}

impl<F, U, Item, Err, O> Observable<Item, Err, O> for ObservableFn<F, Item, Err>
where
  O: Observer<Item, Err> + 'static,
  F: FnOnce(Emitter<Item, Err>) -> U,
  U: Subscription,
  Item: 'static,
  Err: 'static,
{
  type Unsub = TupleSubscription<Emitter<Item, Err>, U>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let boxed: BoxObserver<Item, Err> = Box::new(observer);
    let emitter = Subscriber::new(boxed);
    let teardown = (self.producer)(emitter.clone());
    TupleSubscription::new(emitter, teardown)
  }
}

impl<F, Item, Err> ObservableExt<Item, Err> for ObservableFn<F, Item, Err> {}
