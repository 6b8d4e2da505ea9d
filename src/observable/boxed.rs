use crate::{
  observable::{Observable, ObservableExt},
  observer::{BoxObserver, Observer},
  subscription::BoxSubscription,
};

/// Object-safe subscribe, the vtable behind [`BoxObservable`].
pub trait DynObservable<Item, Err> {
  fn box_subscribe(self: Box<Self>, observer: BoxObserver<Item, Err>) -> BoxSubscription;
}

impl<T, Item, Err> DynObservable<Item, Err> for T
where
  T: Observable<Item, Err, BoxObserver<Item, Err>>,
  T::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  fn box_subscribe(self: Box<Self>, observer: BoxObserver<Item, Err>) -> BoxSubscription {
    BoxSubscription::new((*self).actual_subscribe(observer))
  }
}

/// An observable with its concrete type erased.
pub struct BoxObservable<Item, Err>(Box<dyn DynObservable<Item, Err>>);

impl<Item, Err> BoxObservable<Item, Err> {
  pub fn new(source: impl DynObservable<Item, Err> + 'static) -> Self { BoxObservable(Box::new(source)) }
}

impl<Item, Err, O> Observable<Item, Err, O> for BoxObservable<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: 'static,
{
  type Unsub = BoxSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.0.box_subscribe(Box::new(observer)) }
}

impl<Item, Err> ObservableExt<Item, Err> for BoxObservable<Item, Err> {}
