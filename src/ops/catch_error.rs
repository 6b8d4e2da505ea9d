use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  subscription::{SerialSubscription, Subscription},
  type_hint::TypeHint,
};

/// Recovers from an upstream error by continuing with the observable
/// returned by the handler.
///
/// The failed upstream is dropped and the downstream observer is handed to
/// the fallback, so the original error never reaches it.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::throw_err::<i32, _>(RxError::source("offline"))
///   .catch_error(|err| {
///     println!("recovering from {err}");
///     observable::of(0)
///   })
///   .subscribe(|v| println!("{v}"));
/// ```
pub struct CatchErrorOp<S, F, Err> {
  source: S,
  handler: F,
  _hint: TypeHint<Err>,
}

impl<S: Clone, F: Clone, Err> Clone for CatchErrorOp<S, F, Err> {
  fn clone(&self) -> Self { CatchErrorOp::new(self.source.clone(), self.handler.clone()) }
}

impl<S, F, Err> CatchErrorOp<S, F, Err> {
  #[inline]
  pub(crate) fn new(source: S, handler: F) -> Self { CatchErrorOp { source, handler, _hint: TypeHint::new() } }
}

impl<Item, Err, Err2, O, S, F, R> Observable<Item, Err2, O> for CatchErrorOp<S, F, Err>
where
  O: Observer<Item, Err2>,
  S: Observable<Item, Err, CatchErrorObserver<O, F, Err2>>,
  S::Unsub: 'static,
  F: FnOnce(Err) -> R,
  R: Observable<Item, Err2, O>,
  R::Unsub: 'static,
{
  type Unsub = SerialSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let serial = SerialSubscription::default();
    let unsub = self.source.actual_subscribe(CatchErrorObserver {
      observer,
      handler: self.handler,
      serial: serial.clone(),
      _hint: TypeHint::new(),
    });
    // a synchronous failure already installed the fallback at generation 1
    serial.install(0, unsub);
    serial
  }
}

impl<Item, Err, Err2, S, F, R> ObservableExt<Item, Err2> for CatchErrorOp<S, F, Err>
where
  S: ObservableExt<Item, Err>,
  F: FnOnce(Err) -> R,
  R: ObservableExt<Item, Err2>,
{
}

pub struct CatchErrorObserver<O, F, Err2> {
  observer: O,
  handler: F,
  serial: SerialSubscription,
  _hint: TypeHint<Err2>,
}

impl<Item, Err, Err2, O, F, R> Observer<Item, Err> for CatchErrorObserver<O, F, Err2>
where
  O: Observer<Item, Err2>,
  F: FnOnce(Err) -> R,
  R: Observable<Item, Err2, O>,
  R::Unsub: 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) {
    if self.serial.is_closed() {
      return;
    }
    log::debug!("catch_error: upstream failed, subscribing fallback");
    let fallback = (self.handler)(err);
    let unsub = fallback.actual_subscribe(self.observer);
    self.serial.install(1, unsub);
  }

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
  fn switches_to_fallback() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    observable::create(|mut emitter: Emitter<i32, RxError>| {
      emitter.next(1);
      emitter.error(RxError::source("disk gone"));
    })
    .catch_error(|err| {
      assert_eq!(err.as_label(), "source_error");
      observable::from_iter(vec![8, 9]).map_err(|e| match e {})
    })
    .subscribe_all(
      move |v| l1.borrow_mut().push(v.to_string()),
      move |e: RxError| l2.borrow_mut().push(e.to_string()),
      move || l3.borrow_mut().push("complete".to_owned()),
    );
    assert_eq!(*log.borrow(), vec!["1", "8", "9", "complete"]);
  }

  #[test]
  fn fallback_error_reaches_downstream() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::throw_err::<i32, _>("first")
      .catch_error(|_| observable::throw_err::<i32, _>(RxError::operator("second")))
      .subscribe_err(|_| {}, move |e| c_log.borrow_mut().push(e.to_string()));
    assert_eq!(*log.borrow(), vec!["operator error: second"]);
  }

  #[test]
  fn unsubscribe_reaches_fallback() {
    let scheduler = TestScheduler::new();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let c_scheduler = scheduler.clone();
    let subscription = observable::throw_err::<usize, ()>(())
      .catch_error(move |_| observable::interval(Duration::from_millis(10), c_scheduler))
      .subscribe(move |v| c_seen.borrow_mut().push(v));

    scheduler.advance_by(Duration::from_millis(25));
    subscription.unsubscribe();
    scheduler.advance_by(Duration::from_millis(50));
    assert_eq!(*seen.borrow(), vec![0, 1]);
    assert_eq!(scheduler.pending_count(), 0);
  }
}
