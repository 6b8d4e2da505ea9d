use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  scheduler::{Duration, Scheduler, TaskHandle},
  subscriber::Subscriber,
  subscription::{DynamicSubscriptions, Subscription, TupleSubscription},
};

#[derive(Clone)]
pub struct DelayOp<S, SD> {
  source: S,
  delay: Duration,
  scheduler: SD,
}

impl<S, SD> DelayOp<S, SD> {
  #[inline]
  pub(crate) fn new(source: S, delay: Duration, scheduler: SD) -> Self {
    DelayOp { source, delay, scheduler }
  }
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DelayOp<S, SD>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Item, Err, DelayObserver<O, SD>>,
  SD: Scheduler,
  Item: 'static,
  Err: 'static,
{
  type Unsub = TupleSubscription<TupleSubscription<Subscriber<O>, PendingTasks>, S::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Self { source, delay, scheduler } = self;
    let observer = Subscriber::new(observer);
    let pending = PendingTasks::default();
    let unsub = source.actual_subscribe(DelayObserver {
      delay,
      scheduler,
      observer: observer.clone(),
      pending: pending.clone(),
    });
    TupleSubscription::new(TupleSubscription::new(observer, pending), unsub)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DelayOp<S, SD> where S: ObservableExt<Item, Err> {}

/// Scheduled emissions not yet delivered.
#[derive(Clone, Default)]
pub struct PendingTasks(MutRc<DynamicSubscriptions<TaskHandle>>);

impl PendingTasks {
  fn add(&self, handle: TaskHandle) {
    let mut tasks = self.0.rc_deref_mut();
    tasks.retain_open();
    tasks.add(handle);
  }
}

impl Subscription for PendingTasks {
  fn unsubscribe(self) {
    let tasks = self.0.rc_deref_mut().take_all();
    tasks.into_iter().for_each(Subscription::unsubscribe);
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().is_closed() }
}

pub struct DelayObserver<O, SD> {
  delay: Duration,
  scheduler: SD,
  observer: Subscriber<O>,
  pending: PendingTasks,
}

impl<Item, Err, O, SD> Observer<Item, Err> for DelayObserver<O, SD>
where
  O: Observer<Item, Err> + 'static,
  SD: Scheduler,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, value: Item) {
    let mut observer = self.observer.clone();
    let handle = self.scheduler.schedule(self.delay, move || observer.next(value));
    self.pending.add(handle);
  }

  fn error(self, err: Err) {
    self.pending.unsubscribe();
    self.observer.error(err)
  }

  fn complete(self) {
    let observer = self.observer.clone();
    let handle = self.scheduler.schedule(self.delay, move || observer.complete());
    self.pending.add(handle);
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn shifts_values_and_completion() {
    let scheduler = TestScheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    let (s1, s2) = (scheduler.clone(), scheduler.clone());
    observable::from_iter(1..=2)
      .delay(Duration::from_millis(500), scheduler.clone())
      .subscribe_all(
        move |v| l1.borrow_mut().push(format!("{v}@{}", s1.now().as_millis())),
        |_| {},
        move || l2.borrow_mut().push(format!("done@{}", s2.now().as_millis())),
      );

    scheduler.advance_by(Duration::from_millis(499));
    assert!(log.borrow().is_empty());
    scheduler.advance_by(Duration::from_millis(1));
    assert_eq!(*log.borrow(), vec!["1@500", "2@500", "done@500"]);
  }

  #[test]
  fn error_is_immediate_and_drops_pending() {
    let scheduler = TestScheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::create(|mut emitter: Emitter<i32, &'static str>| {
      emitter.next(1);
      emitter.error("late failure");
    })
    .delay(Duration::from_millis(100), scheduler.clone())
    .subscribe_err(
      move |v| l1.borrow_mut().push(v.to_string()),
      move |e| l2.borrow_mut().push(e.to_string()),
    );

    assert_eq!(*log.borrow(), vec!["late failure"]);
    assert_eq!(scheduler.pending_count(), 0);
    scheduler.flush();
    assert_eq!(*log.borrow(), vec!["late failure"]);
  }

  #[test]
  fn unsubscribe_cancels_scheduled_values() {
    let scheduler = TestScheduler::new();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let subscription = observable::of(7)
      .delay(Duration::from_millis(100), scheduler.clone())
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    subscription.unsubscribe();
    scheduler.flush();
    assert!(seen.borrow().is_empty());
  }
}
