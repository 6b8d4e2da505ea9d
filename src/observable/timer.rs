use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  scheduler::{Duration, Scheduler, TaskHandle},
  subscriber::Subscriber,
  subscription::TupleSubscription,
};

/// Emit `item` once after `delay`, then complete.
pub fn timer<Item, SD>(item: Item, delay: Duration, scheduler: SD) -> TimerObservable<Item, SD> {
  TimerObservable { item, delay, scheduler }
}

#[derive(Clone)]
pub struct TimerObservable<Item, SD> {
  item: Item,
  delay: Duration,
  scheduler: SD,
}

impl<Item, SD, O> Observable<Item, Infallible, O> for TimerObservable<Item, SD>
where
  Item: 'static,
  SD: Scheduler,
  O: Observer<Item, Infallible> + 'static,
{
  type Unsub = TupleSubscription<Subscriber<O>, TaskHandle>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscriber = Subscriber::new(observer);
    let mut c_subscriber = subscriber.clone();
    let item = self.item;
    let handle = self.scheduler.schedule(self.delay, move || {
      c_subscriber.next(item);
      c_subscriber.complete();
    });
    TupleSubscription::new(subscriber, handle)
  }
}

impl<Item, SD> ObservableExt<Item, Infallible> for TimerObservable<Item, SD> {}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn fires_once_after_delay() {
    let scheduler = TestScheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::timer("tick", Duration::from_millis(2000), scheduler.clone()).subscribe_all(
      move |v| l1.borrow_mut().push(v),
      |_| {},
      move || l2.borrow_mut().push("done"),
    );

    scheduler.advance_by(Duration::from_millis(1999));
    assert!(log.borrow().is_empty());
    scheduler.advance_by(Duration::from_millis(1));
    assert_eq!(*log.borrow(), vec!["tick", "done"]);
  }

  #[test]
  fn cancelled_timer_is_silent() {
    let scheduler = TestScheduler::new();
    let hit = Rc::new(RefCell::new(false));
    let c_hit = hit.clone();
    observable::timer((), Duration::from_millis(5), scheduler.clone())
      .subscribe(move |_| *c_hit.borrow_mut() = true)
      .unsubscribe();
    scheduler.flush();
    assert!(!*hit.borrow());
  }
}
