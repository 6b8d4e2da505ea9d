use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
  subscription::{SerialSubscription, TupleSubscription},
};

/// Creates an observable which will fire at `period` time into the future,
/// and will repeat every `period` after, emitting `0, 1, 2, ...`.
///
/// It never completes on its own; limit it with `take` or unsubscribe.
pub fn interval<SD>(period: Duration, scheduler: SD) -> IntervalObservable<SD> {
  IntervalObservable { period, scheduler }
}

#[derive(Clone)]
pub struct IntervalObservable<SD> {
  period: Duration,
  scheduler: SD,
}

impl<SD, O> Observable<usize, Infallible, O> for IntervalObservable<SD>
where
  SD: Scheduler,
  O: Observer<usize, Infallible> + 'static,
{
  type Unsub = TupleSubscription<Subscriber<O>, SerialSubscription>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscriber = Subscriber::new(observer);
    let ticks = SerialSubscription::default();
    schedule_tick(subscriber.clone(), self.scheduler, self.period, 0, ticks.clone());
    TupleSubscription::new(subscriber, ticks)
  }
}

impl<SD> ObservableExt<usize, Infallible> for IntervalObservable<SD> {}

fn schedule_tick<O, SD>(
  subscriber: Subscriber<O>,
  scheduler: SD,
  period: Duration,
  seq: usize,
  ticks: SerialSubscription,
) where
  O: Observer<usize, Infallible> + 'static,
  SD: Scheduler,
{
  let c_scheduler = scheduler.clone();
  let c_ticks = ticks.clone();
  let handle = scheduler.schedule(period, move || {
    let mut subscriber = subscriber;
    if subscriber.is_finished() {
      return;
    }
    subscriber.next(seq);
    if !subscriber.is_finished() {
      schedule_tick(subscriber, c_scheduler, period, seq + 1, c_ticks);
    }
  });
  ticks.install(seq, handle);
}
