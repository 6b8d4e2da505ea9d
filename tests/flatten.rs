//! The four flattening strategies on the same click stream: two clicks,
//! 700ms apart, each starting four ticks 500ms apart.

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use rxlite::prelude::*;

fn ticks(click: usize, scheduler: TestScheduler) -> BoxObservable<String, Infallible> {
  observable::interval(Duration::from_millis(500), scheduler)
    .take(4)
    .map(move |tick| format!("{click}.{tick}"))
    .box_it()
}

/// Click at 0 and 700ms, then run the clock to the end.
fn click_twice(clicks: &Subject<usize, Infallible>, scheduler: &TestScheduler) {
  let mut first = clicks.clone();
  first.next(0);
  let mut second = clicks.clone();
  scheduler.schedule(Duration::from_millis(700), move || second.next(1));
  scheduler.flush();
}

fn recorder(
  scheduler: &TestScheduler,
) -> (Rc<RefCell<Vec<String>>>, impl FnMut(String) + 'static) {
  let log = Rc::new(RefCell::new(vec![]));
  let (c_log, clock) = (log.clone(), scheduler.clone());
  (log, move |v| c_log.borrow_mut().push(format!("{v}@{}", clock.now().as_millis())))
}

#[test]
fn merge_map_interleaves() {
  let scheduler = TestScheduler::new();
  let clicks = Subject::new();
  let (log, record) = recorder(&scheduler);
  let c_scheduler = scheduler.clone();
  clicks.clone().merge_map(move |c| ticks(c, c_scheduler.clone())).subscribe(record);

  click_twice(&clicks, &scheduler);
  assert_eq!(
    *log.borrow(),
    vec!["0.0@500", "0.1@1000", "1.0@1200", "0.2@1500", "1.1@1700", "0.3@2000", "1.2@2200", "1.3@2700"]
  );
}

#[test]
fn concat_map_waits_its_turn() {
  let scheduler = TestScheduler::new();
  let clicks = Subject::new();
  let (log, record) = recorder(&scheduler);
  let c_scheduler = scheduler.clone();
  clicks.clone().concat_map(move |c| ticks(c, c_scheduler.clone())).subscribe(record);

  click_twice(&clicks, &scheduler);
  assert_eq!(
    *log.borrow(),
    vec!["0.0@500", "0.1@1000", "0.2@1500", "0.3@2000", "1.0@2500", "1.1@3000", "1.2@3500", "1.3@4000"]
  );
}

#[test]
fn switch_map_cancels_previous() {
  let scheduler = TestScheduler::new();
  let clicks = Subject::new();
  let (log, record) = recorder(&scheduler);
  let c_scheduler = scheduler.clone();
  clicks.clone().switch_map(move |c| ticks(c, c_scheduler.clone())).subscribe(record);

  click_twice(&clicks, &scheduler);
  assert_eq!(*log.borrow(), vec!["0.0@500", "1.0@1200", "1.1@1700", "1.2@2200", "1.3@2700"]);
}

#[test]
fn exhaust_map_ignores_while_busy() {
  let scheduler = TestScheduler::new();
  let clicks = Subject::new();
  let (log, record) = recorder(&scheduler);
  let c_scheduler = scheduler.clone();
  clicks.clone().exhaust_map(move |c| ticks(c, c_scheduler.clone())).subscribe(record);

  click_twice(&clicks, &scheduler);
  assert_eq!(*log.borrow(), vec!["0.0@500", "0.1@1000", "0.2@1500", "0.3@2000"]);
}

#[test]
fn completion_waits_for_inner_streams() {
  let scheduler = TestScheduler::new();
  let (log, record) = recorder(&scheduler);
  let done = log.clone();
  let clock = scheduler.clone();
  let c_scheduler = scheduler.clone();
  observable::of(7).merge_map(move |c| ticks(c, c_scheduler.clone())).subscribe_all(
    record,
    |_| {},
    move || done.borrow_mut().push(format!("complete@{}", clock.now().as_millis())),
  );

  scheduler.flush();
  assert_eq!(log.borrow().last().map(String::as_str), Some("complete@2000"));
}
