//! Error recovery across whole pipelines: `retry` budgets, delayed retries
//! on virtual time, and `catch_error` fallbacks.

use std::{cell::RefCell, rc::Rc};

use rxlite::prelude::*;

/// A source that fails its first `failures` subscriptions, then emits the
/// attempt number and completes.
fn flaky_service(
  failures: usize,
  attempts: Rc<RefCell<usize>>,
) -> impl FnOnce(Emitter<usize, RxError>) + Clone {
  move |mut emitter: Emitter<usize, RxError>| {
    *attempts.borrow_mut() += 1;
    let attempt = *attempts.borrow();
    if attempt <= failures {
      emitter.error(RxError::source(format!("attempt {attempt} refused")));
    } else {
      emitter.next(attempt);
      emitter.complete();
    }
  }
}

#[test]
fn retry_exhaustion_counts_every_subscription() {
  let _ = env_logger::builder().is_test(true).try_init();
  let attempts = Rc::new(RefCell::new(0));
  let log = Rc::new(RefCell::new(vec![]));
  let (l1, l2) = (log.clone(), log.clone());

  observable::create(flaky_service(usize::MAX, attempts.clone()))
    .retry(2)
    .subscribe_err(
      move |v| l1.borrow_mut().push(format!("next {v}")),
      move |e: ExhaustedRetryError<RxError>| {
        l2.borrow_mut().push(format!("{} after {}: {}", e.as_label(), e.attempts, e.last))
      },
    );

  assert_eq!(*attempts.borrow(), 3);
  assert_eq!(*log.borrow(), vec!["exhausted_retry after 3: source error: attempt 3 refused"]);
}

#[test]
fn retry_then_success() {
  let attempts = Rc::new(RefCell::new(0));
  let seen = Rc::new(RefCell::new(vec![]));
  let c_seen = seen.clone();

  observable::create(flaky_service(2, attempts.clone()))
    .retry(2)
    .map(|attempt| attempt * 100)
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  assert_eq!(*seen.borrow(), vec![300]);
}

#[test]
fn delayed_retry_on_virtual_time() {
  let scheduler = TestScheduler::new();
  let attempts = Rc::new(RefCell::new(0));
  let log = Rc::new(RefCell::new(vec![]));
  let c_log = log.clone();
  let clock = scheduler.clone();

  observable::create(flaky_service(2, attempts.clone()))
    .retry_with(RetryConfig::new(3).delay(Duration::from_millis(250), scheduler.clone()))
    .subscribe(move |v| c_log.borrow_mut().push((v, clock.now().as_millis())));

  assert_eq!(*attempts.borrow(), 1);
  scheduler.advance_by(Duration::from_millis(250));
  assert_eq!(*attempts.borrow(), 2);
  assert!(log.borrow().is_empty());
  scheduler.advance_by(Duration::from_millis(250));
  assert_eq!(*log.borrow(), vec![(3, 500)]);
  assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn catch_error_after_retry_gives_up() {
  let attempts = Rc::new(RefCell::new(0));
  let log = Rc::new(RefCell::new(vec![]));
  let (l1, l2) = (log.clone(), log.clone());

  observable::create(flaky_service(usize::MAX, attempts.clone()))
    .retry(1)
    .catch_error(|err: ExhaustedRetryError<RxError>| {
      observable::of(err.attempts).map_err(|e| match e {})
    })
    .subscribe_all(
      move |v| l1.borrow_mut().push(format!("fallback {v}")),
      |_: RxError| {},
      move || l2.borrow_mut().push("complete".to_owned()),
    );

  assert_eq!(*attempts.borrow(), 2);
  assert_eq!(*log.borrow(), vec!["fallback 2", "complete"]);
}

#[test]
fn recovered_stream_feeds_a_subject() {
  let attempts = Rc::new(RefCell::new(0));
  let status = BehaviorSubject::<String, RxError>::new("connecting".to_owned());
  let history = Rc::new(RefCell::new(vec![]));
  let c_history = history.clone();
  status.clone().subscribe_err(move |s| c_history.borrow_mut().push(s), |_| {});

  let mut sink = status.clone();
  observable::create(flaky_service(1, attempts.clone()))
    .retry(1)
    .map_err(|e| RxError::operator(e.to_string()))
    .subscribe_err(move |attempt| sink.next(format!("online after {attempt} attempts")), |_| {});

  assert_eq!(*history.borrow(), vec!["connecting", "online after 2 attempts"]);
  assert_eq!(status.value(), "online after 2 attempts");
}
