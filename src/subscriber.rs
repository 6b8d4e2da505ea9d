use std::collections::VecDeque;

use crate::{
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

/// A shared observer handle that is also the subscription of the observer
/// it wraps.
///
/// Producers, timers and flattening operators hold clones of a `Subscriber`
/// to push events into one downstream observer. It guarantees:
///
/// - nothing is delivered after `error`, `complete` or `unsubscribe`;
/// - no `RefCell` borrow is held while the wrapped observer runs, so the
///   observer may unsubscribe or emit into its own source from a callback;
/// - an event arriving while the observer is busy is queued and delivered
///   in order once the running call returns.
pub struct Subscriber<O>(MutRc<SubscriberState<O>>);

struct SubscriberState<O> {
  observer: Option<O>,
  closed: bool,
  backlog: VecDeque<Box<dyn FnOnce(&mut O)>>,
  terminal: Option<Box<dyn FnOnce(O)>>,
}

impl<O> Clone for Subscriber<O> {
  #[inline]
  fn clone(&self) -> Self { Subscriber(self.0.clone()) }
}

impl<O> Subscriber<O> {
  pub fn new(observer: O) -> Self {
    Subscriber(MutRc::own(SubscriberState {
      observer: Some(observer),
      closed: false,
      backlog: VecDeque::new(),
      terminal: None,
    }))
  }

  /// Hand the observer back after a delivery, running whatever queued up
  /// meanwhile.
  fn settle(&self, mut observer: O) {
    loop {
      let mut state = self.0.rc_deref_mut();
      if let Some(job) = state.backlog.pop_front() {
        drop(state);
        job(&mut observer);
        continue;
      }
      let terminal = state.terminal.take();
      if terminal.is_none() && !state.closed {
        state.observer = Some(observer);
        return;
      }
      drop(state);
      if let Some(terminal) = terminal {
        terminal(observer);
      }
      return;
    }
  }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, value: Item) {
    let mut observer = {
      let mut state = self.0.rc_deref_mut();
      if state.closed {
        return;
      }
      match state.observer.take() {
        Some(observer) => observer,
        None => {
          state.backlog.push_back(Box::new(move |o: &mut O| o.next(value)));
          return;
        }
      }
    };
    observer.next(value);
    self.settle(observer);
  }

  fn error(self, err: Err) {
    let observer = {
      let mut state = self.0.rc_deref_mut();
      if state.closed {
        return;
      }
      state.closed = true;
      match state.observer.take() {
        Some(observer) => observer,
        None => {
          state.terminal = Some(Box::new(move |o: O| o.error(err)));
          return;
        }
      }
    };
    observer.error(err);
  }

  fn complete(self) {
    let observer = {
      let mut state = self.0.rc_deref_mut();
      if state.closed {
        return;
      }
      state.closed = true;
      match state.observer.take() {
        Some(observer) => observer,
        None => {
          state.terminal = Some(Box::new(|o: O| o.complete()));
          return;
        }
      }
    };
    observer.complete();
  }

  fn is_finished(&self) -> bool {
    let state = self.0.rc_deref();
    state.closed || state.observer.as_ref().map_or(false, Observer::is_finished)
  }
}

impl<O> Subscription for Subscriber<O> {
  fn unsubscribe(self) {
    let released = {
      let mut state = self.0.rc_deref_mut();
      state.closed = true;
      state.terminal = None;
      (state.observer.take(), std::mem::take(&mut state.backlog))
    };
    drop(released);
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}
