//! Hot multicast sources.
//!
//! A subject is both an [`Observer`] and an observable: values pushed into
//! it are delivered to every registered observer in registration order.
//! Subjects are cheap `Clone` handles over shared state; keep one clone to
//! push into and hand out others to subscribe.
//!
//! Once errored or completed a subject stays that way. Observers that
//! subscribe later get the stored error (cloned) or the completion at once.

use crate::{
  observable::{Observable, ObservableExt},
  observer::{BoxObserver, Observer},
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
};

mod behavior_subject;
mod replay_subject;
mod subject_subscription;
mod subscribers;

pub use behavior_subject::BehaviorSubject;
pub use replay_subject::ReplaySubject;
pub use subject_subscription::SubjectSubscription;

use subscribers::{broadcast_complete, broadcast_error, broadcast_value, SubjectObserver, Subscribers};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubjectState<Err> {
  Active,
  Errored(Err),
  Completed,
}

pub(crate) struct SubjectCore<Item, Err> {
  observers: Subscribers<Item, Err>,
  state: SubjectState<Err>,
}

pub struct Subject<Item, Err> {
  core: MutRc<SubjectCore<Item, Err>>,
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { core: self.core.clone() } }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self {
    Subject {
      core: MutRc::own(SubjectCore { observers: Subscribers::default(), state: SubjectState::Active }),
    }
  }
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Number of registered observers.
  pub fn observer_count(&self) -> usize { self.core.rc_deref().observers.len() }

  pub fn is_active(&self) -> bool { matches!(self.core.rc_deref().state, SubjectState::Active) }

  pub fn state(&self) -> SubjectState<Err>
  where
    Err: Clone,
  {
    self.core.rc_deref().state.clone()
  }
}

impl<Item, Err> Subject<Item, Err>
where
  Item: 'static,
  Err: Clone + 'static,
{
  /// Wrap `observer` and register it, or deliver the stored terminal event
  /// when the subject has already finished.
  ///
  /// `before_register` runs against the wrapped observer while the subject
  /// is still active, ahead of any live value. `ReplaySubject` and
  /// `BehaviorSubject` use it to hand out their buffered values first.
  pub(crate) fn register<O>(
    &self,
    observer: O,
    before_register: impl FnOnce(&mut SubjectObserver<Item, Err>),
  ) -> SubjectSubscription<Item, Err>
  where
    O: Observer<Item, Err> + 'static,
  {
    let boxed: BoxObserver<Item, Err> = Box::new(observer);
    let mut subscriber = Subscriber::new(boxed);
    let terminal = self.core.rc_deref().state.clone();
    let id = match terminal {
      SubjectState::Active => {
        before_register(&mut subscriber);
        if Observer::<Item, Err>::is_finished(&subscriber) {
          None
        } else {
          Some(self.core.rc_deref_mut().observers.add(subscriber.clone()))
        }
      }
      SubjectState::Errored(err) => {
        Observer::<Item, Err>::error(subscriber.clone(), err);
        None
      }
      SubjectState::Completed => {
        Observer::<Item, Err>::complete(subscriber.clone());
        None
      }
    };
    SubjectSubscription::new(self.core.downgrade(), id, subscriber)
  }
}

impl<Item, Err> Observer<Item, Err> for Subject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn next(&mut self, value: Item) {
    let observers = {
      let mut core = self.core.rc_deref_mut();
      if !matches!(core.state, SubjectState::Active) {
        return;
      }
      core.observers.snapshot()
    };
    broadcast_value(observers, value);
    self.core.rc_deref_mut().observers.prune();
  }

  fn error(self, err: Err) {
    let observers = {
      let mut core = self.core.rc_deref_mut();
      if !matches!(core.state, SubjectState::Active) {
        return;
      }
      core.state = SubjectState::Errored(err.clone());
      core.observers.take_all()
    };
    broadcast_error(observers, err);
  }

  fn complete(self) {
    let observers = {
      let mut core = self.core.rc_deref_mut();
      if !matches!(core.state, SubjectState::Active) {
        return;
      }
      core.state = SubjectState::Completed;
      core.observers.take_all()
    };
    broadcast_complete(observers);
  }

  #[inline]
  fn is_finished(&self) -> bool { !self.is_active() }
}

impl<Item, Err, O> Observable<Item, Err, O> for Subject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.register(observer, |_| {}) }
}

impl<Item, Err> ObservableExt<Item, Err> for Subject<Item, Err> {}
