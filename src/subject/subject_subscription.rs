use super::{subscribers::SubjectObserver, SubjectCore};
use crate::{
  rc::{RcDerefMut, WeakMutRc},
  subscription::Subscription,
};

/// Subscription handle for a subject.
///
/// Closes the observer first, so a broadcast already in flight skips it,
/// then removes it from the subject if the subject is still alive.
pub struct SubjectSubscription<Item, Err> {
  core: WeakMutRc<SubjectCore<Item, Err>>,
  id: Option<usize>,
  observer: SubjectObserver<Item, Err>,
}

impl<Item, Err> SubjectSubscription<Item, Err> {
  pub(crate) fn new(
    core: WeakMutRc<SubjectCore<Item, Err>>,
    id: Option<usize>,
    observer: SubjectObserver<Item, Err>,
  ) -> Self {
    Self { core, id, observer }
  }
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    let Self { core, id, observer } = self;
    observer.unsubscribe();
    if let (Some(id), Some(core)) = (id, core.upgrade()) {
      let _removed = core.rc_deref_mut().observers.remove(id);
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
