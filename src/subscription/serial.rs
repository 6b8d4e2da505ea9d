use super::{BoxSubscription, Subscription};
use crate::rc::{MutRc, RcDeref, RcDerefMut};

/// Holds the one live subscription of an operator that switches sources
/// over time (`catch_error`, `retry`).
///
/// Each installed subscription carries a generation. Installing a newer (or
/// equal) generation tears down the previous one; installing an older one
/// tears down the incoming subscription instead. This keeps the right handle
/// when a source fails synchronously and the replacement is installed before
/// the failed subscribe call has even returned.
#[derive(Clone, Default)]
pub struct SerialSubscription(MutRc<SerialState>);

#[derive(Default)]
struct SerialState {
  generation: usize,
  current: Option<BoxSubscription>,
  closed: bool,
}

impl SerialSubscription {
  pub fn install(&self, generation: usize, subscription: impl Subscription + 'static) {
    let subscription = BoxSubscription::new(subscription);
    let stale = {
      let mut state = self.0.rc_deref_mut();
      if state.closed || generation < state.generation {
        Some(subscription)
      } else {
        state.generation = generation;
        state.current.replace(subscription)
      }
    };
    if let Some(stale) = stale {
      stale.unsubscribe();
    }
  }

  pub fn generation(&self) -> usize { self.0.rc_deref().generation }
}

impl Subscription for SerialSubscription {
  fn unsubscribe(self) {
    let current = {
      let mut state = self.0.rc_deref_mut();
      state.closed = true;
      state.current.take()
    };
    if let Some(current) = current {
      current.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}
