use super::Subscription;
use crate::rc::{MutRc, RcDeref, RcDerefMut};

/// A subscription owning one teardown closure.
///
/// Clones share the closure; whichever clone unsubscribes first runs it and
/// every later call is a no-op.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let teardown = Teardown::new(|| println!("released"));
/// teardown.clone().unsubscribe();
/// teardown.unsubscribe(); // nothing printed the second time
/// ```
#[derive(Clone)]
pub struct Teardown(MutRc<Option<Box<dyn FnOnce()>>>);

impl Teardown {
  pub fn new(f: impl FnOnce() + 'static) -> Self { Teardown(MutRc::own(Some(Box::new(f)))) }

  /// A teardown with nothing to do, already closed.
  pub fn closed() -> Self { Teardown(MutRc::own(None)) }
}

impl Subscription for Teardown {
  fn unsubscribe(self) {
    let f = self.0.rc_deref_mut().take();
    if let Some(f) = f {
      f();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().is_none() }
}
