//! Flattening with at most one running inner observable.
//!
//! `switch_all` unsubscribes the running inner observable whenever a new one
//! arrives; `exhaust_all` keeps the running one and drops the newcomer. Both
//! complete once the outer observable and the running inner one completed,
//! and forward the first error from either after tearing both down.

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::{BoxSubscription, Subscription},
  type_hint::TypeHint,
};

pub struct SwitchAllOp<S, Inner> {
  source: S,
  _hint: TypeHint<Inner>,
}

impl<S: Clone, Inner> Clone for SwitchAllOp<S, Inner> {
  fn clone(&self) -> Self { SwitchAllOp::new(self.source.clone()) }
}

impl<S, Inner> SwitchAllOp<S, Inner> {
  #[inline]
  pub(crate) fn new(source: S) -> Self { SwitchAllOp { source, _hint: TypeHint::new() } }
}

impl<Inner, Item, Err, O, S> Observable<Item, Err, O> for SwitchAllOp<S, Inner>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Inner, Err, OuterObserver<O, Item>>,
  S::Unsub: 'static,
  Inner: Observable<Item, Err, InnerObserver<O>>,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  type Unsub = SingleInnerSubscription<O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    subscribe_single_inner::<S, Inner, Item, Err, O>(self.source, observer, OnBusy::Switch)
  }
}

impl<Inner, Item, Err, S> ObservableExt<Item, Err> for SwitchAllOp<S, Inner>
where
  S: ObservableExt<Inner, Err>,
  Inner: ObservableExt<Item, Err>,
{
}

/// What to do with an inner observable arriving while another one runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OnBusy {
  Switch,
  Ignore,
}

struct SingleInnerState {
  on_busy: OnBusy,
  next_id: usize,
  // id of the running inner, its handle once its subscribe call returned
  active: Option<(usize, Option<BoxSubscription>)>,
  outer: Option<BoxSubscription>,
  outer_done: bool,
  closed: bool,
}

pub struct SingleInnerCtx<O> {
  state: MutRc<SingleInnerState>,
  observer: Subscriber<O>,
}

impl<O> Clone for SingleInnerCtx<O> {
  fn clone(&self) -> Self { SingleInnerCtx { state: self.state.clone(), observer: self.observer.clone() } }
}

pub(crate) fn subscribe_single_inner<S, Inner, Item, Err, O>(
  source: S,
  observer: O,
  on_busy: OnBusy,
) -> SingleInnerSubscription<O>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Inner, Err, OuterObserver<O, Item>>,
  S::Unsub: 'static,
  Inner: Observable<Item, Err, InnerObserver<O>>,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  let ctx = SingleInnerCtx {
    state: MutRc::own(SingleInnerState {
      on_busy,
      next_id: 0,
      active: None,
      outer: None,
      outer_done: false,
      closed: false,
    }),
    observer: Subscriber::new(observer),
  };
  let unsub = source.actual_subscribe(OuterObserver { ctx: ctx.clone(), _hint: TypeHint::new() });
  let keep = {
    let state = ctx.state.rc_deref();
    !state.closed && !state.outer_done
  };
  if keep {
    ctx.state.rc_deref_mut().outer = Some(BoxSubscription::new(unsub));
  } else {
    unsub.unsubscribe();
  }
  SingleInnerSubscription(ctx)
}

impl<O> SingleInnerCtx<O> {
  fn close(&self) -> Option<(Option<BoxSubscription>, Option<BoxSubscription>)> {
    let mut state = self.state.rc_deref_mut();
    if state.closed {
      return None;
    }
    state.closed = true;
    let inner = state.active.take().and_then(|(_, unsub)| unsub);
    Some((inner, state.outer.take()))
  }

  fn fail<Item, Err>(&self, err: Err)
  where
    O: Observer<Item, Err> + 'static,
    Item: 'static,
    Err: 'static,
  {
    if let Some((inner, outer)) = self.close() {
      inner.unsubscribe();
      outer.unsubscribe();
      self.observer.clone().error(err);
    }
  }

  fn complete_if_idle<Item, Err>(&self)
  where
    O: Observer<Item, Err> + 'static,
    Item: 'static,
    Err: 'static,
  {
    let idle = {
      let state = self.state.rc_deref();
      state.outer_done && state.active.is_none()
    };
    if idle && self.close().is_some() {
      Observer::<Item, Err>::complete(self.observer.clone());
    }
  }

  fn is_current(&self, id: usize) -> bool {
    let state = self.state.rc_deref();
    !state.closed && matches!(state.active, Some((active, _)) if active == id)
  }
}

pub struct OuterObserver<O, Item> {
  ctx: SingleInnerCtx<O>,
  _hint: TypeHint<Item>,
}

impl<Inner, Item, Err, O> Observer<Inner, Err> for OuterObserver<O, Item>
where
  O: Observer<Item, Err> + 'static,
  Inner: Observable<Item, Err, InnerObserver<O>>,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, inner: Inner) {
    let (id, replaced) = {
      let mut state = self.ctx.state.rc_deref_mut();
      if state.closed {
        return;
      }
      if state.active.is_some() && state.on_busy == OnBusy::Ignore {
        log::trace!("exhaust_all: inner still running, dropping new one");
        return;
      }
      let id = state.next_id;
      state.next_id += 1;
      let replaced = state.active.replace((id, None)).and_then(|(_, unsub)| unsub);
      (id, replaced)
    };
    if let Some(replaced) = replaced {
      log::trace!("switch_all: switching to inner {}", id);
      replaced.unsubscribe();
    }

    let unsub = inner.actual_subscribe(InnerObserver { ctx: self.ctx.clone(), id });
    let stale = {
      let mut state = self.ctx.state.rc_deref_mut();
      match state.active.as_mut() {
        Some((active, slot)) if *active == id => {
          *slot = Some(BoxSubscription::new(unsub));
          None
        }
        // finished, or replaced, during its own subscribe call
        _ => Some(unsub),
      }
    };
    if let Some(stale) = stale {
      stale.unsubscribe();
    }
  }

  fn error(self, err: Err) { self.ctx.fail::<Item, Err>(err) }

  fn complete(self) {
    {
      let mut state = self.ctx.state.rc_deref_mut();
      state.outer_done = true;
      state.outer = None;
    }
    self.ctx.complete_if_idle::<Item, Err>();
  }

  fn is_finished(&self) -> bool {
    self.ctx.state.rc_deref().closed || Observer::<Item, Err>::is_finished(&self.ctx.observer)
  }
}

pub struct InnerObserver<O> {
  ctx: SingleInnerCtx<O>,
  id: usize,
}

impl<Item, Err, O> Observer<Item, Err> for InnerObserver<O>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, value: Item) {
    if self.ctx.is_current(self.id) {
      self.ctx.observer.next(value);
    }
  }

  fn error(self, err: Err) {
    if self.ctx.is_current(self.id) {
      self.ctx.fail::<Item, Err>(err);
    }
  }

  fn complete(self) {
    if self.ctx.is_current(self.id) {
      self.ctx.state.rc_deref_mut().active = None;
      self.ctx.complete_if_idle::<Item, Err>();
    }
  }

  fn is_finished(&self) -> bool { !self.ctx.is_current(self.id) }
}

pub struct SingleInnerSubscription<O>(SingleInnerCtx<O>);

impl<O> Subscription for SingleInnerSubscription<O> {
  fn unsubscribe(self) {
    if let Some((inner, outer)) = self.0.close() {
      inner.unsubscribe();
      outer.unsubscribe();
    }
    self.0.observer.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.state.rc_deref().closed }
}
