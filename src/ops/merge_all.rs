use std::collections::VecDeque;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::{BoxSubscription, DynamicSubscriptions, Subscription},
  type_hint::TypeHint,
};

/// Flattens an observable of observables, running up to `concurrent` inner
/// observables at once.
///
/// Inner observables arriving while the limit is reached wait in a queue and
/// are subscribed, in arrival order, as running ones complete. The result
/// completes once the outer observable and every inner one completed. The
/// first error from anywhere tears everything down and is forwarded.
pub struct MergeAllOp<S, Inner> {
  source: S,
  concurrent: usize,
  _hint: TypeHint<Inner>,
}

impl<S: Clone, Inner> Clone for MergeAllOp<S, Inner> {
  fn clone(&self) -> Self { MergeAllOp::new(self.source.clone(), self.concurrent) }
}

impl<S, Inner> MergeAllOp<S, Inner> {
  #[inline]
  pub(crate) fn new(source: S, concurrent: usize) -> Self {
    MergeAllOp { source, concurrent: concurrent.max(1), _hint: TypeHint::new() }
  }
}

impl<Inner, Item, Err, O, S> Observable<Item, Err, O> for MergeAllOp<S, Inner>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Inner, Err, OuterObserver<O, Item>>,
  S::Unsub: 'static,
  Inner: Observable<Item, Err, InnerObserver<O>> + 'static,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  type Unsub = MergeSubscription<O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let ctx = MergeCtx {
      state: MutRc::own(MergeState {
        concurrent: self.concurrent,
        active: 0,
        queue: VecDeque::new(),
        inners: DynamicSubscriptions::default(),
        outer: None,
        outer_done: false,
        closed: false,
      }),
      observer: Subscriber::new(observer),
    };
    let unsub = self
      .source
      .actual_subscribe(OuterObserver { ctx: ctx.clone(), _hint: TypeHint::new() });
    {
      let mut state = ctx.state.rc_deref_mut();
      if !state.closed && !state.outer_done {
        state.outer = Some(BoxSubscription::new(unsub));
        drop(state);
        return MergeSubscription(ctx);
      }
    }
    unsub.unsubscribe();
    MergeSubscription(ctx)
  }
}

impl<Inner, Item, Err, S> ObservableExt<Item, Err> for MergeAllOp<S, Inner>
where
  S: ObservableExt<Inner, Err>,
  Inner: ObservableExt<Item, Err>,
{
}

struct MergeState {
  concurrent: usize,
  active: usize,
  // subscribe calls waiting for a free slot
  queue: VecDeque<Box<dyn FnOnce()>>,
  inners: DynamicSubscriptions<BoxSubscription>,
  outer: Option<BoxSubscription>,
  outer_done: bool,
  closed: bool,
}

pub struct MergeCtx<O> {
  state: MutRc<MergeState>,
  observer: Subscriber<O>,
}

impl<O> Clone for MergeCtx<O> {
  fn clone(&self) -> Self { MergeCtx { state: self.state.clone(), observer: self.observer.clone() } }
}

impl<O> MergeCtx<O> {
  /// Mark closed and hand back everything still running.
  fn close(&self) -> Option<(DynamicSubscriptions<BoxSubscription>, Option<BoxSubscription>)> {
    let mut state = self.state.rc_deref_mut();
    if state.closed {
      return None;
    }
    state.closed = true;
    state.queue.clear();
    let inners = std::mem::take(&mut state.inners);
    Some((inners, state.outer.take()))
  }

  fn fail<Item, Err>(&self, err: Err)
  where
    O: Observer<Item, Err> + 'static,
    Item: 'static,
    Err: 'static,
  {
    if let Some((inners, outer)) = self.close() {
      inners.unsubscribe();
      outer.unsubscribe();
      self.observer.clone().error(err);
    }
  }

  fn complete_if_drained<Item, Err>(&self)
  where
    O: Observer<Item, Err> + 'static,
    Item: 'static,
    Err: 'static,
  {
    let done = {
      let state = self.state.rc_deref();
      !state.closed && state.outer_done && state.active == 0
    };
    if done && self.close().is_some() {
      Observer::<Item, Err>::complete(self.observer.clone());
    }
  }
}

fn subscribe_inner<O, Inner, Item, Err>(ctx: MergeCtx<O>, inner: Inner)
where
  O: Observer<Item, Err> + 'static,
  Inner: Observable<Item, Err, InnerObserver<O>>,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  // A placeholder marks the inner as running; an inner that finishes during
  // its own subscribe call removes it before the real handle exists.
  let id = {
    let mut state = ctx.state.rc_deref_mut();
    let id = state.inners.reserve_id();
    state.inners.insert(id, BoxSubscription::new(()));
    log::trace!("merge_all: inner {} subscribed, {} running", id, state.active);
    id
  };
  let unsub = inner.actual_subscribe(InnerObserver { ctx: ctx.clone(), id });
  let mut state = ctx.state.rc_deref_mut();
  if state.inners.remove(id).is_some() {
    state.inners.insert(id, BoxSubscription::new(unsub));
  } else {
    drop(state);
    unsub.unsubscribe();
  }
}

pub struct OuterObserver<O, Item> {
  ctx: MergeCtx<O>,
  _hint: TypeHint<Item>,
}

impl<Inner, Item, Err, O> Observer<Inner, Err> for OuterObserver<O, Item>
where
  O: Observer<Item, Err> + 'static,
  Inner: Observable<Item, Err, InnerObserver<O>> + 'static,
  Inner::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, inner: Inner) {
    let ctx = self.ctx.clone();
    let mut state = self.ctx.state.rc_deref_mut();
    if state.closed {
      return;
    }
    if state.active < state.concurrent {
      state.active += 1;
      drop(state);
      subscribe_inner::<O, Inner, Item, Err>(ctx, inner);
    } else {
      state
        .queue
        .push_back(Box::new(move || subscribe_inner::<O, Inner, Item, Err>(ctx, inner)));
    }
  }

  fn error(self, err: Err) { self.ctx.fail::<Item, Err>(err) }

  fn complete(self) {
    {
      let mut state = self.ctx.state.rc_deref_mut();
      state.outer_done = true;
      state.outer = None;
    }
    self.ctx.complete_if_drained::<Item, Err>();
  }

  fn is_finished(&self) -> bool {
    self.ctx.state.rc_deref().closed || Observer::<Item, Err>::is_finished(&self.ctx.observer)
  }
}

pub struct InnerObserver<O> {
  ctx: MergeCtx<O>,
  id: usize,
}

impl<Item, Err, O> Observer<Item, Err> for InnerObserver<O>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { self.ctx.observer.next(value) }

  fn error(self, err: Err) { self.ctx.fail::<Item, Err>(err) }

  fn complete(self) {
    let queued = {
      let mut state = self.ctx.state.rc_deref_mut();
      if state.closed {
        return;
      }
      state.inners.remove(self.id);
      let queued = state.queue.pop_front();
      if queued.is_none() {
        state.active -= 1;
      }
      queued
    };
    match queued {
      // the slot passes straight to the next queued inner
      Some(subscribe) => subscribe(),
      None => self.ctx.complete_if_drained::<Item, Err>(),
    }
  }

  fn is_finished(&self) -> bool {
    self.ctx.state.rc_deref().closed || Observer::<Item, Err>::is_finished(&self.ctx.observer)
  }
}

pub struct MergeSubscription<O>(MergeCtx<O>);

impl<O> Subscription for MergeSubscription<O> {
  fn unsubscribe(self) {
    if let Some((inners, outer)) = self.0.close() {
      inners.unsubscribe();
      outer.unsubscribe();
    }
    self.0.observer.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.state.rc_deref().closed }
}
