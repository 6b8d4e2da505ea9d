//! # rxlite: a push-based reactive stream engine
//!
//! Create, transform, multicast and recover from errors on asynchronous
//! sequences of values, in the style of [Reactive Extensions](http://reactivex.io/).
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] / [`ObservableExt`] | Lazy sources and the operator chain |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Subject`] | Hot multicast source, also an observer |
//! | [`Scheduler`] | Runs delayed work for time-based operators |
//!
//! Everything runs on one thread: shared state lives in `Rc<RefCell<_>>`
//! and events are delivered synchronously in the caller's context. Time only
//! enters through a [`Scheduler`]; tests use [`TestScheduler`] to drive
//! virtual time by hand.
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** + **`timer`** (default): `LocalScheduler`, on a
//!   `futures` local executor.
//! - **`tokio-scheduler`**: `TokioScheduler`, spawning on the current tokio
//!   `LocalSet`.
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`Scheduler`]: scheduler::Scheduler
//! [`TestScheduler`]: scheduler::TestScheduler

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;
pub mod type_hint;

pub use prelude::*;
