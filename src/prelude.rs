//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Factories live in the module itself: `observable::of(1)`
pub use crate::observable;
pub use crate::{
  error::{ExhaustedRetryError, RxError},
  observable::{BoxObservable, Emitter, Observable, ObservableExt},
  observer::Observer,
  ops::{
    group_by::GroupObservable,
    retry::{RetryConfig, RetryPolicy},
  },
  subject::{BehaviorSubject, ReplaySubject, Subject, SubjectState},
  subscriber::Subscriber,
  subscription::*,
};
// Scheduler
#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
pub use crate::scheduler::LocalScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioScheduler;
pub use crate::scheduler::{Duration, Scheduler, TaskHandle, TaskState, TestScheduler};
