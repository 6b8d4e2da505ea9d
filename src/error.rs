//! Error taxonomy shared by producers and operators.
//!
//! Streams are generic over their error type, so these types are a
//! vocabulary rather than a requirement: a producer may emit its own error
//! type, `try_map` may report any `Err`, and `retry` always wraps whatever
//! it gave up on in [`ExhaustedRetryError`].

use thiserror::Error;

/// Errors raised inside a stream pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RxError {
  /// Raised by the producer of a source observable.
  #[error("source error: {0}")]
  Source(String),

  /// Raised by a transformation stage, e.g. a `try_map` closure.
  #[error("operator error: {0}")]
  Operator(String),
}

impl RxError {
  pub fn source(msg: impl Into<String>) -> Self { RxError::Source(msg.into()) }

  pub fn operator(msg: impl Into<String>) -> Self { RxError::Operator(msg.into()) }

  /// Stable short label, for log fields and assertions.
  pub fn as_label(&self) -> &'static str {
    match self {
      RxError::Source(_) => "source_error",
      RxError::Operator(_) => "operator_error",
    }
  }
}

/// Emitted by `retry` once its budget is used up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("gave up after {attempts} attempts, last error: {last}")]
pub struct ExhaustedRetryError<E> {
  /// Total subscriptions made, the first one included.
  pub attempts: usize,
  /// The error that ended the final attempt.
  pub last: E,
}

impl<E> ExhaustedRetryError<E> {
  pub fn as_label(&self) -> &'static str { "exhausted_retry" }

  pub fn into_last(self) -> E { self.last }
}
