//! Operational hook contract for timing provider calls.
//!
//! Calls are attempted exactly once. Hooks observe the outcome; they never
//! change it.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::ProviderError;

pub trait ProviderOperationHooks: Send + Sync {
    fn on_operation_start(&self, _operation: &str, _model: &str) {}

    fn on_success(&self, _operation: &str, _model: &str, _elapsed: Duration) {}

    fn on_failure(&self, _operation: &str, _model: &str, _error: &ProviderError, _elapsed: Duration) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Awaits `future` once and reports its outcome to `hooks`.
pub async fn execute_observed<T, F>(
    operation: &str,
    model: &str,
    hooks: &dyn ProviderOperationHooks,
    future: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    hooks.on_operation_start(operation, model);
    let started = Instant::now();

    match future.await {
        Ok(value) => {
            hooks.on_success(operation, model, started.elapsed());
            Ok(value)
        }
        Err(error) => {
            hooks.on_failure(operation, model, &error, started.elapsed());
            Err(error)
        }
    }
}
