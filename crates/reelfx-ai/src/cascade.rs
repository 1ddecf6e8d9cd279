//! Provider cascade: retry on transient failures, move on after permanent
//! ones, fall back locally once every provider is exhausted.
//!
//! The transitions are a pure function ([`CascadePolicy::next_state`]) so the
//! ordering rules can be tested without any I/O. [`run_cascade`] drives them
//! against real providers, sequentially.

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::provider::{FailureKind, OverlayProvider, ProviderFailure};

/// Where the cascade currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    /// First attempt against provider `i`.
    TryProvider(usize),
    /// Attempt `n` (2-based) against provider `i`.
    RetryProvider(usize, u32),
    LocalFallback,
    Done,
}

impl CascadeState {
    /// 1-based attempt number on the current provider, if calling one.
    pub fn attempt(&self) -> Option<u32> {
        match *self {
            CascadeState::TryProvider(_) => Some(1),
            CascadeState::RetryProvider(_, n) => Some(n),
            _ => None,
        }
    }

    pub fn provider_index(&self) -> Option<usize> {
        match *self {
            CascadeState::TryProvider(i) | CascadeState::RetryProvider(i, _) => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for CascadeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CascadeState::TryProvider(i) => write!(f, "try provider {i}"),
            CascadeState::RetryProvider(i, n) => write!(f, "retry provider {i} (attempt {n})"),
            CascadeState::LocalFallback => f.write_str("local fallback"),
            CascadeState::Done => f.write_str("done"),
        }
    }
}

/// Result of one step, fed back into the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failed(FailureKind),
}

/// Transition rules for a fixed number of providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadePolicy {
    pub provider_count: usize,
    /// Total attempts per provider; values below 1 mean 1.
    pub max_retries: u32,
}

impl CascadePolicy {
    pub fn new(provider_count: usize, max_retries: u32) -> Self {
        Self {
            provider_count,
            max_retries,
        }
    }

    pub fn start(&self) -> CascadeState {
        self.provider_or_fallback(0)
    }

    fn provider_or_fallback(&self, index: usize) -> CascadeState {
        if index < self.provider_count {
            CascadeState::TryProvider(index)
        } else {
            CascadeState::LocalFallback
        }
    }

    pub fn next_state(&self, state: CascadeState, outcome: StepOutcome) -> CascadeState {
        let (index, attempt) = match state {
            CascadeState::TryProvider(i) => (i, 1),
            CascadeState::RetryProvider(i, n) => (i, n),
            CascadeState::LocalFallback | CascadeState::Done => return CascadeState::Done,
        };
        match outcome {
            StepOutcome::Success => CascadeState::Done,
            StepOutcome::Failed(FailureKind::Transient) if attempt < self.max_retries.max(1) => {
                CascadeState::RetryProvider(index, attempt + 1)
            }
            StepOutcome::Failed(_) => self.provider_or_fallback(index + 1),
        }
    }
}

/// One provider call as it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub provider: String,
    pub attempt: u32,
    /// `None` when the attempt produced a usable result.
    pub error: Option<String>,
    pub transient: bool,
}

/// What the cascade produced.
#[derive(Debug)]
pub struct CascadeRun<T> {
    /// Accepted value, or `None` when the local fallback is due.
    pub value: Option<T>,
    /// Provider that produced `value`.
    pub provider: Option<String>,
    pub attempts: Vec<AttemptRecord>,
}

/// Drive the cascade over `providers` with `prompt`.
///
/// `accept` turns reply text into a usable value or rejects it; a rejection
/// counts as a failure of that attempt. Attempts run one at a time, and
/// `retry_delay` is slept before every retry on the same provider.
pub async fn run_cascade<T, F>(
    providers: &[Box<dyn OverlayProvider>],
    policy: CascadePolicy,
    retry_delay: Duration,
    prompt: &str,
    mut accept: F,
) -> CascadeRun<T>
where
    F: FnMut(&str) -> Result<T, ProviderFailure>,
{
    let mut attempts = Vec::new();
    let mut state = policy.start();

    while let (Some(index), Some(attempt)) = (state.provider_index(), state.attempt()) {
        let Some(provider) = providers.get(index) else {
            break;
        };
        if attempt > 1 && !retry_delay.is_zero() {
            debug!(
                provider = provider.name(),
                attempt,
                delay_ms = retry_delay.as_millis() as u64,
                "waiting before retry"
            );
            tokio::time::sleep(retry_delay).await;
        }

        let result = provider
            .complete(prompt)
            .await
            .and_then(|content| accept(&content));
        let outcome = match result {
            Ok(value) => {
                info!(provider = provider.name(), attempt, "provider succeeded");
                attempts.push(AttemptRecord {
                    provider: provider.name().to_string(),
                    attempt,
                    error: None,
                    transient: false,
                });
                return CascadeRun {
                    value: Some(value),
                    provider: Some(provider.name().to_string()),
                    attempts,
                };
            }
            Err(failure) => {
                warn!(
                    provider = provider.name(),
                    attempt,
                    kind = %failure.kind,
                    reason = %failure.reason,
                    "provider attempt failed"
                );
                attempts.push(AttemptRecord {
                    provider: provider.name().to_string(),
                    attempt,
                    error: Some(failure.reason.clone()),
                    transient: failure.is_transient(),
                });
                StepOutcome::Failed(failure.kind)
            }
        };
        state = policy.next_state(state, outcome);
    }

    CascadeRun {
        value: None,
        provider: None,
        attempts,
    }
}
