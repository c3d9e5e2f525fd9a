//! Bounded poller
//!
//! Repeatedly evaluates an async predicate at a fixed interval until it yields
//! a value or a wall-clock deadline passes.
//!
//! The poller always sleeps one interval before the first evaluation, since
//! remote state is almost never ready right after the request that changes it.
//! The first evaluation is unconditional; every later one only happens while
//! the time elapsed since entry is below the deadline. A predicate that
//! succeeds is never second-guessed by the deadline.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant};

/// Errors building a poll configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollConfigError {
    #[error("poll interval must be greater than 0")]
    ZeroInterval,

    #[error("poll deadline must be greater than 0")]
    ZeroDeadline,
}

/// Pacing and bound of a single poll
///
/// `interval` may be larger than `deadline`; the predicate is still consulted
/// once in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    deadline: Duration,
}

impl PollConfig {
    /// Creates a poll configuration, rejecting zero durations
    pub fn new(interval: Duration, deadline: Duration) -> Result<Self, PollConfigError> {
        if interval.is_zero() {
            return Err(PollConfigError::ZeroInterval);
        }
        if deadline.is_zero() {
            return Err(PollConfigError::ZeroDeadline);
        }
        Ok(Self { interval, deadline })
    }

    /// Time slept before each evaluation
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Maximum time the poll may run, measured from entry
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

/// How a poll ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The predicate produced a value
    Success(T),

    /// The deadline passed before the predicate produced a value
    TimedOut { elapsed: Duration },
}

/// Polls `predicate` until it yields a value or `config.deadline` elapses
///
/// An error from the predicate ends the poll immediately and is returned
/// as-is; it is never retried.
pub async fn poll<T, E, F, Fut>(config: PollConfig, mut predicate: F) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let started = Instant::now();
    time::sleep(config.interval).await;

    loop {
        if let Some(value) = predicate().await? {
            return Ok(PollOutcome::Success(value));
        }

        time::sleep(config.interval).await;

        let elapsed = started.elapsed();
        if elapsed >= config.deadline {
            return Ok(PollOutcome::TimedOut { elapsed });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn config(interval_secs: u64, deadline_secs: u64) -> PollConfig {
        PollConfig::new(
            Duration::from_secs(interval_secs),
            Duration::from_secs(deadline_secs),
        )
        .unwrap()
    }

    #[test]
    fn test_config_rejects_zero_durations() {
        assert_eq!(
            PollConfig::new(Duration::ZERO, Duration::from_secs(1)),
            Err(PollConfigError::ZeroInterval)
        );
        assert_eq!(
            PollConfig::new(Duration::from_secs(1), Duration::ZERO),
            Err(PollConfigError::ZeroDeadline)
        );
    }

    #[test]
    fn test_config_allows_interval_above_deadline() {
        let config = config(10, 2);
        assert_eq!(config.interval(), Duration::from_secs(10));
        assert_eq!(config.deadline(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_third_check() {
        let mut calls = 0u32;
        let started = Instant::now();

        let outcome = poll(config(1, 5), || {
            calls += 1;
            let n = calls;
            async move { Ok::<_, Infallible>((n == 3).then_some("handle")) }
        })
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Success("handle"));
        assert_eq!(calls, 3);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_never_ready() {
        let mut calls = 0u32;
        let started = Instant::now();

        let outcome = poll(config(1, 2), || {
            calls += 1;
            async { Ok::<Option<()>, Infallible>(None) }
        })
        .await
        .unwrap();

        let elapsed = started.elapsed();
        assert_eq!(outcome, PollOutcome::TimedOut { elapsed });
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluation_count_is_bounded() {
        for (interval, deadline) in [(1, 1), (1, 5), (2, 5), (3, 10), (4, 4), (7, 3)] {
            let mut calls = 0u64;
            let started = Instant::now();

            let outcome = poll(config(interval, deadline), || {
                calls += 1;
                async { Ok::<Option<()>, Infallible>(None) }
            })
            .await
            .unwrap();

            assert!(matches!(outcome, PollOutcome::TimedOut { .. }));
            assert!(started.elapsed() >= Duration::from_secs(deadline));
            assert!(calls >= 1);
            assert!(calls <= deadline.div_ceil(interval) + 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_longer_than_deadline_checks_once() {
        let mut calls = 0u32;

        let outcome = poll(config(10, 2), || {
            calls += 1;
            async { Ok::<_, Infallible>(Some(42)) }
        })
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Success(42));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_does_not_evaluate_again() {
        for _ in 0..2 {
            let mut calls = 0u32;
            let started = Instant::now();
            let outcome = poll(config(1, 5), || {
                calls += 1;
                async { Ok::<_, Infallible>(Some("resolved")) }
            })
            .await
            .unwrap();

            assert_eq!(outcome, PollOutcome::Success("resolved"));
            assert_eq!(calls, 1);
            assert_eq!(started.elapsed(), Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_predicate_error_stops_polling() {
        let mut calls = 0u32;

        let result: Result<PollOutcome<()>, &str> = poll(config(1, 60), || {
            calls += 1;
            async { Err("connection reset") }
        })
        .await;

        assert_eq!(result, Err("connection reset"));
        assert_eq!(calls, 1);
    }
}
