use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::storage::ArtifactStore;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Fixed-interval polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollPolicy {
    /// Total sleep between checks when the budget is spent: one interval
    /// fewer than the number of attempts, since the first check is immediate.
    /// Saturates at `Duration::MAX`.
    pub fn ceiling(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Found { attempts: u32 },
    TimedOut { attempts: u32, storage_errors: u32 },
}

/// Runs existence checks for `search` until one reports a match or the attempt
/// budget is spent. The first check fires immediately; each later one waits
/// `policy.interval` after the previous check resolved.
///
/// Storage errors count as "not there yet". They are logged and tallied so a
/// dead backend is distinguishable from a slow generator.
pub async fn poll_for_artifact<S, F>(
    store: &S,
    search: &str,
    policy: PollPolicy,
    mut on_attempt: F,
) -> PollOutcome
where
    S: ArtifactStore + ?Sized,
    F: FnMut(u32),
{
    let mut storage_errors = 0;

    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(policy.interval).await;
        }

        on_attempt(attempt);

        match store.exists(search).await {
            Ok(true) => {
                info!(attempt, "Artifact for '{}' is available", search);
                return PollOutcome::Found { attempts: attempt };
            }
            Ok(false) => debug!(attempt, "Artifact for '{}' not found yet", search),
            Err(e) => {
                storage_errors += 1;
                warn!(attempt, "Existence check failed, treating as not ready: {e}");
            }
        }
    }

    if policy.max_attempts > 0 && storage_errors == policy.max_attempts {
        error!(
            "All {} existence checks for '{}' failed; storage backend is likely unavailable",
            storage_errors, search
        );
    }

    PollOutcome::TimedOut {
        attempts: policy.max_attempts,
        storage_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Reports a match from `found_on` onwards; fails the checks listed in `failing`.
    struct ScriptedStore {
        found_on: Option<u32>,
        failing: Vec<u32>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedStore {
        fn new(found_on: Option<u32>, failing: Vec<u32>) -> Self {
            Self {
                found_on,
                failing,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArtifactStore for ScriptedStore {
        async fn exists(&self, _search: &str) -> Result<bool, StorageError> {
            let n = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(Instant::now());
                calls.len() as u32
            };
            if self.failing.contains(&n) {
                return Err(StorageError::S3("connection reset".to_string()));
            }
            Ok(self.found_on.is_some_and(|k| n >= k))
        }

        fn public_url(&self, name: &str) -> String {
            format!("http://storage/pdfs/{name}")
        }
    }

    #[test]
    fn test_default_policy_ceiling() {
        let policy = PollPolicy::default();
        assert_eq!(policy.max_attempts, 30);
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert_eq!(policy.ceiling(), Duration::from_secs(58));
    }

    #[test]
    fn test_ceiling_saturates_on_huge_interval() {
        let policy = PollPolicy {
            interval: Duration::from_millis(u64::MAX),
            max_attempts: 30,
        };
        assert_eq!(policy.ceiling(), Duration::MAX);

        let single = PollPolicy {
            interval: Duration::from_secs(2),
            max_attempts: 1,
        };
        assert_eq!(single.ceiling(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_first_match() {
        let store = ScriptedStore::new(Some(3), vec![]);
        let outcome = poll_for_artifact(&store, "Jane Doe", PollPolicy::default(), |_| {}).await;

        assert_eq!(outcome, PollOutcome::Found { attempts: 3 });
        assert_eq!(store.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checks_are_spaced_by_interval() {
        let store = ScriptedStore::new(Some(4), vec![]);
        let start = Instant::now();
        poll_for_artifact(&store, "Jane Doe", PollPolicy::default(), |_| {}).await;

        let calls = store.calls();
        assert_eq!(calls[0], start);
        for pair in calls.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_secs(2));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_budget_then_stops() {
        let store = ScriptedStore::new(None, vec![]);
        let start = Instant::now();
        let outcome = poll_for_artifact(&store, "Jane Doe", PollPolicy::default(), |_| {}).await;

        assert_eq!(
            outcome,
            PollOutcome::TimedOut {
                attempts: 30,
                storage_errors: 0
            }
        );
        assert_eq!(store.calls().len(), 30);
        assert_eq!(Instant::now() - start, Duration::from_secs(58));
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_errors_fail_open() {
        let store = ScriptedStore::new(Some(3), vec![1, 2]);
        let outcome = poll_for_artifact(&store, "Jane Doe", PollPolicy::default(), |_| {}).await;
        assert_eq!(outcome, PollOutcome::Found { attempts: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_storage_errors_are_counted() {
        let policy = PollPolicy {
            interval: Duration::from_millis(500),
            max_attempts: 5,
        };
        let store = ScriptedStore::new(Some(1), (1..=5).collect());
        let outcome = poll_for_artifact(&store, "Jane Doe", policy, |_| {}).await;

        assert_eq!(
            outcome,
            PollOutcome::TimedOut {
                attempts: 5,
                storage_errors: 5
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_each_attempt() {
        let store = ScriptedStore::new(Some(4), vec![]);
        let mut seen = Vec::new();
        poll_for_artifact(&store, "Jane Doe", PollPolicy::default(), |n| seen.push(n)).await;
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }
}
