use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub const MAX_ATTEMPTS: u32 = 3;
pub const BACKOFF: Duration = Duration::from_millis(1500);

/// Terminal state of one retry-loop run.
#[derive(Debug)]
pub enum LoadOutcome<T, E> {
    Loaded(T),
    Failed(E),
    /// The owner tore the loader down; nothing may be committed.
    Cancelled,
}

/// Retry loop for a screen whose initial data is absent: up to
/// `MAX_ATTEMPTS` fetches spaced by a fixed `BACKOFF`, stopping at the
/// first success. One run, no overlapping attempts.
///
/// The cancellation token is honored before every attempt, after every
/// sleep, and before the outcome is returned, so a cancelled loader never
/// commits a result and never schedules another attempt. `fetch` and
/// `sleep` are injected so tests can observe call counts and spacing.
pub fn run<T, E>(
    mut fetch: impl FnMut() -> Result<T, E>,
    mut sleep: impl FnMut(Duration),
    cancelled: &AtomicBool,
    mut progress: impl FnMut(u32),
) -> LoadOutcome<T, E> {
    let mut last_error = None;

    for attempt in 1..=MAX_ATTEMPTS {
        if cancelled.load(Ordering::Relaxed) {
            return LoadOutcome::Cancelled;
        }
        progress(attempt);

        match fetch() {
            Ok(value) => {
                if cancelled.load(Ordering::Relaxed) {
                    return LoadOutcome::Cancelled;
                }
                return LoadOutcome::Loaded(value);
            }
            Err(error) => {
                tracing::warn!(attempt, max = MAX_ATTEMPTS, "initial load attempt failed");
                last_error = Some(error);
                if attempt < MAX_ATTEMPTS {
                    sleep(BACKOFF);
                }
            }
        }
    }

    if cancelled.load(Ordering::Relaxed) {
        return LoadOutcome::Cancelled;
    }
    match last_error {
        Some(error) => LoadOutcome::Failed(error),
        // Unreachable while MAX_ATTEMPTS >= 1.
        None => LoadOutcome::Cancelled,
    }
}
