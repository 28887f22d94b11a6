//! Per-operation time budget threaded from inbound adapters to storage.

use std::time::Duration;

use tokio::time::Instant;

/// Absolute point in time by which an operation must finish.
///
/// Adapters bound the whole operation (pool checkout included) by this
/// instant and push the remaining budget down to the database as a
/// statement timeout.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use backend::domain::Deadline;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let deadline = Deadline::after(Duration::from_secs(5));
/// assert!(!deadline.is_expired());
/// assert!(deadline.remaining() <= Duration::from_secs(5));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline expiring `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    /// Deadline at an explicit instant.
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// Instant accepted by [`tokio::time::timeout_at`].
    pub fn instant(self) -> Instant {
        self.0
    }

    /// Time left before expiry, saturating at zero.
    pub fn remaining(self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(self) -> bool {
        self.remaining().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn remaining_shrinks_as_time_advances() {
        let deadline = Deadline::after(Duration::from_millis(500));
        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(deadline.remaining(), Duration::from_millis(300));
        assert!(!deadline.is_expired());
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn expires_once_budget_is_spent() {
        let deadline = Deadline::after(Duration::from_millis(100));
        tokio::time::advance(Duration::from_millis(150)).await;
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[rstest]
    fn zero_budget_is_already_expired() {
        let deadline = Deadline::at(Instant::now());
        assert!(deadline.is_expired());
    }
}
