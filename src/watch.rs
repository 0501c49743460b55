//! Provisioning watcher
//!
//! Polls a product's provisioning status on a fixed interval until it
//! reaches the expected state. The watcher only retries status reads; a
//! failed read ends the wait immediately.
//!
//! ```text
//! polling --match--> live
//!    |--read error--> errored
//!    `--attempts or deadline exhausted--> timed_out
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::types::{ProductType, ProvisioningStatus};

/// Polling schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Time between two status reads
    pub interval: Duration,
    /// Maximum number of status reads
    pub max_attempts: u32,
    /// Optional bound on the whole wait, independent of the attempt count
    pub deadline: Option<Duration>,
}

impl Default for WaitOptions {
    /// 30 reads, 10 seconds apart: about five minutes
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 30,
            deadline: None,
        }
    }
}

impl WaitOptions {
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Poll `read` until it reports `expected`.
///
/// Returns `Ok(true)` after the first matching read; the value is never
/// `false`, every failure is an `Err`. A read error is returned
/// as-is. Running out of attempts, or hitting the deadline, returns
/// [`Error::ProvisionTimeout`] naming `family`. Dropping the future cancels the
/// wait.
pub async fn wait_until<F, Fut>(
    product_id: &str,
    family: ProductType,
    expected: &ProvisioningStatus,
    options: WaitOptions,
    mut read: F,
) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ProvisioningStatus>>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    let poll = async {
        // interval() panics on a zero period
        let period = options.interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while attempts < options.max_attempts {
            // First tick completes immediately
            ticker.tick().await;
            attempts += 1;

            let status = read().await?;
            if &status == expected {
                tracing::debug!(
                    "{} {} reached {} after {} status checks",
                    family,
                    product_id,
                    expected,
                    attempts
                );
                return Ok(true);
            }

            if status.is_terminal() {
                tracing::warn!(
                    "{} {} is {}, which will not change to {}",
                    family,
                    product_id,
                    status,
                    expected
                );
            }

            tracing::debug!(
                status = %status,
                product_id = %product_id,
                attempt = attempts,
                "{} status is currently {:?} - waiting",
                family,
                status.as_str()
            );
        }

        Ok::<bool, Error>(false)
    };

    let finished = match options.deadline {
        Some(deadline) => match tokio::time::timeout(deadline, poll).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Deadline of {:?} reached waiting for {} {}", deadline, family, product_id);
                Ok(false)
            }
        },
        None => poll.await,
    };

    match finished {
        Ok(true) => Ok(true),
        Ok(false) => Err(Error::ProvisionTimeout {
            family,
            product_id: product_id.to_string(),
            attempts,
            elapsed: started.elapsed(),
        }),
        Err(e) => {
            tracing::debug!("Status read for {} {} failed: {}", family, product_id, e);
            Err(e)
        }
    }
}
