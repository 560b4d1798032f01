//! Bounded confirmation polling

use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::TargetError;

/// Polls a check until it yields a value or the timeout expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Poller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Run `check` until it returns `Ok(Some(_))`
    ///
    /// `Ok(None)` means "not yet". Errors from the check end polling
    /// immediately. The check always runs at least once.
    pub fn wait<T, F>(&self, tx: &str, mut check: F) -> Result<T, TargetError>
    where
        F: FnMut() -> Result<Option<T>, TargetError>,
    {
        let started = Instant::now();
        loop {
            if let Some(value) = check()? {
                return Ok(value);
            }
            let waited = started.elapsed();
            if waited >= self.timeout {
                return Err(TargetError::Timeout {
                    tx: tx.to_string(),
                    waited,
                });
            }
            thread::sleep(self.interval.min(self.timeout - waited));
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_secs(30))
    }
}
