use crate::*;
use retry::delay::{jitter, Fibonacci};
use std::time::Duration;
use url::Url;


/// Hide everything after the host, webhooks carry their secret in the path
pub fn redact(url: &Url) -> String {
    match url.host_str() {
        Some(host) => format!("{}://{}/…", url.scheme(), host),
        None => format!("{}://…", url.scheme()),
    }
}


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Bounded retry policy with jittered Fibonacci backoff
pub struct RetryPolicy {
    /// Total attempts, first one included
    pub attempts: u32,

    /// Backoff base delay
    pub base_delay: Duration,
}


impl RetryPolicy {
    /// Policy with given attempts and base delay
    pub fn new(attempts: u32, base_delay: Duration) -> RetryPolicy {
        RetryPolicy {
            attempts,
            base_delay,
        }
    }


    /// Single attempt, no retries
    pub fn once() -> RetryPolicy {
        RetryPolicy::new(1, Duration::from_millis(0))
    }


    /// Delays between consecutive attempts
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        Fibonacci::from_millis(base_ms.max(1))
            .map(jitter)
            .take(self.attempts.saturating_sub(1) as usize)
    }
}


impl Default for RetryPolicy {
    fn default() -> RetryPolicy {
        RetryPolicy::new(
            DEFAULT_ATTEMPTS,
            Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        )
    }
}
