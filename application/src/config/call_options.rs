//! Per-call behavior for model calls.

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Controls how individual model calls behave.
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Maximum time to wait for one model call before treating it as
    /// failed. Bounded by default; an explicit `None` defers entirely
    /// to the transport's own limits.
    pub timeout: Option<Duration>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}
