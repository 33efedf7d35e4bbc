//! Configuration consumed by the use cases:
//!
//! - [`CouncilConfig`] — roster and chairman for a deliberation
//! - [`CallOptions`] — per-call behavior such as the model-call timeout

pub mod call_options;
pub mod council_config;

pub use call_options::CallOptions;
pub use council_config::CouncilConfig;
