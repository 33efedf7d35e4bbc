//! The operations this crate exists for: running a full deliberation,
//! running a follow-up thread, and the fan-out machinery both share.

pub mod executor;
pub mod model_client;
pub mod run_council;
pub mod run_thread;
