//! Contracts the outer layers implement.
//!
//! Use cases talk to the outside world only through these traits;
//! infrastructure and presentation supply the adapters.

pub mod conversation_store;
pub mod event_sink;
pub mod llm_gateway;
pub mod prompt_source;
