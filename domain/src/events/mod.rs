//! Typed progress events and the transcript fold over them.

pub mod event;
pub mod transcript;

pub use event::DeliberationEvent;
pub use transcript::Transcript;
