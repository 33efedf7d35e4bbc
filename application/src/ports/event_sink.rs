//! Event delivery port
//!
//! The orchestrator pushes [`DeliberationEvent`]s into a sink as they
//! happen; it never buffers, replays, or waits for consumers. What a
//! sink does with an event (render it, forward it over a channel, drop
//! it) is entirely its own business.

use std::sync::Arc;

use council_domain::DeliberationEvent;
use tokio::sync::mpsc;

/// Passive receiver for deliberation progress events
///
/// `emit` is intentionally synchronous and non-fallible: a slow or
/// broken consumer must never stall or fail a running deliberation.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DeliberationEvent);
}

/// No-op sink for tests and headless runs
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &DeliberationEvent) {}
}

/// Sink that forwards events over an unbounded channel
///
/// The push-capable transport boundary: a remote consumer holds the
/// [`EventStream`] end. An unbounded channel keeps `emit` non-blocking;
/// a dropped receiver just discards further events.
pub struct ChannelEmitter {
    sender: mpsc::UnboundedSender<DeliberationEvent>,
}

impl ChannelEmitter {
    pub fn new() -> (Self, EventStream) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, EventStream { receiver })
    }
}

impl EventSink for ChannelEmitter {
    fn emit(&self, event: &DeliberationEvent) {
        let _ = self.sender.send(event.clone());
    }
}

/// Receiving end of a [`ChannelEmitter`]
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<DeliberationEvent>,
}

impl EventStream {
    /// Next event, or `None` once the emitter is dropped
    pub async fn next(&mut self) -> Option<DeliberationEvent> {
        self.receiver.recv().await
    }

    /// Drain the stream and collect every remaining event
    pub async fn collect_all(mut self) -> Vec<DeliberationEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.receiver.recv().await {
            events.push(event);
        }
        events
    }
}

/// Sink that forwards every event to several sinks in order
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: &DeliberationEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}
