//! Testing utilities for Trigga.
//!
//! This module provides ready-made listeners for asserting on dispatch:
//!
//! - [`RecordingListener`]: records every payload it receives
//! - [`CountingListener`]: counts fires without looking at the payload
//! - [`FailingListener`]: always errors, for cancellation tests

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use trigga_core::{BoxError, Listener, Payload};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records every payload it receives.
///
/// Clones share the same recording, so a clone can be hooked while the
/// original is kept for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let capture = RecordingListener::new();
/// trigger.hook(capture.clone());
///
/// trigger.fire(args).await?;
/// assert_eq!(capture.received(), vec![expected]);
/// ```
pub struct RecordingListener<P: Payload> {
    events: Arc<Mutex<Vec<P>>>,
}

impl<P: Payload> RecordingListener<P> {
    /// Create a new empty recorder.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All payloads received so far, in arrival order.
    pub fn received(&self) -> Vec<P> {
        self.events.lock().unwrap().clone()
    }

    /// The most recent payload, if any.
    pub fn last(&self) -> Option<P> {
        self.events.lock().unwrap().last().cloned()
    }

    /// The number of payloads received so far.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl<P: Payload> Listener<P> for RecordingListener<P> {
    async fn on_fire(&self, payload: P) -> Result<(), BoxError> {
        self.events.lock().unwrap().push(payload);
        Ok(())
    }
}

impl<P: Payload> Clone for RecordingListener<P> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<P: Payload> Default for RecordingListener<P> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts fires, accepting any payload type.
#[derive(Clone, Default)]
pub struct CountingListener {
    fired: Arc<AtomicUsize>,
}

impl CountingListener {
    /// Create a new counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of fires observed so far.
    pub fn count(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl<P: Payload> Listener<P> for CountingListener {
    async fn on_fire(&self, _payload: P) -> Result<(), BoxError> {
        self.fired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that always fails with the given message.
#[derive(Clone)]
pub struct FailingListener {
    message: &'static str,
}

impl FailingListener {
    /// Create a listener failing with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<P: Payload> Listener<P> for FailingListener {
    async fn on_fire(&self, _payload: P) -> Result<(), BoxError> {
        Err(self.message.into())
    }
}
