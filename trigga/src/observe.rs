//! Tracing integration for listeners.
//!
//! Only compiled with the `tracing` cargo feature.

use std::fmt::Debug;
use tracing::Instrument;
use trigga_core::{BoxError, Listener, Payload};

/// A listener wrapper that instruments execution with a `tracing` span.
///
/// The span records the listener's name and the payload it received.
pub struct TracingListener<L> {
    inner: L,
    name: &'static str,
}

impl<L> TracingListener<L> {
    /// Wrap a listener under the given span name.
    pub const fn new(inner: L, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<L: Clone> Clone for TracingListener<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<P, L> Listener<P> for TracingListener<L>
where
    P: Payload + Debug,
    L: Listener<P>,
{
    async fn on_fire(&self, payload: P) -> Result<(), BoxError> {
        let span = tracing::debug_span!(
            "listener_fire",
            listener = %self.name,
            payload = ?payload
        );
        self.inner.on_fire(payload).instrument(span).await
    }
}
