//! # Listener Layer
//!
//! Listeners are the receiving side of a trigger: callbacks registered
//! against a trigger and invoked with its result after every fire.
//!
//! # Design Philosophy
//!
//! - **Passive**: Listeners never influence the trigger's own result
//! - **Owned input**: Each listener receives its own clone of the payload,
//!   so no listener can observe another's mutations
//! - **Fallible**: A listener error aborts the whole fan-out (sibling
//!   listeners are cancelled) and surfaces to the fire caller
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Listener`] uses native `async fn` for zero-cost static dispatch.
//! Listener sets store the object-safe [`DynListener`] twin, which every
//! `Listener` implements automatically.

use crate::{error::BoxError, payload::Payload};
use std::{future::Future, pin::Pin, sync::Arc};

/// A callback registered against a trigger.
///
/// Plain async closures are listeners: any `Fn(P) -> Future<Output =
/// Result<(), BoxError>>` implements this trait through the blanket impl
/// below.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Listener<{P}>`",
    label = "missing `Listener` implementation",
    note = "Listeners must implement `on_fire` for the payload type `{P}`."
)]
pub trait Listener<P: Payload>: Send + Sync + 'static {
    /// Called with the trigger's result after every fire.
    fn on_fire(&self, payload: P) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Listener`].
///
/// Use this trait when you need runtime polymorphism (e.g., in a listener
/// set).
pub trait DynListener<P: Payload>: Send + Sync + 'static {
    /// Called with the trigger's result (dynamic dispatch version).
    fn on_fire_dyn<'a>(
        &'a self,
        payload: P,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;
}

// Blanket implementation: any type implementing Listener implements
// DynListener automatically.
impl<P: Payload, T: Listener<P>> DynListener<P> for T {
    fn on_fire_dyn<'a>(
        &'a self,
        payload: P,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(self.on_fire(payload))
    }
}

/// A reference-counted, type-erased listener, as stored in listener sets.
pub type SharedListener<P> = Arc<dyn DynListener<P>>;

// Blanket impl for closures
impl<F, Fut, P> Listener<P> for F
where
    P: Payload,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    fn on_fire(&self, payload: P) -> impl Future<Output = Result<(), BoxError>> + Send {
        (self)(payload)
    }
}
