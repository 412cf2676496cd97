//! Delivery strategy trait.
//!
//! The concurrent spawn/join primitive is consumed, not owned: the trigger
//! core resolves a listener snapshot and hands it to a [`Delivery`]
//! implementation together with the payload. The strategy decides how the
//! listeners are executed; the contract it must honor is fan-out/join with
//! structured cancellation (all listeners complete before `deliver` returns,
//! and the first failure cancels the still-running siblings).

use crate::{error::DispatchError, listener::SharedListener, payload::Payload};
use std::future::Future;

/// Strategy for delivering a payload to a resolved set of listeners.
pub trait Delivery: Send + Sync {
    /// Deliver the payload to every listener, joining before returning.
    ///
    /// Each listener receives its own clone of the payload. The first
    /// listener error cancels the remaining siblings and is reported as
    /// [`DispatchError::Listener`].
    fn deliver<'a, P: Payload>(
        &'a self,
        payload: &'a P,
        listeners: &'a [SharedListener<P>],
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}
