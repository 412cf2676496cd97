//! # trigga - Event-Hook Dispatch
//!
//! `trigga` lets a function be declared as a **trigger**, lets other
//! functions register as **listeners** against it, and arranges that every
//! listener is invoked with the trigger's result each time the trigger
//! fires — concurrently, joined before the fire call returns.
//!
//! The interesting part is the *binding model*: a single trigger declaration
//! attached to a type yields per-instance listener scoping. Listeners hooked
//! through one instance's bound view never fire for another instance, while
//! class-wide listeners fire for every instance. Named triggers in a
//! [`TriggerGroup`] can additionally be hooked *before* they are declared;
//! the forward-registered listeners migrate onto the real trigger when it
//! arrives.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trigga::{BoxError, Trigger};
//!
//! let identity = Trigger::new(|value: u32| async move { Ok::<_, BoxError>(value) });
//! identity.hook(|value: u32| async move {
//!     println!("saw {value}");
//!     Ok::<_, BoxError>(())
//! });
//!
//! let result = identity.fire(42).await?; // listeners have run and joined
//! assert_eq!(result, 42);
//! ```
//!
//! ## Instance Scoping
//!
//! ```rust,ignore
//! let bump = Trigger::from_method(|counter: Arc<Counter>, by: u32| async move {
//!     Ok::<_, BoxError>(counter.value() + by)
//! });
//!
//! bump.hook(audit);                 // class-wide: fires for every instance
//! bump.bind(&a).hook(only_for_a);   // private: fires only through `a`
//!
//! bump.bind(&a).fire(1).await?;     // runs audit + only_for_a
//! bump.bind(&b).fire(1).await?;     // runs audit only
//! ```
//!
//! ## Dispatch Contract
//!
//! The wrapped function always completes before any listener starts.
//! Listeners run concurrently with no relative-order guarantee; the fire
//! call returns only after all of them finish. The first listener error
//! cancels the still-running siblings and supersedes the trigger's own
//! result ([`DispatchError::Listener`]).

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod delivery;
mod group;
mod mixin;
mod set;
mod trigger;

#[cfg(feature = "tracing")]
pub mod observe;
pub mod testing;

pub use delivery::FanoutDelivery;
pub use group::{BoundTriggerGroup, TriggerGroup};
pub use mixin::Hooked;
pub use set::{ListenerId, Listeners};
pub use trigger::{BoundTrigger, Trigger};

pub use trigga_core::{
    // Error types
    BoxError,
    BoxFuture,
    DeclareError,
    // Delivery strategy
    Delivery,
    DispatchError,
    DynListener,
    // Wrapped callables
    FreeFn,
    HookError,
    // Binding
    InstanceId,
    // Listeners
    Listener,
    LookupError,
    Payload,
    Resolve,
    SharedListener,
    TriggaError,
    TriggerFn,
};

/// Prelude module - common imports for Trigga.
///
/// # Usage
///
/// ```rust,ignore
/// use trigga::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoundTrigger, BoundTriggerGroup, BoxError, Hooked, Listener, Payload, Resolve, Trigger,
        TriggerGroup,
    };
}
