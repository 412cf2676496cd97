//! # trigga-core
//!
//! Core traits for the Trigga event-hook dispatch library.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that defines listeners or delivery strategies without needing the
//! full `trigga` implementation.
//!
//! # The Binding Model
//!
//! Trigga is built around four seams, each a trait in this crate:
//!
//! ## Wrapped Callable ([`TriggerFn`])
//!
//! A trigger wraps an asynchronous callable. The callable either receives
//! the instance the trigger was bound to (method form) or intentionally
//! ignores it ([`FreeFn`], free form). The trigger composes the callable
//! with sidecar listener state and exposes an explicit fire operation.
//!
//! ## Listener ([`Listener`])
//!
//! The receiving side: a callback invoked with the trigger's result after
//! every fire. Plain async closures are listeners. Listener sets store the
//! object-safe [`DynListener`] twin.
//!
//! ## Binding ([`Resolve`], [`InstanceId`])
//!
//! One declaration, many scopes: resolving a trigger (or a whole group)
//! against an instance yields a bound view whose listener set is the union
//! of that instance's private registrations and the shared class-wide ones.
//! Identity is the `Arc` allocation address, never value equality.
//!
//! ## Delivery ([`Delivery`])
//!
//! The concurrent fan-out/join primitive, consumed as a collaborator: the
//! core resolves a listener snapshot and delegates execution. The contract
//! is structured — join everything, cancel siblings on the first failure.
//!
//! # Error Types
//!
//! - [`TriggaError`] - Top-level error type
//! - [`DeclareError`] / [`LookupError`] / [`HookError`] - registry errors
//! - [`DispatchError`] - fire-time errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod binding;
mod delivery;
mod error;
mod func;
mod listener;
mod payload;

// Re-exports
pub use binding::{InstanceId, Resolve};
pub use delivery::Delivery;
pub use error::{BoxError, DeclareError, DispatchError, HookError, LookupError, TriggaError};
pub use func::{BoxFuture, FreeFn, TriggerFn};
pub use listener::{DynListener, Listener, SharedListener};
pub use payload::Payload;
