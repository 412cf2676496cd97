//! Error types for Trigga.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`TriggaError`] - Top-level error type for all Trigga operations
//! - [`DeclareError`] - Errors raised when declaring a named trigger
//! - [`LookupError`] - Errors raised when resolving a named trigger
//! - [`HookError`] - Errors raised when registering a listener by name
//! - [`DispatchError`] - Errors raised while firing a trigger

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Trigga operations.
#[derive(Error, Debug)]
pub enum TriggaError {
    /// An error occurred while declaring a named trigger.
    #[error("declare error: {0}")]
    Declare(#[from] DeclareError),

    /// An error occurred while resolving a named trigger.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// An error occurred while registering a listener.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// An error occurred while firing a trigger.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur when declaring a named trigger in a group.
#[derive(Error, Debug)]
pub enum DeclareError {
    /// The name already holds a declared trigger. The existing trigger and
    /// its listeners are left untouched.
    #[error("trigger \"{0}\" is already defined")]
    AlreadyDefined(String),

    /// The name was forward-hooked with listeners for a different payload
    /// type than the one the declaration produces.
    #[error(
        "trigger \"{name}\" was forward-hooked for payload `{expected}`, \
         but the declaration produces `{found}`"
    )]
    PayloadMismatch {
        /// The trigger name being declared.
        name: String,
        /// The payload type the forward hooks expect.
        expected: &'static str,
        /// The payload type the declaration produces.
        found: &'static str,
    },
}

/// Errors that can occur when resolving a named trigger.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No entry exists under this name.
    #[error("no trigger named \"{0}\"")]
    Unknown(String),

    /// The name has been hooked but not yet declared; it cannot be fired.
    #[error("trigger \"{0}\" has not been declared yet")]
    NotYetDeclared(String),

    /// The entry exists but does not match the requested argument/payload
    /// types.
    #[error("trigger \"{name}\" does not have the requested type (payload is `{payload}`)")]
    WrongType {
        /// The trigger name that was looked up.
        name: String,
        /// The payload type the declared trigger actually carries.
        payload: &'static str,
    },
}

/// Errors that can occur when registering a listener on a named trigger.
#[derive(Error, Debug)]
pub enum HookError {
    /// The listener's payload type does not match the trigger's.
    #[error(
        "trigger \"{name}\" carries payload `{expected}`, \
         but the listener expects `{found}`"
    )]
    PayloadMismatch {
        /// The trigger name being hooked.
        name: String,
        /// The payload type the entry carries.
        expected: &'static str,
        /// The payload type the listener expects.
        found: &'static str,
    },

    /// An instance-scoped registration was attempted on a name that has not
    /// been declared; only class-wide forward hooks are possible before
    /// declaration.
    #[error("trigger \"{0}\" has not been declared yet, cannot scope a hook to an instance")]
    ScopedOnPlaceholder(String),
}

/// Errors that can occur while firing a trigger.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The wrapped trigger function failed. No listeners were run.
    #[error("trigger function failed")]
    Trigger(#[source] BoxError),

    /// A listener failed. Still-running sibling listeners were cancelled and
    /// the trigger's own result is discarded.
    #[error("listener failed")]
    Listener(#[source] BoxError),
}

// Convenience conversions
impl From<BoxError> for TriggaError {
    fn from(err: BoxError) -> Self {
        TriggaError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Listener(err)
    }
}
