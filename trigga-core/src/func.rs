//! The wrapped-callable abstraction behind every trigger.
//!
//! A trigger is an explicit composition: a struct holding the wrapped
//! callable plus sidecar listener state, exposing an explicit fire operation.
//! [`TriggerFn`] is the callable half of that composition. It is object-safe
//! (triggers store it as `Arc<dyn TriggerFn>`), so it returns a boxed future
//! rather than using native `async fn`.
//!
//! Two callable shapes exist:
//!
//! - **Method form**: `Fn(Arc<S>, A) -> Future` — the callable receives the
//!   instance the trigger was bound to. Covered by the blanket impl.
//! - **Free form**: `Fn(A) -> Future` — the callable's signature
//!   intentionally excludes the instance. Wrap it in [`FreeFn`].

use crate::{error::BoxError, payload::Payload};
use std::{future::Future, pin::Pin, sync::Arc};

/// An owned dynamically typed [`Future`] used by object-safe traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The asynchronous callable wrapped by a trigger.
///
/// `S` is the owning instance type (`()` for free-standing triggers), `A` the
/// argument type (a tuple for multi-argument triggers), and `P` the payload
/// fanned out to listeners.
pub trait TriggerFn<S, A, P>: Send + Sync + 'static
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    /// Run the wrapped callable for the given instance and arguments.
    fn invoke(&self, instance: Arc<S>, args: A) -> BoxFuture<'static, Result<P, BoxError>>;
}

// Blanket impl for method-form closures.
impl<F, Fut, S, A, P> TriggerFn<S, A, P> for F
where
    F: Fn(Arc<S>, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<P, BoxError>> + Send + 'static,
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    fn invoke(&self, instance: Arc<S>, args: A) -> BoxFuture<'static, Result<P, BoxError>> {
        Box::pin((self)(instance, args))
    }
}

/// Adapter turning a plain `Fn(A) -> Future` into a [`TriggerFn`] that
/// ignores the instance it is bound to.
///
/// This is how free-standing triggers and a group's "free function" mode are
/// expressed: the wrapped function's signature never sees the instance.
pub struct FreeFn<F> {
    func: F,
}

impl<F> FreeFn<F> {
    /// Wrap a plain async function.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, Fut, S, A, P> TriggerFn<S, A, P> for FreeFn<F>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<P, BoxError>> + Send + 'static,
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    fn invoke(&self, _instance: Arc<S>, args: A) -> BoxFuture<'static, Result<P, BoxError>> {
        Box::pin((self.func)(args))
    }
}
