//! Triggers and their instance-bound views.
//!
//! A [`Trigger`] composes a wrapped callable with two kinds of listener
//! storage: the class-wide set, shared by every view, and a lazily-populated
//! map of per-instance sets keyed by identity. Resolving the trigger against
//! an instance yields a [`BoundTrigger`] — an ephemeral view holding handles
//! to the instance's own set and the class set; the listener set it observes
//! is the union of the two, computed fresh at each fire.
//!
//! Firing awaits the wrapped callable first, then fans the result out to the
//! resolved listeners and joins before returning. The wrapped callable always
//! completes before any listener starts.

use crate::{
    delivery::FanoutDelivery,
    set::{ListenerId, Listeners},
};
use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};
use trigga_core::{
    BoxError, Delivery, DispatchError, FreeFn, InstanceId, Listener, Payload, Resolve,
    SharedListener, TriggerFn,
};

struct InstanceSlot<S, P: Payload> {
    // Keeps the instance allocation alive so the identity key stays unique.
    _anchor: Arc<S>,
    listeners: Listeners<P>,
}

/// A declared trigger: a wrapped callable that notifies listeners with its
/// result on every fire.
///
/// `S` is the owning instance type — `()` for free-standing triggers, which
/// can be fired without binding. Method triggers (`S` a real type) are fired
/// through the [`BoundTrigger`] view produced by [`Trigger::bind`].
pub struct Trigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    func: Arc<dyn TriggerFn<S, A, P>>,
    class_listeners: Listeners<P>,
    instance_listeners: Mutex<HashMap<InstanceId, InstanceSlot<S, P>>>,
}

impl<A, P> Trigger<(), A, P>
where
    A: Send + 'static,
    P: Payload,
{
    /// Declare a free-standing trigger from an async function.
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P, BoxError>> + Send + 'static,
    {
        Self::from_parts(Arc::new(FreeFn::new(func)), Listeners::new())
    }

    /// Run the wrapped function, then fan its result out to the class-wide
    /// listeners, joining before returning.
    ///
    /// Returns the wrapped function's own result. A wrapped-function error
    /// propagates as [`DispatchError::Trigger`] and no listener runs; a
    /// listener error cancels its siblings and propagates as
    /// [`DispatchError::Listener`].
    pub async fn fire(&self, args: A) -> Result<P, DispatchError> {
        let payload = self
            .func
            .invoke(Arc::new(()), args)
            .await
            .map_err(DispatchError::Trigger)?;
        let listeners = self.class_listeners.snapshot();
        dispatch(&payload, &listeners).await?;
        Ok(payload)
    }
}

impl<S, A, P> Trigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    /// Declare a trigger whose wrapped callable receives the instance it is
    /// bound to.
    pub fn from_method<F>(func: F) -> Self
    where
        F: TriggerFn<S, A, P>,
    {
        Self::from_parts(Arc::new(func), Listeners::new())
    }

    pub(crate) fn from_parts(
        func: Arc<dyn TriggerFn<S, A, P>>,
        class_listeners: Listeners<P>,
    ) -> Self {
        Self {
            func,
            class_listeners,
            instance_listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Register a class-wide listener, visible to every bound view.
    pub fn hook<L: Listener<P>>(&self, listener: L) -> ListenerId {
        self.class_listeners.add(listener)
    }

    /// Register a listener on one instance's private set only.
    ///
    /// Equivalent to `self.bind(instance).hook(listener)`.
    pub fn hook_scoped<L: Listener<P>>(&self, instance: &Arc<S>, listener: L) -> ListenerId {
        self.instance_listeners_handle(instance).add(listener)
    }

    /// The class-wide listener set.
    pub fn listeners(&self) -> &Listeners<P> {
        &self.class_listeners
    }

    /// Resolve the view of this trigger scoped to `instance`.
    ///
    /// The first bind for a given instance lazily allocates that instance's
    /// private listener set; later binds reuse it. Views are cheap: they
    /// hold handles to shared storage, never copies.
    pub fn bind(&self, instance: &Arc<S>) -> BoundTrigger<S, A, P> {
        BoundTrigger {
            instance: Arc::clone(instance),
            func: Arc::clone(&self.func),
            listeners: self.instance_listeners_handle(instance),
            class_listeners: self.class_listeners.clone(),
        }
    }

    pub(crate) fn instance_listeners_handle(&self, instance: &Arc<S>) -> Listeners<P> {
        let id = InstanceId::of(instance);
        let mut map = self
            .instance_listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.entry(id)
            .or_insert_with(|| InstanceSlot {
                _anchor: Arc::clone(instance),
                listeners: Listeners::new(),
            })
            .listeners
            .clone()
    }
}

impl<S, A, P> std::fmt::Debug for Trigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger").finish_non_exhaustive()
    }
}

impl<S, A, P> Resolve<S> for Trigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    type Bound = BoundTrigger<S, A, P>;

    fn resolve(&self, instance: &Arc<S>) -> Self::Bound {
        self.bind(instance)
    }
}

/// The view of a [`Trigger`] scoped to one instance.
///
/// Holds the instance, the shared wrapped callable, and handles to both the
/// instance's private listener set and the trigger's class-wide set. The
/// observed listener set is their union, resolved fresh at each fire, so a
/// view created earlier still sees later registrations from either scope.
pub struct BoundTrigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    instance: Arc<S>,
    func: Arc<dyn TriggerFn<S, A, P>>,
    listeners: Listeners<P>,
    class_listeners: Listeners<P>,
}

impl<S, A, P> BoundTrigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    /// The instance this view is scoped to.
    pub fn instance(&self) -> &Arc<S> {
        &self.instance
    }

    /// Register a listener on this instance's private set only.
    ///
    /// Never touches the class-wide set.
    pub fn hook<L: Listener<P>>(&self, listener: L) -> ListenerId {
        self.listeners.add(listener)
    }

    /// The listener set this view observes: the union of the instance's
    /// private set and the class-wide set.
    pub fn listeners(&self) -> Vec<SharedListener<P>> {
        self.listeners.snapshot_union(&self.class_listeners)
    }

    /// Run the wrapped callable with this view's instance, then fan its
    /// result out to the union listener set, joining before returning.
    ///
    /// Error semantics are those of [`Trigger::fire`].
    pub async fn fire(&self, args: A) -> Result<P, DispatchError> {
        let payload = self
            .func
            .invoke(Arc::clone(&self.instance), args)
            .await
            .map_err(DispatchError::Trigger)?;
        let listeners = self.listeners.snapshot_union(&self.class_listeners);
        dispatch(&payload, &listeners).await?;
        Ok(payload)
    }
}

impl<S, A, P> Clone for BoundTrigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    fn clone(&self) -> Self {
        Self {
            instance: Arc::clone(&self.instance),
            func: Arc::clone(&self.func),
            listeners: self.listeners.clone(),
            class_listeners: self.class_listeners.clone(),
        }
    }
}

async fn dispatch<P: Payload>(
    payload: &P,
    listeners: &[SharedListener<P>],
) -> Result<(), DispatchError> {
    #[cfg(feature = "tracing")]
    tracing::trace!(listeners = listeners.len(), "dispatching trigger result");
    FanoutDelivery.deliver(payload, listeners).await
}
