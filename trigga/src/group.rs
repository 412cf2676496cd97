//! Named trigger registries and their instance-bound views.
//!
//! A [`TriggerGroup`] maps names to triggers of heterogeneous argument and
//! payload types; entries are type-erased in the registry and recovered by
//! downcast at the typed access points. A name can be hooked before it is
//! declared: the registry entry is then a placeholder holding the listeners,
//! and a later declaration migrates them onto the real trigger.

use crate::{
    set::{ListenerId, Listeners},
    trigger::{BoundTrigger, Trigger},
};
use std::{
    any::{Any, type_name},
    collections::{HashMap, hash_map},
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use trigga_core::{
    BoxError, DeclareError, FreeFn, HookError, Listener, LookupError, Payload, Resolve, TriggerFn,
};

/// Internal type-erased surface of a declared trigger.
///
/// The registry stores triggers of heterogeneous types; this trait exposes
/// exactly the operations that must work without knowing `A` and `P`:
/// recovering the concrete trigger, reaching its listener sets, and naming
/// its payload type for diagnostics.
trait ErasedTrigger<S: Send + Sync + 'static>: Send + Sync + 'static {
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
    fn class_listeners_any(&self) -> &(dyn Any + Send + Sync);
    fn instance_listeners_any(&self, instance: &Arc<S>) -> Box<dyn Any + Send + Sync>;
    fn payload_type(&self) -> &'static str;
}

impl<S, A, P> ErasedTrigger<S> for Trigger<S, A, P>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    P: Payload,
{
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn class_listeners_any(&self) -> &(dyn Any + Send + Sync) {
        self.listeners()
    }

    fn instance_listeners_any(&self, instance: &Arc<S>) -> Box<dyn Any + Send + Sync> {
        Box::new(self.instance_listeners_handle(instance))
    }

    fn payload_type(&self) -> &'static str {
        type_name::<P>()
    }
}

struct Placeholder {
    // A Listeners<P>, boxed; P is fixed by the first forward hook.
    listeners: Box<dyn Any + Send + Sync>,
    payload_type: &'static str,
}

enum Entry<S: Send + Sync + 'static> {
    Declared(Arc<dyn ErasedTrigger<S>>),
    Undeclared(Placeholder),
}

/// A named registry of triggers, usable standalone or one per owning type.
///
/// Cloning a group aliases the same registry: all views of a group share the
/// name → trigger mapping; only the per-instance listener sets inside each
/// trigger differ.
pub struct TriggerGroup<S: Send + Sync + 'static> {
    registry: Arc<Mutex<HashMap<String, Entry<S>>>>,
}

impl<S: Send + Sync + 'static> TriggerGroup<S> {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Declare a named trigger whose wrapped callable receives the instance.
    ///
    /// If the name was forward-hooked, the accumulated listeners are migrated
    /// onto the new trigger. Declaring a name that already holds a declared
    /// trigger is an error and leaves the existing trigger untouched.
    pub fn declare<F, A, P>(&self, name: &str, func: F) -> Result<Arc<Trigger<S, A, P>>, DeclareError>
    where
        F: TriggerFn<S, A, P>,
        A: Send + 'static,
        P: Payload,
    {
        self.install(name, Arc::new(func))
    }

    /// Declare a named trigger from a plain async function that never sees
    /// the instance.
    ///
    /// Use this when the trigger's signature intentionally excludes the
    /// instance; binding still scopes its listeners per instance.
    pub fn declare_free<F, Fut, A, P>(
        &self,
        name: &str,
        func: F,
    ) -> Result<Arc<Trigger<S, A, P>>, DeclareError>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P, BoxError>> + Send + 'static,
        A: Send + 'static,
        P: Payload,
    {
        self.install(name, Arc::new(FreeFn::new(func)))
    }

    fn install<A, P>(
        &self,
        name: &str,
        func: Arc<dyn TriggerFn<S, A, P>>,
    ) -> Result<Arc<Trigger<S, A, P>>, DeclareError>
    where
        A: Send + 'static,
        P: Payload,
    {
        let mut registry = self.lock();
        match registry.entry(name.to_string()) {
            hash_map::Entry::Occupied(mut slot) => match slot.get() {
                Entry::Declared(_) => Err(DeclareError::AlreadyDefined(name.to_string())),
                Entry::Undeclared(placeholder) => {
                    let seed = placeholder
                        .listeners
                        .downcast_ref::<Listeners<P>>()
                        .cloned()
                        .ok_or_else(|| DeclareError::PayloadMismatch {
                            name: name.to_string(),
                            expected: placeholder.payload_type,
                            found: type_name::<P>(),
                        })?;
                    let trigger = Arc::new(Trigger::from_parts(func, seed));
                    let erased: Arc<dyn ErasedTrigger<S>> = trigger.clone();
                    slot.insert(Entry::Declared(erased));
                    Ok(trigger)
                }
            },
            hash_map::Entry::Vacant(slot) => {
                let trigger = Arc::new(Trigger::from_parts(func, Listeners::new()));
                let erased: Arc<dyn ErasedTrigger<S>> = trigger.clone();
                slot.insert(Entry::Declared(erased));
                Ok(trigger)
            }
        }
    }

    /// Register a class-wide listener on the named trigger.
    ///
    /// If the name has not been declared yet, a placeholder entry is created
    /// and the listener is migrated onto the trigger once it is declared —
    /// hooking before declaration never fails for that reason.
    pub fn hook_by_name<P, L>(&self, name: &str, listener: L) -> Result<ListenerId, HookError>
    where
        P: Payload,
        L: Listener<P>,
    {
        let mut registry = self.lock();
        match registry.entry(name.to_string()) {
            hash_map::Entry::Vacant(slot) => {
                let listeners = Listeners::<P>::new();
                let id = listeners.add(listener);
                slot.insert(Entry::Undeclared(Placeholder {
                    listeners: Box::new(listeners),
                    payload_type: type_name::<P>(),
                }));
                Ok(id)
            }
            hash_map::Entry::Occupied(slot) => match slot.get() {
                Entry::Undeclared(placeholder) => placeholder
                    .listeners
                    .downcast_ref::<Listeners<P>>()
                    .map(|set| set.add(listener))
                    .ok_or_else(|| HookError::PayloadMismatch {
                        name: name.to_string(),
                        expected: placeholder.payload_type,
                        found: type_name::<P>(),
                    }),
                Entry::Declared(trigger) => trigger
                    .class_listeners_any()
                    .downcast_ref::<Listeners<P>>()
                    .map(|set| set.add(listener))
                    .ok_or_else(|| HookError::PayloadMismatch {
                        name: name.to_string(),
                        expected: trigger.payload_type(),
                        found: type_name::<P>(),
                    }),
            },
        }
    }

    /// Register a listener on the named trigger, scoped to one instance.
    ///
    /// The name must already be declared: a placeholder has no per-instance
    /// storage to scope into.
    pub fn hook_by_name_scoped<P, L>(
        &self,
        name: &str,
        instance: &Arc<S>,
        listener: L,
    ) -> Result<ListenerId, HookError>
    where
        P: Payload,
        L: Listener<P>,
    {
        let registry = self.lock();
        match registry.get(name) {
            None | Some(Entry::Undeclared(_)) => {
                Err(HookError::ScopedOnPlaceholder(name.to_string()))
            }
            Some(Entry::Declared(trigger)) => trigger
                .instance_listeners_any(instance)
                .downcast::<Listeners<P>>()
                .map(|set| set.add(listener))
                .map_err(|_| HookError::PayloadMismatch {
                    name: name.to_string(),
                    expected: trigger.payload_type(),
                    found: type_name::<P>(),
                }),
        }
    }

    /// Whether an entry (declared or placeholder) exists under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Resolve the named trigger with its concrete types.
    pub fn get<A, P>(&self, name: &str) -> Result<Arc<Trigger<S, A, P>>, LookupError>
    where
        A: Send + 'static,
        P: Payload,
    {
        let registry = self.lock();
        match registry.get(name) {
            None => Err(LookupError::Unknown(name.to_string())),
            Some(Entry::Undeclared(_)) => Err(LookupError::NotYetDeclared(name.to_string())),
            Some(Entry::Declared(trigger)) => {
                let payload = trigger.payload_type();
                Arc::clone(trigger)
                    .as_any()
                    .downcast::<Trigger<S, A, P>>()
                    .map_err(|_| LookupError::WrongType {
                        name: name.to_string(),
                        payload,
                    })
            }
        }
    }

    /// Install a trigger under a name, replacing any existing entry.
    ///
    /// This is the registry's raw set operation; unlike [`declare`], it
    /// overwrites silently and never migrates listeners.
    ///
    /// [`declare`]: TriggerGroup::declare
    pub fn insert<A, P>(&self, name: &str, trigger: Arc<Trigger<S, A, P>>)
    where
        A: Send + 'static,
        P: Payload,
    {
        let erased: Arc<dyn ErasedTrigger<S>> = trigger;
        self.lock().insert(name.to_string(), Entry::Declared(erased));
    }

    /// The number of entries (declared and placeholder) in the registry.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Resolve the view of this group scoped to `instance`.
    pub fn bind(&self, instance: &Arc<S>) -> BoundTriggerGroup<S> {
        BoundTriggerGroup {
            instance: Arc::clone(instance),
            group: self.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<S>>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Send + Sync + 'static> Clone for TriggerGroup<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: Send + Sync + 'static> Default for TriggerGroup<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + Sync + 'static> Resolve<S> for TriggerGroup<S> {
    type Bound = BoundTriggerGroup<S>;

    fn resolve(&self, instance: &Arc<S>) -> Self::Bound {
        self.bind(instance)
    }
}

/// The view of a [`TriggerGroup`] scoped to one instance.
///
/// Shares the parent group's registry; name lookup returns the instance-bound
/// view of the named trigger, and hooking defaults its scope to this view's
/// instance.
pub struct BoundTriggerGroup<S: Send + Sync + 'static> {
    instance: Arc<S>,
    group: TriggerGroup<S>,
}

impl<S: Send + Sync + 'static> BoundTriggerGroup<S> {
    /// The instance this view is scoped to.
    pub fn instance(&self) -> &Arc<S> {
        &self.instance
    }

    /// The underlying group.
    pub fn group(&self) -> &TriggerGroup<S> {
        &self.group
    }

    /// Whether an entry exists under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.group.contains(name)
    }

    /// Resolve the named trigger as a view bound to this group's instance.
    pub fn trigger<A, P>(&self, name: &str) -> Result<BoundTrigger<S, A, P>, LookupError>
    where
        A: Send + 'static,
        P: Payload,
    {
        Ok(self.group.get::<A, P>(name)?.bind(&self.instance))
    }

    /// Register a listener on the named trigger, scoped to this group's
    /// instance.
    ///
    /// Unlike the group-level [`hook_by_name`], which registers class-wide,
    /// the bound form defaults the scope to its own instance.
    ///
    /// [`hook_by_name`]: TriggerGroup::hook_by_name
    pub fn hook_by_name<P, L>(&self, name: &str, listener: L) -> Result<ListenerId, HookError>
    where
        P: Payload,
        L: Listener<P>,
    {
        self.group
            .hook_by_name_scoped(name, &self.instance, listener)
    }
}

impl<S: Send + Sync + 'static> Clone for BoundTriggerGroup<S> {
    fn clone(&self) -> Self {
        Self {
            instance: Arc::clone(&self.instance),
            group: self.group.clone(),
        }
    }
}
