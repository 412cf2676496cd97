//! Instance identity and the binding seam.
//!
//! Triggers and trigger groups are declared once per type but observed per
//! instance. [`Resolve`] is the explicit "resolve(instance) → scoped view"
//! operation invoked wherever a trigger or group is accessed through an
//! instance; [`InstanceId`] is the identity key that keeps one instance's
//! listener storage disjoint from every other instance's.

use std::sync::Arc;

/// The identity of one instance, as used to key per-instance listener sets.
///
/// Identity is the `Arc` allocation address, never value equality: two
/// distinct instances never share a listener set even if they compare equal.
/// Structures keyed by an `InstanceId` also anchor a clone of the `Arc`, so
/// the address cannot be reused while a registration exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct InstanceId(usize);

impl InstanceId {
    /// The identity of the given instance.
    pub fn of<S>(instance: &Arc<S>) -> Self {
        Self(Arc::as_ptr(instance) as usize)
    }
}

/// Resolution of a shared declaration into a view scoped to one instance.
///
/// Implemented by triggers (yielding a bound trigger) and trigger groups
/// (yielding a bound group). The view shares the declaration's storage; only
/// the scope differs.
pub trait Resolve<S> {
    /// The scoped view produced by resolution.
    type Bound;

    /// Produce the view of `self` scoped to `instance`.
    fn resolve(&self, instance: &Arc<S>) -> Self::Bound;
}
