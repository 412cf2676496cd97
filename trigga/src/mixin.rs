//! Convenience surface for types that own a trigger group.

use crate::{
    group::{BoundTriggerGroup, TriggerGroup},
    set::ListenerId,
};
use std::sync::Arc;
use trigga_core::{HookError, Listener, Payload};

/// Mixin for types carrying a per-type [`TriggerGroup`].
///
/// Implementors supply [`hooks`], usually a `static` group declared once at
/// startup; the provided methods forward to it. No state lives here.
///
/// # Example
///
/// ```rust,ignore
/// struct Document;
///
/// lazy_static! {
///     static ref DOCUMENT_HOOKS: TriggerGroup<Document> = {
///         let group = TriggerGroup::new();
///         group
///             .declare("saved", |doc: Arc<Document>, path: String| async move {
///                 Ok(path)
///             })
///             .expect("fresh group");
///         group
///     };
/// }
///
/// impl Hooked for Document {
///     fn hooks() -> &'static TriggerGroup<Document> {
///         &DOCUMENT_HOOKS
///     }
/// }
///
/// let doc = Arc::new(Document);
/// doc.clone().hook("saved", on_saved)?;
/// doc.clone().triggers().trigger::<String, String>("saved")?.fire(path).await?;
/// ```
///
/// [`hooks`]: Hooked::hooks
pub trait Hooked: Send + Sync + Sized + 'static {
    /// The trigger group shared by every instance of this type.
    fn hooks() -> &'static TriggerGroup<Self>;

    /// The group view scoped to this instance.
    fn triggers(self: Arc<Self>) -> BoundTriggerGroup<Self> {
        Self::hooks().bind(&self)
    }

    /// Register a listener on the named trigger, scoped to this instance.
    fn hook<P, L>(self: Arc<Self>, name: &str, listener: L) -> Result<ListenerId, HookError>
    where
        P: Payload,
        L: Listener<P>,
    {
        Self::hooks().hook_by_name_scoped(name, &self, listener)
    }
}
