//! Payload trait for trigger results.

/// A marker trait for values a trigger produces and fans out to listeners.
///
/// Each listener receives its own clone of the payload, so payloads must be
/// `Clone`, and `Send + Sync + 'static` to be safe for async use.
///
/// Multi-value results are tuples: a trigger returning `(A, B)` has listeners
/// that destructure both values in their closure parameter, e.g.
/// `|(len, text): (usize, String)| async move { ... }`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct SaveCompleted { path: PathBuf }
///
/// impl Payload for SaveCompleted {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be delivered to listeners",
    label = "not a valid `Payload`",
    note = "Payloads must be `Clone + Send + Sync + 'static`; opt in with `impl Payload for {Self} {{}}`."
)]
pub trait Payload: Clone + Send + Sync + 'static {}

macro_rules! impl_payload {
    ($($ty:ty),* $(,)?) => {
        $(impl Payload for $ty {})*
    };
}

impl_payload!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Payload> Payload for Box<T> {}
impl<T: Payload> Payload for Vec<T> {}
impl<T: Payload> Payload for Option<T> {}
impl<T: Payload, E: Payload> Payload for Result<T, E> {}
impl<T: Send + Sync + 'static> Payload for std::sync::Arc<T> {}

macro_rules! impl_payload_tuple {
    ($($name:ident),+) => {
        impl<$($name: Payload),+> Payload for ($($name,)+) {}
    };
}

impl_payload_tuple!(A);
impl_payload_tuple!(A, B);
impl_payload_tuple!(A, B, C);
impl_payload_tuple!(A, B, C, D);
