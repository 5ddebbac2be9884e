use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[feast_derive::feast_error]
pub enum EventBusError {
    /// A topic slot held a channel for a different event type.
    /// This indicates a broken invariant in the type registry.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero for broadcast channels.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
