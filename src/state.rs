//! Type-state markers for the execution mode of a context.
//!
//! A `Ctx<Query>` can only read. A `Ctx<Mutation>` can also write. Both
//! pass through the same access gate.

mod sealed {
    pub trait Sealed {}
}

/// Execution mode of a [`Ctx`](crate::Ctx). Sealed: only [`Query`] and
/// [`Mutation`] implement it.
pub trait Mode: sealed::Sealed {
    /// Short name used in log fields.
    const NAME: &'static str;
}

/// Marker for a read-only context.
#[derive(Debug, Clone, Copy)]
pub struct Query {
    _private: (),
}

/// Marker for a context that may write.
#[derive(Debug, Clone, Copy)]
pub struct Mutation {
    _private: (),
}

impl sealed::Sealed for Query {}
impl sealed::Sealed for Mutation {}

impl Mode for Query {
    const NAME: &'static str = "query";
}

impl Mode for Mutation {
    const NAME: &'static str = "mutation";
}
