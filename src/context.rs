use std::fmt;
use std::marker::PhantomData;

use crate::identity::{Identity, IdentitySource};
use crate::logging::OpLog;
use crate::state::{Mode, Mutation, Query};
use crate::store::DocumentStore;

/// Execution context of one operation.
///
/// `Ctx<S, M>` is generic over its store and its execution mode:
/// - `Ctx<S, Query>`: read path
/// - `Ctx<S, Mutation>`: write path
///
/// The caller's identity is passed in explicitly when the context is built.
/// There is no ambient "current user". Operations that write take
/// `&Ctx<S, Mutation>`, so a query context cannot reach them.
///
/// # Examples
///
/// ```
/// use company_gate::{Ctx, Identity, MemoryStore};
///
/// let store = MemoryStore::new();
/// let ctx = Ctx::mutation("req-7", Some(Identity::new("tok-A")), &store);
///
/// assert_eq!(ctx.request_id(), "req-7");
/// assert!(ctx.identity().is_some());
/// ```
pub struct Ctx<'a, S: ?Sized, M = Query> {
    request_id: String,
    identity: Option<Identity>,
    db: &'a S,
    _mode: PhantomData<M>,
}

impl<'a, S: ?Sized> Ctx<'a, S, Query> {
    /// Creates a read-only context.
    pub fn query(request_id: impl Into<String>, identity: Option<Identity>, db: &'a S) -> Self {
        Self::with_mode(request_id.into(), identity, db)
    }
}

impl<'a, S: ?Sized> Ctx<'a, S, Mutation> {
    /// Creates a context that may write.
    pub fn mutation(request_id: impl Into<String>, identity: Option<Identity>, db: &'a S) -> Self {
        Self::with_mode(request_id.into(), identity, db)
    }
}

impl<'a, S: ?Sized, M: Mode> Ctx<'a, S, M> {
    fn with_mode(request_id: String, identity: Option<Identity>, db: &'a S) -> Self {
        Self {
            request_id,
            identity,
            db,
            _mode: PhantomData,
        }
    }

    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the caller's identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the document store.
    pub fn db(&self) -> &'a S {
        self.db
    }

    /// Returns a logger bound to this request.
    pub fn log(&self) -> OpLog<'_> {
        OpLog::new(&self.request_id, M::NAME)
    }
}

impl<S: ?Sized, M: Mode> fmt::Debug for Ctx<'_, S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctx")
            .field("request_id", &self.request_id)
            .field("mode", &M::NAME)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Capability shared by read and write contexts: an identity accessor plus
/// a document store.
///
/// The access gate is written once against this trait.
pub trait AccessContext: IdentitySource {
    /// Store the gate reads users and companies from.
    type Store: DocumentStore + ?Sized;

    /// Request ID used for log correlation.
    fn request_id(&self) -> &str;

    /// Returns the store.
    fn store(&self) -> &Self::Store;
}

impl<S: ?Sized, M: Mode> IdentitySource for Ctx<'_, S, M> {
    fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl<S: DocumentStore + ?Sized, M: Mode> AccessContext for Ctx<'_, S, M> {
    type Store = S;

    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn store(&self) -> &S {
        self.db
    }
}
