//! Tenant authorization gate for company-scoped task management.
//!
//! Every protected read or write passes through one access gate before it
//! touches tenant data:
//! - **Identity resolution**: the caller's [`Identity`] comes from an explicit
//!   [`Ctx`], never from ambient state
//! - **Access validation**: the identity must map to a [`User`] linked to an
//!   existing [`Company`] that the caller owns or is associated with
//! - **Validated writes**: client submissions arrive as [`Tainted`] and only a
//!   [`Verified`] update reaches a mutation
//!
//! # Core Types
//!
//! - [`Ctx`]: Execution context, typed as [`Query`] or [`Mutation`]
//! - [`AccessValidator`]: The gate, owning the [`ReasonMessages`] table
//! - [`Access`]: Proof of a passed check (user, company, identity)
//! - [`Error`]: Structured [`Violation`]s vs. internal and store failures
//! - [`TaskUpdateSanitizer`]: Turns a [`TaskUpdateForm`] into a `Verified<TaskUpdate>`
//!
//! # Examples
//!
//! ```
//! use company_gate::{
//!     validate_access, Company, CompanyId, Ctx, Identity, MemoryStore, Reason, TokenIdentifier,
//!     User, UserId, ViolationKind,
//! };
//!
//! let store = MemoryStore::new();
//! store.insert_company(Company {
//!     id: CompanyId::new("C1"),
//!     name: "Acme".to_string(),
//!     user_id: "tok-A".into(),
//!     associated_users: [TokenIdentifier::new("tok-B")].into_iter().collect(),
//! });
//! for (id, token) in [("U1", "tok-A"), ("U2", "tok-B"), ("U3", "tok-C")] {
//!     store.insert_user(User {
//!         id: UserId::new(id),
//!         token_identifier: token.into(),
//!         name: None,
//!         company_id: Some(CompanyId::new("C1")),
//!     });
//! }
//!
//! let as_caller = |token: &str| {
//!     let ctx = Ctx::query("req-1", Some(Identity::new(token)), &store);
//!     validate_access(&ctx, Reason::CompanyInformation)
//! };
//!
//! assert!(as_caller("tok-A").is_ok()); // owner
//! assert!(as_caller("tok-B").is_ok()); // associated user
//! assert_eq!(
//!     as_caller("tok-C").unwrap_err().kind(),
//!     Some(&ViolationKind::Forbidden)
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod error;
mod gate;
mod identity;
mod logging;
mod model;
mod ops;
mod reason;
mod sanitizer;
mod state;
mod store;
mod tainted;
mod task;
mod verified;

#[cfg(test)]
mod test_utils;

pub use context::{AccessContext, Ctx};
pub use error::{Error, ErrorPayload, InternalError, Severity, Violation, ViolationKind};
pub use gate::{validate_access, Access, AccessValidator};
pub use identity::{resolve_identity, Identity, IdentitySource, TokenIdentifier, Unauthenticated};
pub use logging::OpLog;
pub use model::{Company, CompanyId, Person, PersonId, TaskId, User, UserId};
pub use ops::{get_task, list_tasks, shareholders_by_company, update_task};
pub use reason::{ConfigError, Reason, ReasonMessages};
pub use sanitizer::{SanitizationError, SanitizationErrorKind, Sanitizer, TextSanitizer};
pub use state::{Mode, Mutation, Query};
pub use store::{
    CompanyStore, DocumentStore, MemoryStore, PersonStore, StoreError, TaskStore, TaskWriter,
    UserStore,
};
pub use tainted::Tainted;
pub use task::{
    Priority, RawNumber, ReviewStatus, Task, TaskState, TaskUpdate, TaskUpdateForm,
    TaskUpdateSanitizer,
};
pub use verified::Verified;
