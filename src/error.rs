use std::fmt;

use serde::Serialize;

use crate::sanitizer::SanitizationError;
use crate::store::StoreError;

/// Errors returned by gated operations.
///
/// A [`Violation`] is structured and safe to show to the end user. The other
/// variants signal conditions that should not occur under normal operation
/// and are reported to callers as unexpected failures.
#[derive(Debug)]
pub enum Error {
    /// A structured, user-facing policy failure.
    Violation(Violation),
    /// An unexpected internal condition (e.g. an identity with no user record).
    Internal(InternalError),
    /// The backing document store failed.
    Store(StoreError),
}

impl Error {
    /// Returns the violation if this is a structured failure.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Error::Violation(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the violation kind if this is a structured failure.
    pub fn kind(&self) -> Option<&ViolationKind> {
        self.violation().map(|v| &v.kind)
    }

    /// Returns `true` when the message may be rendered to the end user.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::Violation(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Violation(v) => write!(f, "Access violation: {}", v),
            Error::Internal(e) => write!(f, "Internal error: {}", e),
            Error::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Violation(v) => Some(v),
            Error::Internal(e) => Some(e),
            Error::Store(e) => Some(e),
        }
    }
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::Violation(v)
    }
}

impl From<InternalError> for Error {
    fn from(e: InternalError) -> Self {
        Error::Internal(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl From<SanitizationError> for Error {
    fn from(e: SanitizationError) -> Self {
        Error::Violation(e.into())
    }
}

/// A structured failure carrying a user-facing message and a severity tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message for the end user
    pub message: String,
    /// How the client should present the failure
    pub severity: Severity,
}

impl Violation {
    /// Creates a new low-severity violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity: Severity::Low,
        }
    }

    /// Returns the wire payload for this violation.
    ///
    /// ```
    /// use company_gate::{Violation, ViolationKind};
    ///
    /// let v = Violation::new(ViolationKind::Forbidden, "nope");
    /// let json = serde_json::to_string(&v.payload()).unwrap();
    /// assert_eq!(json, r#"{"message":"nope","severity":"low"}"#);
    /// ```
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            message: self.message.clone(),
            severity: self.severity,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

impl From<SanitizationError> for Violation {
    fn from(e: SanitizationError) -> Self {
        Violation::new(ViolationKind::InvalidInput, e.message())
    }
}

/// The kind of violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// No authenticated principal is present
    Unauthenticated,
    /// The user is not associated with any company
    Unlinked,
    /// A referenced record does not exist (or is not visible to the caller)
    NotFound,
    /// The caller is neither the owner nor an associated user of the company
    Forbidden,
    /// Submitted data failed validation
    InvalidInput,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::Unlinked => write!(f, "Unlinked"),
            ViolationKind::NotFound => write!(f, "NotFound"),
            ViolationKind::Forbidden => write!(f, "Forbidden"),
            ViolationKind::InvalidInput => write!(f, "InvalidInput"),
        }
    }
}

/// Presentation severity attached to a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Expected, recoverable failure shown as a plain notice.
    Low,
}

/// Serialized form of a [`Violation`] handed to the host's error mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    /// User-facing message
    pub message: String,
    /// Severity tag
    pub severity: Severity,
}

/// An unstructured error for conditions that indicate a bug or data anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalError {
    message: String,
}

impl InternalError {
    /// Creates a new internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for InternalError {}
