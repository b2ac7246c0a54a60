use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of an authenticated principal.
///
/// Issued by the external identity provider. The crate only compares these
/// values for equality and never interprets their contents.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenIdentifier(String);

impl TokenIdentifier {
    /// Wraps a raw token identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TokenIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenIdentifier({:?})", self.0)
    }
}

impl fmt::Display for TokenIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TokenIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Per-call proof of authentication supplied by the execution context.
///
/// An `Identity` is never persisted. The host creates one for each operation
/// and discards it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    token_identifier: TokenIdentifier,
    name: Option<String>,
    email: Option<String>,
}

impl Identity {
    /// Creates an identity for the given token identifier.
    pub fn new(token_identifier: impl Into<TokenIdentifier>) -> Self {
        Self {
            token_identifier: token_identifier.into(),
            name: None,
            email: None,
        }
    }

    /// Attaches the provider-supplied display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches the provider-supplied email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the token identifier.
    pub fn token_identifier(&self) -> &TokenIdentifier {
        &self.token_identifier
    }

    /// Returns the display name, if the provider sent one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the email address, if the provider sent one.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Anything that can report the identity of the current caller.
pub trait IdentitySource {
    /// Returns the caller's identity, or `None` for an anonymous call.
    fn identity(&self) -> Option<&Identity>;
}

/// Returned by [`resolve_identity`] when no principal is attached to the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthenticated;

impl fmt::Display for Unauthenticated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no authenticated principal")
    }
}

impl std::error::Error for Unauthenticated {}

/// Resolves the identity of the caller from its execution context.
///
/// # Errors
///
/// Returns [`Unauthenticated`] if the context carries no identity.
///
/// # Examples
///
/// ```
/// use company_gate::{resolve_identity, Ctx, Identity, MemoryStore};
///
/// let store = MemoryStore::new();
/// let ctx = Ctx::query("req-1", Some(Identity::new("tok-A")), &store);
/// let identity = resolve_identity(&ctx).expect("signed in");
/// assert_eq!(identity.token_identifier().as_str(), "tok-A");
///
/// let anon = Ctx::query("req-2", None, &store);
/// assert!(resolve_identity(&anon).is_err());
/// ```
pub fn resolve_identity<C>(ctx: &C) -> Result<Identity, Unauthenticated>
where
    C: IdentitySource + ?Sized,
{
    ctx.identity().cloned().ok_or(Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Identity>);

    impl IdentitySource for Fixed {
        fn identity(&self) -> Option<&Identity> {
            self.0.as_ref()
        }
    }

    #[test]
    fn resolves_present_identity() {
        let source = Fixed(Some(Identity::new("tok-A").with_name("Ada")));

        let identity = resolve_identity(&source).unwrap();
        assert_eq!(identity.token_identifier(), &TokenIdentifier::new("tok-A"));
        assert_eq!(identity.name(), Some("Ada"));
        assert_eq!(identity.email(), None);
    }

    #[test]
    fn missing_identity_is_unauthenticated() {
        assert_eq!(resolve_identity(&Fixed(None)), Err(Unauthenticated));
    }

    #[test]
    fn token_identifier_serializes_as_plain_string() {
        let token = TokenIdentifier::new("https://issuer|abc");
        assert_eq!(
            serde_json::to_string(&token).unwrap(),
            "\"https://issuer|abc\""
        );
    }
}
