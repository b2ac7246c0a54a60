//! Long-lived records read by the gate.
//!
//! Users and companies are created and mutated by their own management
//! operations. This crate only reads them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::TokenIdentifier;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw document id.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the raw document id.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

document_id!(
    /// Id of a row in the `users` table.
    UserId
);
document_id!(
    /// Id of a row in the `companies` table.
    CompanyId
);
document_id!(
    /// Id of a row in the `tasks` table.
    TaskId
);
document_id!(
    /// Id of a row in the `persons` table.
    PersonId
);

/// An application user, keyed by the provider's token identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document id
    pub id: UserId,
    /// Token identifier issued by the identity provider (unique index)
    pub token_identifier: TokenIdentifier,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Company the user belongs to, once onboarding is complete
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

/// A tenant: the unit of authorization scoping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Document id
    pub id: CompanyId,
    /// Company name
    pub name: String,
    /// Token identifier of the owning user
    pub user_id: TokenIdentifier,
    /// Token identifiers granted non-owner access
    #[serde(default)]
    pub associated_users: BTreeSet<TokenIdentifier>,
}

impl Company {
    /// Returns `true` if `token` owns this company.
    pub fn is_owner(&self, token: &TokenIdentifier) -> bool {
        &self.user_id == token
    }

    /// Returns `true` if `token` may act on this company.
    ///
    /// Ownership and membership in `associated_users` are the only two paths.
    pub fn authorizes(&self, token: &TokenIdentifier) -> bool {
        self.is_owner(token) || self.associated_users.contains(token)
    }
}

/// A person attached to a company, optionally holding shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Document id
    pub id: PersonId,
    /// Owning company
    pub company_id: CompanyId,
    /// Full name
    pub name: String,
    /// Whether the person is a shareholder
    #[serde(default)]
    pub is_shareholder: bool,
}
