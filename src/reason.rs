//! Reason tags and the message table used on the unauthenticated path.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What the caller was trying to do when the gate was invoked.
///
/// The reason only selects the user-facing message shown when no identity is
/// present. It has no effect on the authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reason {
    /// Accessing stored files
    Files,
    /// Accessing notes
    Notes,
    /// Accessing company information (tasks, persons, settings)
    CompanyInformation,
}

impl Reason {
    /// Every reason tag, in declaration order.
    pub const ALL: [Reason; 3] = [Reason::Files, Reason::Notes, Reason::CompanyInformation];

    /// Returns the tag as it appears in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Files => "files",
            Reason::Notes => "notes",
            Reason::CompanyInformation => "companyInformation",
        }
    }

    /// Returns the built-in message for this reason.
    pub fn default_message(self) -> &'static str {
        match self {
            Reason::Files => "You must be logged in to access files.",
            Reason::Notes => "You must be logged in to access notes.",
            Reason::CompanyInformation => {
                "You must be logged in to access company information."
            }
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reason {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reason::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownReason(s.to_string()))
    }
}

/// Error raised while building a [`ReasonMessages`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The table has no entry for a reason.
    MissingReason(Reason),
    /// The message for a reason is blank.
    EmptyMessage(Reason),
    /// The configuration names a reason that does not exist.
    UnknownReason(String),
    /// The configuration could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingReason(r) => write!(f, "no message configured for reason '{}'", r),
            ConfigError::EmptyMessage(r) => write!(f, "message for reason '{}' is empty", r),
            ConfigError::UnknownReason(s) => write!(f, "unknown reason '{}'", s),
            ConfigError::Parse(msg) => write!(f, "invalid reason table: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Table mapping every [`Reason`] to the message shown to an anonymous caller.
///
/// A table can only be constructed if it covers every reason, so lookups
/// never miss.
///
/// # Examples
///
/// ```
/// use company_gate::{Reason, ReasonMessages};
///
/// let table = ReasonMessages::from_json(r#"{
///     "files": "Sign in to see files.",
///     "notes": "Sign in to see notes.",
///     "companyInformation": "Sign in to see your company."
/// }"#).expect("complete table");
///
/// assert_eq!(table.message(Reason::Notes), "Sign in to see notes.");
///
/// // Tables missing a reason are rejected up front.
/// assert!(ReasonMessages::from_json(r#"{"files": "x"}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonMessages {
    messages: BTreeMap<Reason, String>,
}

impl ReasonMessages {
    /// Builds a table from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingReason`] if any reason has no entry and
    /// [`ConfigError::EmptyMessage`] if a message is blank.
    pub fn new<I, M>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Reason, M)>,
        M: Into<String>,
    {
        let messages: BTreeMap<Reason, String> = entries
            .into_iter()
            .map(|(reason, message)| (reason, message.into()))
            .collect();

        for reason in Reason::ALL {
            match messages.get(&reason) {
                None => return Err(ConfigError::MissingReason(reason)),
                Some(m) if m.trim().is_empty() => return Err(ConfigError::EmptyMessage(reason)),
                Some(_) => {}
            }
        }

        Ok(Self { messages })
    }

    /// Parses a table from a JSON object keyed by reason tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed, names an unknown
    /// reason, or does not cover every reason.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let entries = raw
            .into_iter()
            .map(|(key, message)| Ok((key.parse::<Reason>()?, message)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::new(entries)
    }

    /// Returns the message for `reason`.
    pub fn message(&self, reason: Reason) -> &str {
        self.messages
            .get(&reason)
            .map(String::as_str)
            .unwrap_or_else(|| reason.default_message())
    }
}

impl Default for ReasonMessages {
    fn default() -> Self {
        Self {
            messages: Reason::ALL
                .into_iter()
                .map(|r| (r, r.default_message().to_string()))
                .collect(),
        }
    }
}
