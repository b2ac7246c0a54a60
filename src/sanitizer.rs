use std::fmt;

use crate::{Tainted, Verified};

/// Error returned when a submitted value fails validation.
///
/// The message is written for the end user ("Title is required") and never
/// echoes the rejected input.
///
/// # Examples
///
/// ```
/// use company_gate::{SanitizationError, SanitizationErrorKind};
///
/// let error = SanitizationError::new(SanitizationErrorKind::TooShort, "Title is required");
/// assert_eq!(error.kind(), SanitizationErrorKind::TooShort);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SanitizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SanitizationError {}

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// Input is empty or contains only whitespace.
    Empty,
    /// Input is shorter than the field's minimum.
    TooShort,
    /// Input exceeds the field's maximum.
    TooLong,
    /// Input contains control or non-printable characters.
    ContainsControlChars,
    /// Input could not be read as a number.
    NotANumber,
    /// Number is outside the accepted range.
    OutOfRange,
    /// Input is not one of the accepted literal values.
    UnknownVariant,
    /// The submission as a whole could not be parsed.
    MalformedInput,
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::TooShort => write!(f, "input too short"),
            Self::TooLong => write!(f, "input too long"),
            Self::ContainsControlChars => write!(f, "contains control characters"),
            Self::NotANumber => write!(f, "not a number"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::UnknownVariant => write!(f, "unknown variant"),
            Self::MalformedInput => write!(f, "malformed input"),
        }
    }
}

/// Converts tainted input into a verified value, or rejects it.
///
/// Implementations must validate before calling `Verified::new_unchecked`
/// and must not leak the rejected input in the error.
pub trait Sanitizer<T> {
    /// The validated type produced on success.
    type Output;

    /// Validates `input`.
    ///
    /// # Errors
    ///
    /// Returns `SanitizationError` if the input fails validation.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<Self::Output>, SanitizationError>;
}

/// Sanitizer for a single free-text form field.
///
/// - Trims leading and trailing whitespace
/// - Rejects empty input
/// - Rejects control characters (newlines and tabs allowed in multiline mode)
/// - Enforces a minimum and maximum length in characters
///
/// # Examples
///
/// ```
/// use company_gate::{Sanitizer, Tainted, TextSanitizer};
///
/// let title = TextSanitizer::new(200).min_chars(3, "Title is required");
///
/// let ok = title.sanitize(Tainted::new("  Board pack ".to_string())).unwrap();
/// assert_eq!(ok.as_ref(), "Board pack");
///
/// let err = title.sanitize(Tainted::new("ab".to_string())).unwrap_err();
/// assert_eq!(err.message(), "Title is required");
///
/// assert!(title.sanitize(Tainted::new("a\nb c".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextSanitizer {
    min_chars: usize,
    max_chars: usize,
    multiline: bool,
    too_short_message: Option<&'static str>,
}

impl TextSanitizer {
    /// Creates a single-line sanitizer with the given maximum length.
    ///
    /// # Panics
    ///
    /// Panics if `max_chars` is 0.
    pub fn new(max_chars: usize) -> Self {
        assert!(max_chars > 0, "max_chars must be greater than 0");
        Self {
            min_chars: 1,
            max_chars,
            multiline: false,
            too_short_message: None,
        }
    }

    /// Requires at least `min` characters, reporting `message` otherwise.
    ///
    /// The same message is used for empty input.
    pub fn min_chars(mut self, min: usize, message: &'static str) -> Self {
        self.min_chars = min.max(1);
        self.too_short_message = Some(message);
        self
    }

    /// Allows line breaks and tabs.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    fn is_forbidden_char(&self, c: char) -> bool {
        if self.multiline && matches!(c, '\n' | '\r' | '\t') {
            return false;
        }
        c.is_control()
    }
}

impl Sanitizer<String> for TextSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let trimmed = raw.trim();
        let count = trimmed.chars().count();

        if count == 0 {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                self.too_short_message
                    .unwrap_or("input is empty or contains only whitespace"),
            ));
        }

        if trimmed.chars().any(|c| self.is_forbidden_char(c)) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "input contains control or non-printable characters",
            ));
        }

        if count < self.min_chars {
            let message = match self.too_short_message {
                Some(m) => m.to_string(),
                None => format!("input must be at least {} characters", self.min_chars),
            };
            return Err(SanitizationError::new(SanitizationErrorKind::TooShort, message));
        }

        if count > self.max_chars {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("input exceeds maximum length of {}", self.max_chars),
            ));
        }

        Ok(Verified::new_unchecked(trimmed.to_string()))
    }
}
