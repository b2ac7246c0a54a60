use std::fmt;

/// A wrapper for client-submitted data that has not been validated yet.
///
/// Form submissions arrive as `Tainted<T>`. The inner value is only reachable
/// through a [`Sanitizer`](crate::Sanitizer), which either rejects it or
/// promotes it to a [`Verified`](crate::Verified) value that gated operations
/// accept.
///
/// # Examples
///
/// ```
/// use company_gate::Tainted;
///
/// let title = Tainted::new("  Prepare board minutes ".to_string());
///
/// // Debug output shows it's tainted
/// assert!(format!("{:?}", title).starts_with("Tainted"));
///
/// // The value cannot be used directly:
/// // let s: String = title; // Won't compile
/// ```
#[derive(Clone)]
pub struct Tainted<T> {
    // Must stay private: only sanitizers may read it.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Extracts the inner value for sanitization.
    ///
    /// Restricted to this crate. Only sanitizer implementations call it, and
    /// only to validate the value before wrapping it in `Verified<T>`.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// No Deref, AsRef, Borrow or Into<T> on purpose: each would let unvalidated
// input reach a write.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
