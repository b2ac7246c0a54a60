/// A value that has passed validation and may be handed to a write.
///
/// `Verified<T>` has no public constructor. The only way to obtain one is
/// through a [`Sanitizer`](crate::Sanitizer), so a function taking
/// `Verified<TaskUpdate>` cannot receive an unchecked form submission.
///
/// ```compile_fail
/// use company_gate::Verified;
///
/// let verified = Verified::new("data".to_string()); // no public constructor
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Wraps a value that the caller has already validated.
    ///
    /// Restricted to this crate; sanitizers call it after their checks pass.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the wrapper and returns the validated value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
