use std::fmt;

/// A request-scoped logger.
///
/// `OpLog` is obtained from [`Ctx::log`](crate::Ctx::log) and is
/// lifetime-bound to the context. Every message carries the request ID and
/// the execution mode of the operation.
#[derive(Debug, Clone, Copy)]
pub struct OpLog<'a> {
    request_id: &'a str,
    mode: &'static str,
}

impl<'a> OpLog<'a> {
    /// Only `Ctx` creates loggers.
    pub(crate) fn new(request_id: &'a str, mode: &'static str) -> Self {
        Self { request_id, mode }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs an info-level message.
    ///
    /// ```no_run
    /// # use company_gate::{Ctx, MemoryStore};
    /// # let store = MemoryStore::new();
    /// # let ctx = Ctx::query("req-1", None, &store);
    /// ctx.log().info(format_args!("listed {} tasks", 3));
    /// ```
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, mode = self.mode, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, mode = self.mode, "{}", args);
    }
}
