//! Lints for company-gate.
//!
//! - `NO_PRINTLN`: rejects `println!`, `eprintln!` and `dbg!`. Gate decisions
//!   and operations log through `tracing` and the request-scoped `OpLog`, so
//!   every line carries the request id and token identifiers stay out of
//!   unstructured output.

#![feature(rustc_private)]
#![warn(unused_extern_crates)]

extern crate rustc_ast;
extern crate rustc_lint;
extern crate rustc_session;
extern crate rustc_span;

use rustc_ast::{Expr, ExprKind, MacCall};
use rustc_lint::{EarlyContext, EarlyLintPass, LintContext};
use rustc_session::{declare_lint_pass, declare_tool_lint};
use rustc_span::Span;

declare_tool_lint! {
    /// **What it does:** Rejects `println!`, `eprintln!` and `dbg!` in crate code.
    ///
    /// **Why is this bad?** Output written straight to stdout or stderr has no
    /// request id, ignores the subscriber's level filter, and can print a
    /// caller's token identifier or a whole `Identity`.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad
    /// println!("denied {}", identity.token_identifier());
    ///
    /// // Good
    /// ctx.log().info(format_args!("task {} updated", task.id));
    /// ```
    pub enforcement_pack::NO_PRINTLN,
    Deny,
    "use of println!, eprintln!, or dbg!; log through tracing or OpLog"
}

declare_lint_pass!(NoPrintln => [NO_PRINTLN]);

impl EarlyLintPass for NoPrintln {
    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if let ExprKind::MacCall(mac) = &expr.kind {
            check_macro(cx, mac, expr.span);
        }
    }
}

fn check_macro(cx: &EarlyContext<'_>, mac: &MacCall, span: Span) {
    let [segment] = mac.path.segments.as_slice() else {
        return;
    };

    let (name, level) = match segment.ident.name.as_str() {
        "println" => ("println", "info"),
        "eprintln" => ("eprintln", "error"),
        "dbg" => ("dbg", "debug"),
        _ => return,
    };

    cx.span_lint(NO_PRINTLN, span, |diag| {
        diag.help(format!(
            "use `tracing::{level}!` or `Ctx::log()` (`OpLog`) instead"
        ));
        diag.note(format!(
            "`{name}!` output has no request id and may expose token identifiers"
        ));
    });
}

#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn register_lints(_sess: &rustc_session::Session, lint_store: &mut rustc_lint::LintStore) {
    lint_store.register_lints(&[&NO_PRINTLN]);
    lint_store.register_early_pass(|| Box::new(NoPrintln));
}

#[unsafe(no_mangle)]
pub fn dylint_version() -> *mut std::os::raw::c_char {
    std::ffi::CString::new(dylint_linting::DYLINT_VERSION)
        .expect("version string contains null byte")
        .into_raw()
}
