//! Render-time diagnostics.
//!
//! Rendering degrades node by node instead of failing. Each degradation (a
//! highlighter error, an embed naming an unregistered component) becomes a
//! [`Diagnostic`] tagged with the editor kind of the node it concerns.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ecow::EcoString;

/// How much a diagnostic matters to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// The node was rendered in a degraded form.
    Warning,
    /// Nothing visible changed.
    Info,
}

impl DiagnosticSeverity {
    /// Lowercase label, as printed by [`Diagnostic`]'s `Display`.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

/// One non-fatal issue found while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// Editor tag of the node concerned, e.g. `codeBlock`.
    pub node_kind: EcoString,
    /// Human-readable message.
    pub message: EcoString,
}

impl Diagnostic {
    /// A diagnostic for a node that rendered degraded.
    pub fn warning(node_kind: impl Into<EcoString>, message: impl Into<EcoString>) -> Self {
        Self::new(DiagnosticSeverity::Warning, node_kind, message)
    }

    /// A purely informational diagnostic.
    pub fn info(node_kind: impl Into<EcoString>, message: impl Into<EcoString>) -> Self {
        Self::new(DiagnosticSeverity::Info, node_kind, message)
    }

    fn new(
        severity: DiagnosticSeverity,
        node_kind: impl Into<EcoString>,
        message: impl Into<EcoString>,
    ) -> Self {
        Self {
            severity,
            node_kind: node_kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {}",
            self.severity.as_str(),
            self.node_kind,
            self.message
        )
    }
}

/// Receives diagnostics from [`HtmlWriter`](crate::HtmlWriter).
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Drops everything. The writer's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _: Diagnostic) {}
}

/// Collects diagnostics into a list the caller keeps a handle to.
///
/// Clones share the same list, so one clone can be boxed into a writer while
/// another is drained afterwards.
#[derive(Debug, Clone, Default)]
pub struct SharedVecSink {
    target: Rc<RefCell<Vec<Diagnostic>>>,
}

impl SharedVecSink {
    /// Everything collected so far, leaving the list empty.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.target.take()
    }
}

impl DiagnosticSink for SharedVecSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.target.borrow_mut().push(diagnostic);
    }
}
