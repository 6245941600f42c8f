//! HTML writer implementation.
//!
//! This module turns document trees into HTML. The tree walk is shared with
//! the text extractor and the highlight prepass through [`NodeHandler`].

pub mod html;
pub mod runtime;

pub use self::html::{HtmlWriteError, HtmlWriteResult, HtmlWriter, RenderOptions};

pub use self::runtime::diagnostics::{
    Diagnostic, DiagnosticSeverity, DiagnosticSink, NullSink, SharedVecSink,
};
pub use self::runtime::visitor::{walk_node, NodeHandler};
