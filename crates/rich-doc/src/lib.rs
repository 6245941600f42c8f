#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

// AST related exports
pub use crate::ast::{BlockAttrs, ComponentEmbed, Document, ImageAttrs, Mark, Node};

// Error types
pub use crate::error::{Error, Result};

// HTML writer related exports
pub use crate::writer::{
    Diagnostic, DiagnosticSeverity, DiagnosticSink, HtmlWriteError, HtmlWriteResult, HtmlWriter,
    RenderOptions,
};

// Rendering
pub use crate::highlight::{
    CommandHighlighter, HighlightError, Highlighter, NoHighlight, TimeoutHighlighter,
};
pub use crate::render::{Rendered, Renderer};

// Text, validation and widgets
pub use crate::registry::{Category, ComponentDescriptor, ComponentRegistry, PropSchema, PropType};
pub use crate::text::{estimate_read_minutes, extract_text, word_count, DEFAULT_WORDS_PER_MINUTE};
pub use crate::validate::{validate, Validation};

pub mod ast;
pub mod error;
pub mod highlight;
pub mod registry;
pub mod render;
pub mod text;
pub mod validate;
pub mod writer;
