//! The asynchronous rendering entry point.
//!
//! Rendering runs in two passes. The prepass walks the tree once to collect
//! every code block and highlights them all concurrently. The HTML pass is a
//! plain synchronous walk that takes each block's result by position. This
//! keeps the writer free of `async` and guarantees output order regardless
//! of which highlight call finishes first.

use std::convert::Infallible;
use std::sync::Arc;

use ecow::{eco_format, EcoString};
use futures::future::join_all;
use serde_json::Value;

use crate::ast::{BlockAttrs, Document, Node};
use crate::error::Result;
use crate::highlight::{HighlightError, Highlighter};
use crate::registry::ComponentRegistry;
use crate::text::collect_text;
use crate::writer::runtime::diagnostics::{Diagnostic, SharedVecSink};
use crate::writer::runtime::visitor::{walk_node, NodeHandler};
use crate::writer::{HtmlWriter, RenderOptions};

/// HTML together with everything that degraded while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered fragment.
    pub html: EcoString,
    /// Non-fatal issues, prepass first, then in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders documents to HTML.
///
/// A renderer is immutable once built and may be shared between tasks; each
/// call owns its output buffer.
///
/// ```rust
/// use rich_doc::{Document, Node, Renderer};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> rich_doc::Result<()> {
/// let doc = Document::new(Node::doc(vec![Node::paragraph(vec![])]));
/// let html = Renderer::default().render(&doc).await?;
/// assert_eq!(html, "<p><br></p>");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
    highlighter: Option<Arc<dyn Highlighter>>,
    registry: Option<Arc<ComponentRegistry>>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .field("highlighter", &self.highlighter.is_some())
            .field("registry", &self.registry.as_ref().map(|registry| registry.len()))
            .finish()
    }
}

impl Renderer {
    /// Creates a renderer without a highlighter or registry.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            highlighter: None,
            registry: None,
        }
    }

    /// Delegates code blocks that name a language to `highlighter`.
    pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Checks embed names against `registry`.
    pub fn with_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The options every call uses.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `doc` to an HTML fragment.
    ///
    /// Content problems never fail the call; see
    /// [`Self::render_with_diagnostics`] to inspect them. An error means the
    /// options are unusable, e.g. a placeholder tag that is not a valid tag
    /// name.
    pub async fn render(&self, doc: &Document) -> Result<EcoString> {
        Ok(self.render_with_diagnostics(doc).await?.html)
    }

    /// Parses a JSON value leniently and renders it.
    pub async fn render_value(&self, value: &Value) -> Result<EcoString> {
        self.render(&Document::from_value(value)).await
    }

    /// Renders `doc`, also returning every degradation that happened.
    pub async fn render_with_diagnostics(&self, doc: &Document) -> Result<Rendered> {
        let mut diagnostics = Vec::new();
        let highlighted = self.highlight_code_blocks(doc, &mut diagnostics).await;

        let sink = SharedVecSink::default();
        let mut writer = HtmlWriter::with_options(self.options.clone())
            .with_highlighted(highlighted)
            .with_diagnostic_sink(Box::new(sink.clone()));
        if let Some(registry) = &self.registry {
            writer = writer.with_registry(Arc::clone(registry));
        }
        writer.write_node(doc.root())?;
        let html = writer.into_string()?;

        diagnostics.extend(sink.take());
        log::debug!(
            "rendered {} bytes with {} diagnostics",
            html.len(),
            diagnostics.len()
        );
        Ok(Rendered { html, diagnostics })
    }

    /// Highlights every eligible code block concurrently. The result has one
    /// slot per code block in depth-first order; `None` means plain output.
    async fn highlight_code_blocks(
        &self,
        doc: &Document,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Option<EcoString>> {
        let highlighter = match &self.highlighter {
            Some(highlighter) if self.options.enable_syntax_highlighting => highlighter.as_ref(),
            _ => return Vec::new(),
        };

        let mut collector = CodeBlockCollector::default();
        let _ = walk_node(&mut collector, doc.root());
        if collector.blocks.is_empty() {
            return Vec::new();
        }

        let jobs = collector.blocks.iter().map(|block| async move {
            let language = block.language.as_deref()?;
            Some(highlighter.highlight(&block.code, language).await)
        });
        let results = join_all(jobs).await;
        log::debug!("highlight prepass finished {} code blocks", results.len());

        results
            .into_iter()
            .zip(&collector.blocks)
            .map(|(result, block)| match result? {
                Ok(html) => Some(html),
                Err(err) => {
                    diagnostics.push(highlight_failure(block, &err));
                    None
                }
            })
            .collect()
    }
}

fn highlight_failure(block: &PendingCodeBlock, err: &HighlightError) -> Diagnostic {
    let diagnostic = Diagnostic::warning(
        "codeBlock",
        eco_format!(
            "could not highlight {} code, rendering it plain: {err}",
            block.language.as_deref().unwrap_or_default()
        ),
    );
    log::warn!("{diagnostic}");
    diagnostic
}

struct PendingCodeBlock {
    /// Trimmed, non-empty language, if any.
    language: Option<EcoString>,
    code: EcoString,
}

/// Gathers code blocks in the order [`HtmlWriter`] will meet them.
#[derive(Default)]
struct CodeBlockCollector {
    blocks: Vec<PendingCodeBlock>,
}

impl NodeHandler for CodeBlockCollector {
    type Error = Infallible;

    fn code_block(
        &mut self,
        language: &Option<EcoString>,
        _block: &BlockAttrs,
        content: &[Node],
    ) -> std::result::Result<(), Self::Error> {
        // Code blocks do not nest: the writer reads their content as text.
        self.blocks.push(PendingCodeBlock {
            language: language
                .as_deref()
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(EcoString::from),
            code: collect_text(content),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests;
