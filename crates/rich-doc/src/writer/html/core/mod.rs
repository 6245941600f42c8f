use super::{utils, HtmlWriteError, HtmlWriteResult, RenderOptions};
use crate::ast::{BlockAttrs, ComponentEmbed, ImageAttrs, Mark, Node};
use crate::registry::ComponentRegistry;
use crate::writer::runtime::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
use crate::writer::runtime::visitor::{walk_node, NodeHandler};
use ecow::EcoString;
use std::fmt;
use std::sync::Arc;

mod guard;

pub(crate) use guard::GuardedTagWriter;

/// Streams a document tree into an HTML fragment.
///
/// The writer is the synchronous half of rendering. It walks the tree once,
/// escaping everything that comes from the document except the values the
/// upload subsystem and the editor produce themselves (image URLs and resize
/// styles). Code blocks take their highlighted markup from the slots filled
/// by [`crate::Renderer`]; without slots they render as plain escaped code.
///
/// ```rust
/// use rich_doc::{HtmlWriter, Mark, Node};
///
/// let mut writer = HtmlWriter::new();
/// writer
///     .write_node(&Node::paragraph(vec![
///         Node::text("Tom & "),
///         Node::marked_text("Jerry", vec![Mark::Italic]),
///     ]))
///     .unwrap();
/// assert_eq!(writer.into_string().unwrap(), "<p>Tom &amp; <em>Jerry</em></p>");
/// ```
///
/// The tag primitives are public for hosts that wrap the fragment:
///
/// ```rust
/// use rich_doc::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.start_tag("article").unwrap();
/// writer.attribute("data-slug", "fire & ice").unwrap();
/// writer.finish_tag().unwrap();
/// writer.end_tag("article").unwrap();
/// assert_eq!(
///     writer.into_string().unwrap(),
///     r#"<article data-slug="fire &amp; ice"></article>"#
/// );
/// ```
pub struct HtmlWriter {
    /// Rendering options.
    pub options: RenderOptions,
    pub(crate) buffer: EcoString,
    /// Set between `start_tag` and the `>` that ends the opening tag.
    in_open_tag: bool,
    diagnostics: Box<dyn DiagnosticSink + 'static>,
    /// Highlighted markup per code block, in document order.
    highlighted: Vec<Option<EcoString>>,
    code_blocks_seen: usize,
    registry: Option<Arc<ComponentRegistry>>,
}

impl fmt::Debug for HtmlWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlWriter")
            .field("options", &self.options)
            .field("written", &self.buffer.len())
            .field("in_open_tag", &self.in_open_tag)
            .field(
                "highlighted",
                &(self.code_blocks_seen, self.highlighted.len()),
            )
            .finish_non_exhaustive()
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlWriter {
    /// A writer with default options, no highlighted slots and no registry.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// A writer using `options`.
    pub fn with_options(options: RenderOptions) -> Self {
        HtmlWriter {
            options,
            buffer: EcoString::new(),
            in_open_tag: false,
            diagnostics: Box::new(NullSink),
            highlighted: Vec::new(),
            code_blocks_seen: 0,
            registry: None,
        }
    }

    /// Reports degradations to `sink` instead of dropping them.
    pub fn with_diagnostic_sink(mut self, sink: Box<dyn DiagnosticSink + 'static>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Supplies highlighted markup for code blocks, indexed by their position
    /// in a depth-first walk. `None` entries render as plain code.
    pub fn with_highlighted(mut self, highlighted: Vec<Option<EcoString>>) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Attaches the component registry used to check embed names.
    pub fn with_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub(crate) fn emit_warning(&mut self, node_kind: &str, message: impl Into<EcoString>) {
        let diagnostic = Diagnostic::warning(node_kind, message);
        log::warn!("{diagnostic}");
        self.diagnostics.emit(diagnostic);
    }

    pub(crate) fn registry(&self) -> Option<&ComponentRegistry> {
        self.registry.as_deref()
    }

    /// Returns the fragment written so far, closing a dangling open tag.
    pub fn into_string(mut self) -> HtmlWriteResult<EcoString> {
        self.close_open_tag();
        Ok(self.buffer)
    }

    fn close_open_tag(&mut self) {
        if std::mem::take(&mut self.in_open_tag) {
            self.buffer.push('>');
        }
    }

    /// Writes `<tag_name`, leaving the tag open for attributes.
    pub fn start_tag(&mut self, tag_name: &str) -> HtmlWriteResult<()> {
        self.close_open_tag();
        self.buffer.push('<');
        self.buffer.push_str(tag_name);
        self.in_open_tag = true;
        Ok(())
    }

    /// Adds an attribute to the open tag, escaping the value.
    pub fn attribute(&mut self, key: &str, value: &str) -> HtmlWriteResult<()> {
        self.trusted_attribute(key, &utils::escape(value))
    }

    /// Adds an attribute whose value is written verbatim.
    ///
    /// Only for values this system produced itself (upload URLs, editor
    /// styles). Document text must go through [`Self::attribute`].
    pub fn trusted_attribute(&mut self, key: &str, value: &str) -> HtmlWriteResult<()> {
        if !self.in_open_tag {
            return Err(HtmlWriteError::InvalidState(
                "cannot write attribute: no tag is currently open",
            ));
        }
        self.buffer.push(' ');
        self.buffer.push_str(key);
        self.buffer.push_str("=\"");
        self.buffer.push_str(value);
        self.buffer.push('"');
        Ok(())
    }

    /// Ends the opening tag with `>`.
    pub fn finish_tag(&mut self) -> HtmlWriteResult<()> {
        self.close_open_tag();
        Ok(())
    }

    /// Writes `</tag_name>`.
    pub fn end_tag(&mut self, tag_name: &str) -> HtmlWriteResult<()> {
        self.close_open_tag();
        self.buffer.push_str("</");
        self.buffer.push_str(tag_name);
        self.buffer.push('>');
        Ok(())
    }

    /// Writes a void element (`<br>`, `<hr>`) with no attributes.
    pub fn void_tag(&mut self, tag_name: &str) -> HtmlWriteResult<()> {
        self.start_tag(tag_name)?;
        self.finish_tag()
    }

    /// Writes escaped text.
    pub fn text(&mut self, text: &str) -> HtmlWriteResult<()> {
        self.close_open_tag();
        self.buffer.push_str(&utils::escape(text));
        Ok(())
    }

    /// Writes markup verbatim.
    ///
    /// Reserved for highlighter output. Anything that comes from the
    /// document goes through [`Self::text`].
    pub fn write_trusted_html(&mut self, html: &str) -> HtmlWriteResult<()> {
        self.close_open_tag();
        self.buffer.push_str(html);
        Ok(())
    }

    /// Starts a tag whose name comes from configuration, rejecting unsafe names.
    pub(crate) fn guarded_tag<'a>(
        &'a mut self,
        tag_name: &str,
    ) -> HtmlWriteResult<GuardedTagWriter<'a>> {
        if !utils::is_safe_tag_name(tag_name) {
            return Err(HtmlWriteError::InvalidHtmlTag(tag_name.to_string()));
        }
        self.start_tag(tag_name)?;
        Ok(GuardedTagWriter::new(self, tag_name.into()))
    }

    /// Writes `node` and everything under it.
    pub fn write_node(&mut self, node: &Node) -> HtmlWriteResult<()> {
        walk_node(self, node)
    }

    /// Takes the highlighted markup for the next code block, if any.
    pub(crate) fn next_highlighted(&mut self) -> Option<EcoString> {
        let slot = self.code_blocks_seen;
        self.code_blocks_seen += 1;
        self.highlighted.get(slot).cloned().flatten()
    }
}

impl NodeHandler for HtmlWriter {
    type Error = HtmlWriteError;

    fn doc(&mut self, children: &[Node]) -> HtmlWriteResult<()> {
        self.visit_nodes(children)
    }

    fn paragraph(&mut self, block: &BlockAttrs, content: &[Node]) -> HtmlWriteResult<()> {
        self.write_paragraph(block, content)
    }

    fn heading(&mut self, level: u8, block: &BlockAttrs, content: &[Node]) -> HtmlWriteResult<()> {
        self.write_heading(level, block, content)
    }

    fn blockquote(&mut self, block: &BlockAttrs, content: &[Node]) -> HtmlWriteResult<()> {
        self.write_blockquote(block, content)
    }

    fn code_block(
        &mut self,
        language: &Option<EcoString>,
        block: &BlockAttrs,
        content: &[Node],
    ) -> HtmlWriteResult<()> {
        self.write_code_block(language, block, content)
    }

    fn bullet_list(&mut self, block: &BlockAttrs, items: &[Node]) -> HtmlWriteResult<()> {
        self.write_list("ul", None, block, items)
    }

    fn ordered_list(&mut self, start: u32, block: &BlockAttrs, items: &[Node]) -> HtmlWriteResult<()> {
        self.write_list("ol", Some(start), block, items)
    }

    fn list_item(&mut self, content: &[Node]) -> HtmlWriteResult<()> {
        self.write_list_item(content)
    }

    fn horizontal_rule(&mut self) -> HtmlWriteResult<()> {
        self.void_tag("hr")
    }

    fn image(&mut self, image: &ImageAttrs) -> HtmlWriteResult<()> {
        self.write_image(image)
    }

    fn image_resize(
        &mut self,
        image: &ImageAttrs,
        wrapper_style: &Option<EcoString>,
        container_style: &Option<EcoString>,
    ) -> HtmlWriteResult<()> {
        self.write_image_resize(image, wrapper_style, container_style)
    }

    fn hard_break(&mut self) -> HtmlWriteResult<()> {
        self.void_tag("br")
    }

    fn text(&mut self, text: &EcoString, marks: &[Mark]) -> HtmlWriteResult<()> {
        self.write_marked_text(text, marks)
    }

    fn component_embed(&mut self, embed: &ComponentEmbed) -> HtmlWriteResult<()> {
        self.write_component_embed(embed)
    }

    fn unknown(&mut self, kind: &EcoString, content: &[Node]) -> HtmlWriteResult<()> {
        log::debug!("rendering children of unknown node kind {kind:?} without a wrapper");
        self.visit_nodes(content)
    }
}
