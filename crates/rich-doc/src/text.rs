//! Plain-text extraction and read-time estimation.

use std::convert::Infallible;

use ecow::EcoString;

use crate::ast::{BlockAttrs, Mark, Node};
use crate::writer::runtime::visitor::{walk_node, NodeHandler};

/// Reading speed used when the caller does not pick one.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Collects text leaves depth-first.
///
/// Contiguous leaves inside one block are concatenated as-is; block
/// boundaries and hard breaks are separated by a single space.
struct PlainTextCollector<'a> {
    buffer: &'a mut EcoString,
}

impl<'a> PlainTextCollector<'a> {
    fn new(buffer: &'a mut EcoString) -> Self {
        Self { buffer }
    }

    fn push_space(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with(char::is_whitespace) {
            self.buffer.push(' ');
        }
    }

    fn block(&mut self, content: &[Node]) -> Result<(), Infallible> {
        self.push_space();
        self.visit_nodes(content)
    }
}

impl NodeHandler for PlainTextCollector<'_> {
    type Error = Infallible;

    fn paragraph(&mut self, _block: &BlockAttrs, content: &[Node]) -> Result<(), Self::Error> {
        self.block(content)
    }

    fn heading(
        &mut self,
        _level: u8,
        _block: &BlockAttrs,
        content: &[Node],
    ) -> Result<(), Self::Error> {
        self.block(content)
    }

    fn blockquote(&mut self, _block: &BlockAttrs, content: &[Node]) -> Result<(), Self::Error> {
        self.block(content)
    }

    fn code_block(
        &mut self,
        _language: &Option<EcoString>,
        _block: &BlockAttrs,
        content: &[Node],
    ) -> Result<(), Self::Error> {
        self.block(content)
    }

    fn list_item(&mut self, content: &[Node]) -> Result<(), Self::Error> {
        self.block(content)
    }

    fn hard_break(&mut self) -> Result<(), Self::Error> {
        self.push_space();
        Ok(())
    }

    fn text(&mut self, text: &EcoString, _marks: &[Mark]) -> Result<(), Self::Error> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn unknown(&mut self, _kind: &EcoString, content: &[Node]) -> Result<(), Self::Error> {
        self.block(content)
    }
}

/// Concatenates the raw text of a node sequence without block separators
/// at the edges. Code blocks use this for their source text.
pub(crate) fn collect_text(nodes: &[Node]) -> EcoString {
    let mut buffer = EcoString::new();
    let mut collector = PlainTextCollector::new(&mut buffer);
    for node in nodes {
        let _ = walk_node(&mut collector, node);
    }
    buffer
}

/// Extracts the plain text under `node`, ignoring marks and attributes.
///
/// ```rust
/// use rich_doc::{extract_text, Node};
///
/// let doc = Node::doc(vec![
///     Node::paragraph(vec![Node::text("Hello "), Node::text("world")]),
///     Node::paragraph(vec![Node::text("again")]),
/// ]);
/// assert_eq!(extract_text(&doc), "Hello world again");
/// ```
pub fn extract_text(node: &Node) -> EcoString {
    collect_text(std::slice::from_ref(node))
}

/// Counts whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated minutes to read `node` at `words_per_minute`.
///
/// Never returns less than 1, even for a document without words; callers
/// that want 0 for empty documents check [`word_count`] themselves. A speed
/// of 0 falls back to [`DEFAULT_WORDS_PER_MINUTE`].
pub fn estimate_read_minutes(node: &Node, words_per_minute: u32) -> u32 {
    let words_per_minute = match words_per_minute {
        0 => DEFAULT_WORDS_PER_MINUTE,
        wpm => wpm,
    } as usize;
    let words = word_count(&extract_text(node));
    words.div_ceil(words_per_minute).max(1) as u32
}
