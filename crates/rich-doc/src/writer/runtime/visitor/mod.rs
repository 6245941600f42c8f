//! Shared tree visitor used by the renderer, the text extractor and the
//! highlight prepass.
//!
//! [`walk_node`] is the single dispatch table for the [`Node`] enum: every
//! consumer implements [`NodeHandler`] and overrides only the kinds it cares
//! about. Adding a node kind means adding one variant, one arm here and one
//! default method below.

use crate::ast::{BlockAttrs, ComponentEmbed, ImageAttrs, Mark, Node};
use ecow::EcoString;

/// Trait implemented by consumers that want to walk a document tree.
#[allow(missing_docs)]
pub trait NodeHandler {
    /// Error type produced during traversal.
    type Error;

    /// Dispatch a single node. Most implementers will not override this and
    /// will instead implement the per-variant methods below.
    fn visit_node(&mut self, node: &Node) -> Result<(), Self::Error> {
        walk_node(self, node)
    }

    /// Visit a sequence of nodes, in order.
    fn visit_nodes(&mut self, nodes: &[Node]) -> Result<(), Self::Error> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    fn doc(&mut self, children: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(children)
    }

    fn paragraph(&mut self, _block: &BlockAttrs, content: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(content)
    }

    fn heading(
        &mut self,
        _level: u8,
        _block: &BlockAttrs,
        content: &[Node],
    ) -> Result<(), Self::Error> {
        self.visit_nodes(content)
    }

    fn blockquote(&mut self, _block: &BlockAttrs, content: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(content)
    }

    fn code_block(
        &mut self,
        _language: &Option<EcoString>,
        _block: &BlockAttrs,
        content: &[Node],
    ) -> Result<(), Self::Error> {
        self.visit_nodes(content)
    }

    fn bullet_list(&mut self, _block: &BlockAttrs, items: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(items)
    }

    fn ordered_list(
        &mut self,
        _start: u32,
        _block: &BlockAttrs,
        items: &[Node],
    ) -> Result<(), Self::Error> {
        self.visit_nodes(items)
    }

    fn list_item(&mut self, content: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(content)
    }

    fn horizontal_rule(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn image(&mut self, _image: &ImageAttrs) -> Result<(), Self::Error> {
        Ok(())
    }

    fn image_resize(
        &mut self,
        _image: &ImageAttrs,
        _wrapper_style: &Option<EcoString>,
        _container_style: &Option<EcoString>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn hard_break(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn text(&mut self, _text: &EcoString, _marks: &[Mark]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn component_embed(&mut self, _embed: &ComponentEmbed) -> Result<(), Self::Error> {
        Ok(())
    }

    fn unknown(&mut self, _kind: &EcoString, content: &[Node]) -> Result<(), Self::Error> {
        self.visit_nodes(content)
    }
}

/// Dispatch a single node to the provided handler.
pub fn walk_node<H: NodeHandler + ?Sized>(handler: &mut H, node: &Node) -> Result<(), H::Error> {
    match node {
        Node::Doc(children) => handler.doc(children),
        Node::Paragraph { block, content } => handler.paragraph(block, content),
        Node::Heading {
            level,
            block,
            content,
        } => handler.heading(*level, block, content),
        Node::Blockquote { block, content } => handler.blockquote(block, content),
        Node::CodeBlock {
            language,
            block,
            content,
        } => handler.code_block(language, block, content),
        Node::BulletList { block, items } => handler.bullet_list(block, items),
        Node::OrderedList {
            start,
            block,
            items,
        } => handler.ordered_list(*start, block, items),
        Node::ListItem(content) => handler.list_item(content),
        Node::HorizontalRule => handler.horizontal_rule(),
        Node::Image(image) => handler.image(image),
        Node::ImageResize {
            image,
            wrapper_style,
            container_style,
        } => handler.image_resize(image, wrapper_style, container_style),
        Node::HardBreak => handler.hard_break(),
        Node::Text { text, marks } => handler.text(text, marks),
        Node::ComponentEmbed(embed) => handler.component_embed(embed),
        Node::Unknown { kind, content } => handler.unknown(kind, content),
    }
}
