//! Typed tree for the rich-text editor's documents.
//!
//! This module defines the node kinds the editor produces (paragraphs,
//! headings, lists, code blocks, images, component embeds, ...), the marks
//! applied to text leaves, and the lenient conversion from JSON.

mod node;
mod parse;

pub use self::node::{BlockAttrs, ComponentEmbed, ImageAttrs, Mark, Node};
pub use self::parse::Document;
