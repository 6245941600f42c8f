//! Lenient conversion from the editor's JSON into the typed tree.
//!
//! Conversion never fails on shape: missing or mistyped attributes fall back
//! to defaults, and unrecognized kinds become [`Node::Unknown`]. Structural
//! problems are reported by [`crate::validate`], not here.

use ecow::EcoString;
use serde_json::{Map, Value};

use super::node::{BlockAttrs, ComponentEmbed, ImageAttrs, Mark, Node};
use crate::error::Result;

/// A parsed document, rooted at a single node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wraps an already-built root node.
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Builds a document from a JSON value.
    pub fn from_value(value: &Value) -> Self {
        Self::new(Node::from_value(value))
    }

    /// Parses JSON text. Only malformed JSON is an error.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The root node's children.
    pub fn content(&self) -> &[Node] {
        self.root.children()
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl Node {
    /// Converts a JSON value into a node, substituting defaults for anything
    /// malformed.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Node::Unknown {
                kind: EcoString::new(),
                content: vec![],
            };
        };

        let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
        let attrs = Attrs(obj.get("attrs").and_then(Value::as_object));

        if kind == "text" {
            return Node::Text {
                text: obj
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .into(),
                marks: obj
                    .get("marks")
                    .and_then(Value::as_array)
                    .map(|marks| marks.iter().map(Mark::from_value).collect())
                    .unwrap_or_default(),
            };
        }

        let content = || -> Vec<Node> {
            obj.get("content")
                .and_then(Value::as_array)
                .map(|children| children.iter().map(Node::from_value).collect())
                .unwrap_or_default()
        };

        match kind {
            "doc" => Node::Doc(content()),
            "paragraph" => Node::Paragraph {
                block: attrs.block(),
                content: content(),
            },
            "heading" => Node::Heading {
                level: attrs.heading_level(),
                block: attrs.block(),
                content: content(),
            },
            "blockquote" => Node::Blockquote {
                block: attrs.block(),
                content: content(),
            },
            "codeBlock" => Node::CodeBlock {
                language: attrs.string("language"),
                block: attrs.block(),
                content: content(),
            },
            "bulletList" => Node::BulletList {
                block: attrs.block(),
                items: content(),
            },
            "orderedList" => Node::OrderedList {
                start: attrs.integer("start").map_or(1, |n| n.min(u32::MAX as u64) as u32),
                block: attrs.block(),
                items: content(),
            },
            "listItem" => Node::ListItem(content()),
            "horizontalRule" => Node::HorizontalRule,
            "hardBreak" => Node::HardBreak,
            "image" => Node::Image(attrs.image()),
            "imageResize" => Node::ImageResize {
                image: attrs.image(),
                wrapper_style: attrs.string("wrapperStyle"),
                container_style: attrs.string("containerStyle"),
            },
            // `svelteComponent` is the tag older editor builds persisted.
            "componentEmbed" | "svelteComponent" => Node::ComponentEmbed(ComponentEmbed {
                name: attrs.string("name").unwrap_or_else(|| "Unknown".into()),
                props: attrs.object("props"),
                context_id: attrs.string("contextId"),
            }),
            other => Node::Unknown {
                kind: other.into(),
                content: content(),
            },
        }
    }
}

impl Mark {
    /// Converts a JSON mark object. Unrecognized marks are kept as
    /// [`Mark::Unknown`].
    pub fn from_value(value: &Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        match kind {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "strike" => Mark::Strike,
            "code" => Mark::Code,
            "link" => Mark::Link {
                href: Attrs(value.get("attrs").and_then(Value::as_object))
                    .string("href")
                    .unwrap_or_default(),
            },
            other => Mark::Unknown(other.into()),
        }
    }
}

/// Read-only view over an optional `attrs` object.
#[derive(Clone, Copy)]
struct Attrs<'a>(Option<&'a Map<String, Value>>);

impl<'a> Attrs<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|attrs| attrs.get(key))
    }

    /// A non-empty string attribute.
    fn string(&self, key: &str) -> Option<EcoString> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.as_str().into()),
            _ => None,
        }
    }

    /// A string or number attribute, kept as its textual form.
    fn scalar(&self, key: &str) -> Option<EcoString> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.as_str().into()),
            // zero counts as unset
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string().into()),
            _ => None,
        }
    }

    /// A non-negative integer attribute, also accepted as a numeric string.
    fn integer(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn object(&self, key: &str) -> Map<String, Value> {
        self.get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    fn heading_level(&self) -> u8 {
        self.integer("level")
            .map_or(1, |level| level.clamp(1, 6) as u8)
    }

    fn block(&self) -> BlockAttrs {
        BlockAttrs {
            text_align: self.string("textAlign"),
            background_pattern: self.string("backgroundPattern"),
        }
    }

    fn image(&self) -> ImageAttrs {
        ImageAttrs {
            src: self.string("src").unwrap_or_default(),
            alt: self.string("alt").unwrap_or_default(),
            title: self.string("title"),
            width: self.scalar("width"),
            height: self.scalar("height"),
        }
    }
}
