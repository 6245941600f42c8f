//! Node definitions for the rich-text document tree.

use ecow::EcoString;
use serde_json::{Map, Value};

/// Presentation attributes the editor may attach to block nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockAttrs {
    /// CSS `text-align` value (`left`, `center`, ...).
    pub text_align: Option<EcoString>,
    /// Name of a decorative background pattern, rendered as `bg-pattern-{name}`.
    pub background_pattern: Option<EcoString>,
}

/// Attributes shared by `image` and `imageResize` nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageAttrs {
    /// Image URL produced by the upload subsystem. Emitted verbatim.
    pub src: EcoString,
    /// Alternative text.
    pub alt: EcoString,
    /// Optional tooltip title.
    pub title: Option<EcoString>,
    /// Optional width, kept as authored (`"320"`, `"50%"`, ...).
    pub width: Option<EcoString>,
    /// Optional height, kept as authored.
    pub height: Option<EcoString>,
}

/// A reference to an interactive widget, hydrated outside the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentEmbed {
    /// Key into the component registry.
    pub name: EcoString,
    /// Free-form widget configuration.
    pub props: Map<String, Value>,
    /// Correlates sibling embeds that share reactive state.
    pub context_id: Option<EcoString>,
}

/// Inline formatting applied to a text leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// `<strong>`
    Bold,
    /// `<em>`
    Italic,
    /// `<s>`
    Strike,
    /// `<code>`
    Code,
    /// Hyperlink.
    Link {
        /// Link target, escaped but otherwise emitted as authored.
        href: EcoString,
    },
    /// A mark this crate does not know about. Ignored when rendering.
    Unknown(EcoString),
}

/// Main node type, representing an element of a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root node, contains block nodes
    Doc(Vec<Node>),

    /// Paragraph, containing inline nodes
    Paragraph {
        /// Presentation attributes
        block: BlockAttrs,
        /// Inline content
        content: Vec<Node>,
    },

    /// Heading
    Heading {
        /// Heading level, 1-6
        level: u8,
        /// Presentation attributes
        block: BlockAttrs,
        /// Inline content
        content: Vec<Node>,
    },

    /// Block quote, containing any block nodes
    Blockquote {
        /// Presentation attributes
        block: BlockAttrs,
        /// Block content
        content: Vec<Node>,
    },

    /// Code block. The code is the raw text of its descendants.
    CodeBlock {
        /// Optional language identifier
        language: Option<EcoString>,
        /// Presentation attributes
        block: BlockAttrs,
        /// Text leaves holding the code
        content: Vec<Node>,
    },

    /// Unordered list
    BulletList {
        /// Presentation attributes
        block: BlockAttrs,
        /// List items
        items: Vec<Node>,
    },

    /// Ordered list
    OrderedList {
        /// List starting number
        start: u32,
        /// Presentation attributes
        block: BlockAttrs,
        /// List items
        items: Vec<Node>,
    },

    /// List item, containing block nodes
    ListItem(Vec<Node>),

    /// Horizontal rule
    HorizontalRule,

    /// Plain image
    Image(ImageAttrs),

    /// Image wrapped in the editor's resize containers
    ImageResize {
        /// Image attributes
        image: ImageAttrs,
        /// Inline style of the outer wrapper, editor-authored and trusted
        wrapper_style: Option<EcoString>,
        /// Inline style of the inner container, editor-authored and trusted
        container_style: Option<EcoString>,
    },

    /// Hard line break
    HardBreak,

    /// Text leaf
    Text {
        /// Raw, unescaped text
        text: EcoString,
        /// Marks, applied innermost-first
        marks: Vec<Mark>,
    },

    /// Embedded interactive component
    ComponentEmbed(ComponentEmbed),

    /// A node kind this crate does not know about. Its children still render.
    Unknown {
        /// The original `type` tag
        kind: EcoString,
        /// Child nodes
        content: Vec<Node>,
    },
}

impl Default for Node {
    fn default() -> Self {
        Node::Doc(vec![])
    }
}

impl Node {
    /// The editor's `type` tag for this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Doc(_) => "doc",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Blockquote { .. } => "blockquote",
            Node::CodeBlock { .. } => "codeBlock",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::HorizontalRule => "horizontalRule",
            Node::Image(_) => "image",
            Node::ImageResize { .. } => "imageResize",
            Node::HardBreak => "hardBreak",
            Node::Text { .. } => "text",
            Node::ComponentEmbed(_) => "componentEmbed",
            Node::Unknown { kind, .. } => kind.as_str(),
        }
    }

    /// Child nodes. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc(content)
            | Node::ListItem(content)
            | Node::Paragraph { content, .. }
            | Node::Heading { content, .. }
            | Node::Blockquote { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Unknown { content, .. } => content,
            Node::BulletList { items, .. } | Node::OrderedList { items, .. } => items,
            Node::HorizontalRule
            | Node::Image(_)
            | Node::ImageResize { .. }
            | Node::HardBreak
            | Node::Text { .. }
            | Node::ComponentEmbed(_) => &[],
        }
    }

    /// Create a root node
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc(content)
    }

    /// Create an unmarked text leaf
    pub fn text(text: impl Into<EcoString>) -> Self {
        Node::Text {
            text: text.into(),
            marks: vec![],
        }
    }

    /// Create a text leaf with marks
    pub fn marked_text(text: impl Into<EcoString>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    /// Create a paragraph without presentation attributes
    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph {
            block: BlockAttrs::default(),
            content,
        }
    }

    /// Create a heading, clamping the level into 1-6
    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading {
            level: level.clamp(1, 6),
            block: BlockAttrs::default(),
            content,
        }
    }

    /// Create a code block holding a single text leaf
    pub fn code_block(language: Option<&str>, code: impl Into<EcoString>) -> Self {
        Node::CodeBlock {
            language: language.map(Into::into),
            block: BlockAttrs::default(),
            content: vec![Node::text(code)],
        }
    }

    /// Create a component embed
    pub fn embed(name: impl Into<EcoString>, props: Map<String, Value>) -> Self {
        Node::ComponentEmbed(ComponentEmbed {
            name: name.into(),
            props,
            context_id: None,
        })
    }
}
