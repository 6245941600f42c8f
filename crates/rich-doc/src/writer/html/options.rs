use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// Options for configuring the rendering process.
///
/// The defaults reproduce the markup the blog's stylesheets expect. Hosts may
/// also load the options from JSON (camelCase keys, every key optional).
///
/// # Example
///
/// ```rust
/// use rich_doc::RenderOptions;
///
/// let options = RenderOptions::default()
///     .with_syntax_highlighting(false)
///     .with_link_class(None::<&str>);
/// assert!(!options.enable_syntax_highlighting);
///
/// let loaded: RenderOptions =
///     serde_json::from_str(r#"{ "placeholderTag": "widget-slot" }"#).unwrap();
/// assert_eq!(loaded.placeholder_tag, "widget-slot");
/// assert!(loaded.enable_syntax_highlighting);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Delegate code blocks that name a language to the highlighter.
    pub enable_syntax_highlighting: bool,

    /// A prefix for the class name applied to plain code blocks.
    /// For example, if set to "lang-", a Rust code block gets class "lang-rust".
    /// If None, no language class is added.
    pub code_block_language_class_prefix: Option<EcoString>,

    /// Class added to every link produced by a `link` mark.
    pub link_class: Option<EcoString>,

    /// Class added to every `<img>`.
    pub image_class: Option<EcoString>,

    /// Tag name of the inert element emitted for component embeds.
    pub placeholder_tag: EcoString,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            enable_syntax_highlighting: true,
            code_block_language_class_prefix: Some("language-".into()),
            link_class: Some("blog-link".into()),
            image_class: Some("blog-image".into()),
            placeholder_tag: "component-placeholder".into(),
        }
    }
}

impl RenderOptions {
    /// Enables or disables syntax highlighting.
    pub fn with_syntax_highlighting(mut self, enable: bool) -> Self {
        self.enable_syntax_highlighting = enable;
        self
    }

    /// Sets the code block language class prefix.
    pub fn with_code_block_prefix<S: Into<EcoString>>(mut self, prefix: Option<S>) -> Self {
        self.code_block_language_class_prefix = prefix.map(|p| p.into());
        self
    }

    /// Sets the class added to links.
    pub fn with_link_class<S: Into<EcoString>>(mut self, class: Option<S>) -> Self {
        self.link_class = class.map(|c| c.into());
        self
    }

    /// Sets the class added to images.
    pub fn with_image_class<S: Into<EcoString>>(mut self, class: Option<S>) -> Self {
        self.image_class = class.map(|c| c.into());
        self
    }

    /// Sets the tag name of component placeholders.
    pub fn with_placeholder_tag<S: Into<EcoString>>(mut self, tag: S) -> Self {
        self.placeholder_tag = tag.into();
        self
    }

    /// Enables or disables syntax highlighting.
    pub fn set_syntax_highlighting(&mut self, enable: bool) {
        self.enable_syntax_highlighting = enable;
    }
}
