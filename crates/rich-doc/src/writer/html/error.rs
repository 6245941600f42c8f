use std::fmt::{self, Display};

/// Errors that can occur while writing HTML.
///
/// Document content never produces these: malformed nodes degrade instead.
/// They signal misuse of the writer primitives or an unusable
/// [`RenderOptions`](super::RenderOptions) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlWriteError {
    /// An invalid HTML tag name was encountered.
    InvalidHtmlTag(String),
    /// An invalid HTML attribute name was encountered.
    InvalidHtmlAttribute(String),
    /// A primitive was called while the writer was in the wrong state.
    InvalidState(&'static str),
}

impl Display for HtmlWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlWriteError::InvalidHtmlTag(tag_name) => {
                write!(
                    f,
                    "Invalid HTML tag name: '{tag_name}'. Tag names should only contain alphanumeric characters, underscores, colons, or hyphens."
                )
            }
            HtmlWriteError::InvalidHtmlAttribute(attr_name) => {
                write!(
                    f,
                    "Invalid HTML attribute name: '{attr_name}'. Attribute names should only contain alphanumeric characters, underscores, colons, dots, or hyphens."
                )
            }
            HtmlWriteError::InvalidState(msg) => write!(f, "HTML writer misuse: {msg}"),
        }
    }
}

impl std::error::Error for HtmlWriteError {}

/// Result type alias for HTML writer operations.
pub type HtmlWriteResult<T> = Result<T, HtmlWriteError>;
