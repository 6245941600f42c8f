//! Error handling for the document pipeline.
//!
//! Content problems never reach this type during rendering: unknown kinds,
//! bad attributes and failed highlighting all degrade gracefully. These
//! errors cover the edges instead (malformed JSON input, rejected documents,
//! I/O, and misuse of the HTML writer).

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::io;

use ecow::EcoString;

use crate::writer::html::error::HtmlWriteError;

/// Errors produced by the document pipeline.
#[derive(Debug)]
pub enum Error {
    /// The input was not valid JSON.
    Json(serde_json::Error),
    /// The document failed validation; one message per violated rule.
    Invalid(Vec<EcoString>),
    /// An underlying I/O error occurred.
    Io(io::Error),
    /// The HTML writer was misused or misconfigured.
    Write(HtmlWriteError),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "invalid JSON: {err}"),
            Error::Invalid(errors) => {
                write!(f, "invalid document: ")?;
                for (idx, err) in errors.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    f.write_str(err)?;
                }
                Ok(())
            }
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Write(err) => write!(f, "HTML writing failed: {err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<HtmlWriteError> for Error {
    fn from(err: HtmlWriteError) -> Self {
        Error::Write(err)
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
