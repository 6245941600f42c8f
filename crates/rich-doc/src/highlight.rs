//! Syntax highlighting collaborators.
//!
//! The renderer only knows the [`Highlighter`] trait: give it code and a
//! language, get back trusted HTML. Every error is recoverable; the renderer
//! falls back to a plain escaped code block for that one node.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use ecow::EcoString;
use futures::future::try_join;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Errors a highlighter may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// The highlighter has no grammar for the language.
    UnsupportedLanguage(EcoString),
    /// The highlighter did not answer in time.
    Timeout(Duration),
    /// Any other failure.
    Failed(EcoString),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::UnsupportedLanguage(lang) => {
                write!(f, "no grammar for language {lang:?}")
            }
            HighlightError::Timeout(after) => write!(f, "highlighter timed out after {after:?}"),
            HighlightError::Failed(msg) => write!(f, "highlighter failed: {msg}"),
        }
    }
}

impl std::error::Error for HighlightError {}

/// Turns source code into trusted, pre-escaped HTML.
///
/// Implementations must escape the code themselves: the renderer inserts the
/// returned markup verbatim.
#[async_trait]
pub trait Highlighter: Send + Sync {
    /// Highlights `code` written in `language`.
    async fn highlight(&self, code: &str, language: &str) -> Result<EcoString, HighlightError>;
}

/// Declines every language, so every code block renders plain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlight;

#[async_trait]
impl Highlighter for NoHighlight {
    async fn highlight(&self, _code: &str, language: &str) -> Result<EcoString, HighlightError> {
        Err(HighlightError::UnsupportedLanguage(language.into()))
    }
}

/// Bounds another highlighter with a deadline.
///
/// Requires a Tokio runtime with the time driver enabled.
#[derive(Debug, Clone)]
pub struct TimeoutHighlighter<H> {
    inner: H,
    timeout: Duration,
}

impl<H: Highlighter> TimeoutHighlighter<H> {
    /// Wraps `inner`, giving each call at most `timeout`.
    pub fn new(inner: H, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<H: Highlighter> Highlighter for TimeoutHighlighter<H> {
    async fn highlight(&self, code: &str, language: &str) -> Result<EcoString, HighlightError> {
        tokio::time::timeout(self.timeout, self.inner.highlight(code, language))
            .await
            .map_err(|_| HighlightError::Timeout(self.timeout))?
    }
}

/// Runs an external program per code block.
///
/// The code is written to the program's stdin and its stdout is taken as
/// the highlighted HTML. Arguments equal to `{lang}` are replaced with the
/// lowercased language name, e.g. `pygmentize -f html -l {lang}`.
#[derive(Debug, Clone)]
pub struct CommandHighlighter {
    program: EcoString,
    args: Vec<EcoString>,
}

impl CommandHighlighter {
    /// Placeholder argument replaced by the language name.
    pub const LANGUAGE_PLACEHOLDER: &'static str = "{lang}";

    /// Creates a highlighter running `program` with `args`.
    pub fn new<I, S>(program: impl Into<EcoString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EcoString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self, language: &str) -> Command {
        let mut command = Command::new(self.program.as_str());
        for arg in &self.args {
            if arg == Self::LANGUAGE_PLACEHOLDER {
                command.arg(language);
            } else {
                command.arg(arg.as_str());
            }
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl Highlighter for CommandHighlighter {
    async fn highlight(&self, code: &str, language: &str) -> Result<EcoString, HighlightError> {
        let language = language.trim().to_lowercase();
        if language.is_empty() || !language.chars().all(is_language_char) {
            return Err(HighlightError::UnsupportedLanguage(language.into()));
        }

        let failed = |err: std::io::Error| HighlightError::Failed(err.to_string().into());
        let mut child = self.command(&language).spawn().map_err(failed)?;
        // Feed stdin while stdout drains, or a large block can fill both pipes.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(code.as_bytes()).await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let ((), output) = try_join(feed, child.wait_with_output())
            .await
            .map_err(failed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HighlightError::Failed(
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()).into(),
            ));
        }
        String::from_utf8(output.stdout)
            .map(Into::into)
            .map_err(|err| HighlightError::Failed(err.to_string().into()))
    }
}

fn is_language_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.')
}
