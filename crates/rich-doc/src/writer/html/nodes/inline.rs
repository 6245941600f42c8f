use super::super::{HtmlWriteResult, HtmlWriter};
use crate::ast::Mark;

impl HtmlWriter {
    /// Writes an escaped text leaf wrapped by its marks.
    ///
    /// The first mark is the innermost wrapper, so tags open in reverse and
    /// close in order.
    pub(crate) fn write_marked_text(&mut self, text: &str, marks: &[Mark]) -> HtmlWriteResult<()> {
        for mark in marks.iter().rev() {
            self.open_mark(mark)?;
        }
        self.text(text)?;
        for mark in marks {
            if let Some(tag_name) = mark_tag(mark) {
                self.end_tag(tag_name)?;
            }
        }
        Ok(())
    }

    fn open_mark(&mut self, mark: &Mark) -> HtmlWriteResult<()> {
        let Some(tag_name) = mark_tag(mark) else {
            return Ok(());
        };
        self.start_tag(tag_name)?;
        if let Mark::Link { href } = mark {
            // not scheme-checked
            self.attribute("href", href)?;
            if let Some(class) = self.options.link_class.clone() {
                self.attribute("class", &class)?;
            }
            self.attribute("target", "_blank")?;
            self.attribute("rel", "noopener noreferrer")?;
        }
        self.finish_tag()
    }
}

fn mark_tag(mark: &Mark) -> Option<&'static str> {
    match mark {
        Mark::Bold => Some("strong"),
        Mark::Italic => Some("em"),
        Mark::Strike => Some("s"),
        Mark::Code => Some("code"),
        Mark::Link { .. } => Some("a"),
        Mark::Unknown(_) => None,
    }
}
