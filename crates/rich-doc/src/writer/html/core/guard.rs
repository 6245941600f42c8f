use ecow::EcoString;

use super::{HtmlWriteError, HtmlWriteResult, HtmlWriter};
use crate::writer::html::utils;

/// An open tag whose name was validated by [`HtmlWriter::guarded_tag`].
///
/// Attributes are checked by name before they are written, and the matching
/// end tag is produced by [`GuardedTagBody::end`].
pub(crate) struct GuardedTagWriter<'a> {
    writer: &'a mut HtmlWriter,
    tag_name: EcoString,
}

impl<'a> GuardedTagWriter<'a> {
    pub(crate) fn new(writer: &'a mut HtmlWriter, tag_name: EcoString) -> Self {
        Self { writer, tag_name }
    }

    pub(crate) fn attribute(&mut self, name: &str, value: &str) -> HtmlWriteResult<()> {
        if !utils::is_safe_attribute_name(name) {
            return Err(HtmlWriteError::InvalidHtmlAttribute(name.to_string()));
        }
        self.writer.attribute(name, value)
    }

    pub(crate) fn finish(self) -> HtmlWriteResult<GuardedTagBody<'a>> {
        self.writer.finish_tag()?;
        Ok(GuardedTagBody {
            writer: self.writer,
            tag_name: self.tag_name,
        })
    }
}

pub(crate) struct GuardedTagBody<'a> {
    writer: &'a mut HtmlWriter,
    tag_name: EcoString,
}

impl<'a> GuardedTagBody<'a> {
    pub(crate) fn end(self) -> HtmlWriteResult<&'a mut HtmlWriter> {
        self.writer.end_tag(&self.tag_name)?;
        Ok(self.writer)
    }
}
