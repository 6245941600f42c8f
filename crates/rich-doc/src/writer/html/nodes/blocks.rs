use ecow::{eco_format, EcoString};

use super::super::{HtmlWriteResult, HtmlWriter};
use crate::ast::{BlockAttrs, Node};
use crate::text::collect_text;
use crate::writer::runtime::visitor::NodeHandler;

impl HtmlWriter {
    /// Writes `class="bg-pattern-…"` and, when `align` is set, the
    /// `text-align` style for a block that is currently open.
    fn write_block_attributes(&mut self, block: &BlockAttrs, align: bool) -> HtmlWriteResult<()> {
        if let Some(pattern) = &block.background_pattern {
            self.attribute("class", &eco_format!("bg-pattern-{pattern}"))?;
        }
        if align {
            if let Some(text_align) = &block.text_align {
                self.attribute("style", &eco_format!("text-align: {text_align};"))?;
            }
        }
        Ok(())
    }

    pub(crate) fn write_paragraph(
        &mut self,
        block: &BlockAttrs,
        content: &[Node],
    ) -> HtmlWriteResult<()> {
        self.start_tag("p")?;
        self.write_block_attributes(block, true)?;
        self.finish_tag()?;
        let before = self.buffer.len();
        self.visit_nodes(content)?;
        if self.buffer.len() == before {
            // keeps the empty line visible
            self.void_tag("br")?;
        }
        self.end_tag("p")
    }

    pub(crate) fn write_heading(
        &mut self,
        level: u8,
        block: &BlockAttrs,
        content: &[Node],
    ) -> HtmlWriteResult<()> {
        let tag_name = eco_format!("h{}", level.clamp(1, 6));
        self.start_tag(&tag_name)?;
        self.write_block_attributes(block, true)?;
        self.finish_tag()?;
        self.visit_nodes(content)?;
        self.end_tag(&tag_name)
    }

    pub(crate) fn write_blockquote(
        &mut self,
        block: &BlockAttrs,
        content: &[Node],
    ) -> HtmlWriteResult<()> {
        self.start_tag("blockquote")?;
        self.write_block_attributes(block, false)?;
        self.finish_tag()?;
        self.visit_nodes(content)?;
        self.end_tag("blockquote")
    }

    pub(crate) fn write_code_block(
        &mut self,
        language: &Option<EcoString>,
        block: &BlockAttrs,
        content: &[Node],
    ) -> HtmlWriteResult<()> {
        if let Some(highlighted) = self.next_highlighted() {
            return self.write_trusted_html(&highlighted);
        }

        let class = match (&self.options.code_block_language_class_prefix, language) {
            (Some(prefix), Some(lang)) if !lang.trim().is_empty() => {
                Some(eco_format!("{prefix}{}", lang.trim()))
            }
            _ => None,
        };

        self.start_tag("pre")?;
        self.write_block_attributes(block, false)?;
        self.finish_tag()?;
        self.start_tag("code")?;
        if let Some(class) = class {
            self.attribute("class", &class)?;
        }
        self.finish_tag()?;
        self.text(&collect_text(content))?;
        self.end_tag("code")?;
        self.end_tag("pre")
    }

    pub(crate) fn write_list(
        &mut self,
        tag_name: &str,
        start: Option<u32>,
        block: &BlockAttrs,
        items: &[Node],
    ) -> HtmlWriteResult<()> {
        self.start_tag(tag_name)?;
        if let Some(start) = start.filter(|start| *start != 1) {
            self.attribute("start", &eco_format!("{start}"))?;
        }
        self.write_block_attributes(block, false)?;
        self.finish_tag()?;
        self.visit_nodes(items)?;
        self.end_tag(tag_name)
    }

    pub(crate) fn write_list_item(&mut self, content: &[Node]) -> HtmlWriteResult<()> {
        self.start_tag("li")?;
        self.finish_tag()?;
        self.visit_nodes(content)?;
        self.end_tag("li")
    }
}
