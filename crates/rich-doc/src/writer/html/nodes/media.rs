use ecow::EcoString;

use super::super::{HtmlWriteResult, HtmlWriter};
use crate::ast::ImageAttrs;

impl HtmlWriter {
    pub(crate) fn write_image(&mut self, image: &ImageAttrs) -> HtmlWriteResult<()> {
        self.start_tag("img")?;
        // upload URLs are emitted as stored
        self.trusted_attribute("src", &image.src)?;
        self.attribute("alt", &image.alt)?;
        if let Some(title) = &image.title {
            self.attribute("title", title)?;
        }
        if let Some(width) = &image.width {
            self.attribute("width", width)?;
        }
        if let Some(height) = &image.height {
            self.attribute("height", height)?;
        }
        if let Some(class) = self.options.image_class.clone() {
            self.attribute("class", &class)?;
        }
        self.finish_tag()
    }

    /// Writes an image inside the editor's resize wrappers so public pages
    /// keep the alignment chosen in the editor. Without styles the bare
    /// `<img>` is written.
    pub(crate) fn write_image_resize(
        &mut self,
        image: &ImageAttrs,
        wrapper_style: &Option<EcoString>,
        container_style: &Option<EcoString>,
    ) -> HtmlWriteResult<()> {
        if wrapper_style.is_none() && container_style.is_none() {
            return self.write_image(image);
        }

        self.start_tag("div")?;
        self.attribute("class", "image-resize-wrapper")?;
        if let Some(style) = wrapper_style {
            self.trusted_attribute("style", style)?;
        }
        self.finish_tag()?;

        self.start_tag("div")?;
        self.attribute("class", "image-resize-container")?;
        if let Some(style) = container_style {
            self.trusted_attribute("style", style)?;
        }
        self.finish_tag()?;

        self.write_image(image)?;
        self.end_tag("div")?;
        self.end_tag("div")
    }
}
