use ecow::eco_format;
use serde_json::Value;

use super::super::{HtmlWriteResult, HtmlWriter};
use crate::ast::ComponentEmbed;

impl HtmlWriter {
    /// Writes the inert placeholder a page later hydrates into a live widget.
    ///
    /// The element carries `data-component`, `data-props` (JSON) and, when
    /// set, `data-context-id`. All three are escaped.
    pub(crate) fn write_component_embed(&mut self, embed: &ComponentEmbed) -> HtmlWriteResult<()> {
        let unregistered = self
            .registry()
            .is_some_and(|registry| !registry.contains(&embed.name));
        if unregistered {
            self.emit_warning(
                "componentEmbed",
                eco_format!(
                    "component {:?} is not registered; the placeholder will not hydrate",
                    embed.name
                ),
            );
        }

        let tag_name = self.options.placeholder_tag.clone();
        let props = Value::Object(embed.props.clone()).to_string();

        let mut tag = self.guarded_tag(&tag_name)?;
        tag.attribute("data-component", &embed.name)?;
        tag.attribute("data-props", &props)?;
        if let Some(context_id) = &embed.context_id {
            tag.attribute("data-context-id", context_id)?;
        }
        tag.finish()?.end()?;
        Ok(())
    }
}
