use std::sync::Arc;

use serde_json::json;

use crate::ast::{BlockAttrs, ImageAttrs, Mark, Node};
use crate::registry::ComponentRegistry;
use crate::writer::runtime::diagnostics::{DiagnosticSeverity, SharedVecSink};
use crate::{HtmlWriteError, HtmlWriter, RenderOptions};

fn write(node: &Node) -> String {
    write_with(RenderOptions::default(), node)
}

fn write_with(options: RenderOptions, node: &Node) -> String {
    let mut writer = HtmlWriter::with_options(options);
    writer.write_node(node).unwrap();
    writer.into_string().unwrap().to_string()
}

fn image(src: &str, alt: &str) -> ImageAttrs {
    ImageAttrs {
        src: src.into(),
        alt: alt.into(),
        ..Default::default()
    }
}

#[test]
fn write_trusted_html_keeps_fragment_verbatim() {
    let mut writer = HtmlWriter::new();
    writer.start_tag("div").unwrap();
    writer.finish_tag().unwrap();
    writer.write_trusted_html("<span>").unwrap();
    writer.write_trusted_html("&ok").unwrap();
    writer.end_tag("div").unwrap();

    let output = writer.into_string().unwrap();
    assert_eq!(output, "<div><span>&ok</div>");
}

#[test]
fn text_is_escaped() {
    let mut writer = HtmlWriter::new();
    writer.start_tag("div").unwrap();
    writer.finish_tag().unwrap();
    writer.text("<span>&oops").unwrap();
    writer.end_tag("div").unwrap();

    let output = writer.into_string().unwrap();
    assert_eq!(output, "<div>&lt;span&gt;&amp;oops</div>");
}

#[test]
fn attribute_escaping_handles_quotes_and_special_chars() {
    let mut writer = HtmlWriter::new();
    writer.start_tag("div").unwrap();
    writer
        .attribute("data-title", "He said \"<Hello>\" & more")
        .unwrap();
    writer.finish_tag().unwrap();

    let output = writer.into_string().unwrap();
    assert_eq!(
        output,
        "<div data-title=\"He said &quot;&lt;Hello&gt;&quot; &amp; more\">"
    );
}

#[test]
fn attribute_without_open_tag_is_misuse() {
    let mut writer = HtmlWriter::new();
    writer.text("loose").unwrap();
    let err = writer.attribute("class", "x").unwrap_err();
    assert!(matches!(err, HtmlWriteError::InvalidState(_)));
}

#[test]
fn void_tags_have_no_closing_slash() {
    let node = Node::paragraph(vec![Node::text("a"), Node::HardBreak, Node::text("b")]);
    assert_eq!(write(&node), "<p>a<br>b</p>");
    assert_eq!(write(&Node::HorizontalRule), "<hr>");
}

#[test]
fn block_presentation_attributes() {
    let block = BlockAttrs {
        text_align: Some("right".into()),
        background_pattern: Some("dots".into()),
    };
    let paragraph = Node::Paragraph {
        block: block.clone(),
        content: vec![Node::text("p")],
    };
    assert_eq!(
        write(&paragraph),
        r#"<p class="bg-pattern-dots" style="text-align: right;">p</p>"#
    );

    // alignment only applies to text blocks
    let quote = Node::Blockquote {
        block,
        content: vec![paragraph.clone()],
    };
    assert!(write(&quote).starts_with(r#"<blockquote class="bg-pattern-dots"><p "#));

    let hostile = Node::Paragraph {
        block: BlockAttrs {
            text_align: Some("left\"><script>".into()),
            background_pattern: None,
        },
        content: vec![],
    };
    assert!(!write(&hostile).contains("<script>"));
}

#[test]
fn heading_levels_are_clamped_when_writing() {
    let heading = Node::Heading {
        level: 9,
        block: BlockAttrs::default(),
        content: vec![Node::text("deep")],
    };
    assert_eq!(write(&heading), "<h6>deep</h6>");

    let heading = Node::Heading {
        level: 0,
        block: BlockAttrs::default(),
        content: vec![],
    };
    assert_eq!(write(&heading), "<h1></h1>");
}

#[test]
fn ordered_lists_only_carry_non_default_start() {
    let item = Node::ListItem(vec![Node::paragraph(vec![Node::text("x")])]);
    let list = |start| Node::OrderedList {
        start,
        block: BlockAttrs::default(),
        items: vec![item.clone()],
    };
    assert_eq!(write(&list(1)), "<ol><li><p>x</p></li></ol>");
    assert_eq!(write(&list(4)), r#"<ol start="4"><li><p>x</p></li></ol>"#);
}

#[test]
fn code_block_class_follows_options() {
    let code = Node::code_block(Some("rust"), "let a = \"<b>\";");
    assert_eq!(
        write(&code),
        r#"<pre><code class="language-rust">let a = &quot;&lt;b&gt;&quot;;</code></pre>"#
    );

    let options = RenderOptions::default().with_code_block_prefix(Some("lang-"));
    assert!(write_with(options, &code).starts_with(r#"<pre><code class="lang-rust">"#));

    let options = RenderOptions::default().with_code_block_prefix(None::<&str>);
    assert!(write_with(options, &code).starts_with("<pre><code>"));
}

#[test]
fn code_block_content_ignores_marks() {
    let code = Node::CodeBlock {
        language: None,
        block: BlockAttrs::default(),
        content: vec![
            Node::marked_text("a", vec![Mark::Bold]),
            Node::text("b"),
        ],
    };
    assert_eq!(write(&code), "<pre><code>ab</code></pre>");
}

#[test]
fn images_escape_text_but_keep_urls() {
    let node = Node::Image(ImageAttrs {
        title: Some("<t>".into()),
        width: Some("300".into()),
        ..image("/uploads/a&b.png", "a \"cat\"")
    });
    assert_eq!(
        write(&node),
        r#"<img src="/uploads/a&b.png" alt="a &quot;cat&quot;" title="&lt;t&gt;" width="300" class="blog-image">"#
    );

    let options = RenderOptions::default().with_image_class(None::<&str>);
    assert_eq!(
        write_with(options, &Node::Image(image("/a.png", ""))),
        r#"<img src="/a.png" alt="">"#
    );
}

#[test]
fn resized_images_keep_editor_styles() {
    let node = Node::ImageResize {
        image: image("/a.png", "A"),
        wrapper_style: Some("display: flex; justify-content: center;".into()),
        container_style: Some("width: 50%;".into()),
    };
    insta::assert_snapshot!(
        write(&node),
        @r#"<div class="image-resize-wrapper" style="display: flex; justify-content: center;"><div class="image-resize-container" style="width: 50%;"><img src="/a.png" alt="A" class="blog-image"></div></div>"#
    );

    let bare = Node::ImageResize {
        image: image("/a.png", "A"),
        wrapper_style: None,
        container_style: None,
    };
    assert_eq!(write(&bare), r#"<img src="/a.png" alt="A" class="blog-image">"#);
}

#[test]
fn links_use_the_configured_class() {
    let link = Node::marked_text(
        "docs",
        vec![Mark::Link {
            href: "https://example.com/?a=1&b=2".into(),
        }],
    );
    let options = RenderOptions::default().with_link_class(Some("external"));
    assert_eq!(
        write_with(options, &link),
        r#"<a href="https://example.com/?a=1&amp;b=2" class="external" target="_blank" rel="noopener noreferrer">docs</a>"#
    );
}

#[test]
fn embeds_write_context_id_and_custom_tag() {
    let node = Node::from_value(&json!({
        "type": "componentEmbed",
        "attrs": { "name": "SphereControl", "props": {}, "contextId": "sphere-1" }
    }));
    let options = RenderOptions::default().with_placeholder_tag("widget-slot");
    assert_eq!(
        write_with(options, &node),
        r#"<widget-slot data-component="SphereControl" data-props="{}" data-context-id="sphere-1"></widget-slot>"#
    );
}

#[test]
fn embeds_without_name_use_unknown() {
    let node = Node::from_value(&json!({ "type": "svelteComponent", "attrs": {} }));
    assert!(write(&node).contains(r#"data-component="Unknown""#));
}

#[test]
fn invalid_placeholder_tag_is_rejected() {
    let options = RenderOptions::default().with_placeholder_tag("x><script");
    let mut writer = HtmlWriter::with_options(options);
    let err = writer
        .write_node(&Node::embed("FireSim", Default::default()))
        .unwrap_err();
    assert!(matches!(err, HtmlWriteError::InvalidHtmlTag(_)));
}

#[test]
fn unregistered_embeds_emit_diagnostics() {
    let sink = SharedVecSink::default();
    let mut writer = HtmlWriter::new()
        .with_registry(Arc::new(ComponentRegistry::builtin()))
        .with_diagnostic_sink(Box::new(sink.clone()));

    writer
        .write_node(&Node::doc(vec![
            Node::embed("Sphere", Default::default()),
            Node::embed("Sphree", Default::default()),
        ]))
        .unwrap();

    let diagnostics = sink.take();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert!(diagnostics[0].message.contains("Sphree"));
}

#[test]
fn embeds_are_not_checked_without_a_registry() {
    let sink = SharedVecSink::default();
    let mut writer = HtmlWriter::new().with_diagnostic_sink(Box::new(sink.clone()));
    writer
        .write_node(&Node::embed("Anything", Default::default()))
        .unwrap();
    assert!(sink.take().is_empty());
}

#[test]
fn highlighted_slots_are_consumed_in_order() {
    let mut writer = HtmlWriter::new().with_highlighted(vec![
        None,
        Some("<div>two</div>".into()),
    ]);
    writer
        .write_node(&Node::doc(vec![
            Node::code_block(Some("rust"), "one"),
            Node::code_block(Some("rust"), "two"),
            Node::code_block(Some("rust"), "three"),
        ]))
        .unwrap();
    assert_eq!(
        writer.into_string().unwrap(),
        r#"<pre><code class="language-rust">one</code></pre><div>two</div><pre><code class="language-rust">three</code></pre>"#
    );
}
