use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::*;
use crate::ast::Mark;
use crate::error::Error;
use crate::highlight::TimeoutHighlighter;
use crate::writer::html::HtmlWriteError;
use crate::writer::DiagnosticSeverity;

/// Wraps code as `<div class="hl">{lang}|{code}</div>` and counts calls.
#[derive(Default)]
struct Tagging {
    calls: AtomicUsize,
}

#[async_trait]
impl Highlighter for Tagging {
    async fn highlight(
        &self,
        code: &str,
        language: &str,
    ) -> std::result::Result<EcoString, HighlightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(eco_format!("<div class=\"hl\">{language}|{code}</div>"))
    }
}

struct Failing;

#[async_trait]
impl Highlighter for Failing {
    async fn highlight(
        &self,
        _code: &str,
        _language: &str,
    ) -> std::result::Result<EcoString, HighlightError> {
        Err(HighlightError::Failed("boom".into()))
    }
}

/// Answers after a delay named by the language, e.g. `ms30`.
struct Delayed;

#[async_trait]
impl Highlighter for Delayed {
    async fn highlight(
        &self,
        code: &str,
        language: &str,
    ) -> std::result::Result<EcoString, HighlightError> {
        let millis = language.trim_start_matches("ms").parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(eco_format!("[{code}]"))
    }
}

fn doc(content: Vec<Node>) -> Document {
    Document::new(Node::doc(content))
}

async fn render_plain(doc: &Document) -> EcoString {
    Renderer::default().render(doc).await.unwrap()
}

#[tokio::test]
async fn renders_a_typical_post() {
    let doc = Document::from_value(&json!({
        "type": "doc",
        "content": [
            {
                "type": "heading",
                "attrs": { "level": 2, "textAlign": "center" },
                "content": [{ "type": "text", "text": "Title" }]
            },
            {
                "type": "paragraph",
                "content": [
                    { "type": "text", "text": "Hello " },
                    { "type": "text", "text": "world", "marks": [{ "type": "bold" }] }
                ]
            },
            {
                "type": "bulletList",
                "content": [{
                    "type": "listItem",
                    "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "one" }] }]
                }]
            },
            {
                "type": "orderedList",
                "attrs": { "start": 3 },
                "content": [{
                    "type": "listItem",
                    "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "two" }] }]
                }]
            },
            { "type": "horizontalRule" },
            { "type": "image", "attrs": { "src": "/u/a.png", "alt": "A cat" } }
        ]
    }));

    insta::assert_snapshot!(
        render_plain(&doc).await,
        @r#"<h2 style="text-align: center;">Title</h2><p>Hello <strong>world</strong></p><ul><li><p>one</p></li></ul><ol start="3"><li><p>two</p></li></ol><hr><img src="/u/a.png" alt="A cat" class="blog-image">"#
    );
}

#[tokio::test]
async fn rendering_is_deterministic() {
    let renderer = Renderer::default().with_highlighter(Arc::new(Tagging::default()));
    let doc = doc(vec![
        Node::heading(1, vec![Node::text("A & B")]),
        Node::code_block(Some("rust"), "let x = 1;"),
        Node::embed("FireSim", Default::default()),
    ]);

    let first = renderer.render(&doc).await.unwrap();
    let second = renderer.render(&doc).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn script_text_is_escaped() {
    let doc = doc(vec![Node::paragraph(vec![Node::text(
        "<script>alert(1)</script>",
    )])]);
    assert_eq!(
        render_plain(&doc).await,
        "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
    );
}

#[tokio::test]
async fn link_hrefs_are_escaped_but_not_scheme_checked() {
    let doc = doc(vec![Node::paragraph(vec![Node::marked_text(
        "x",
        vec![Mark::Link {
            href: "javascript:alert(1)".into(),
        }],
    )])]);
    assert_eq!(
        render_plain(&doc).await,
        r#"<p><a href="javascript:alert(1)" class="blog-link" target="_blank" rel="noopener noreferrer">x</a></p>"#
    );

    let doc = self::doc(vec![Node::paragraph(vec![Node::marked_text(
        "x",
        vec![Mark::Link {
            href: r#"/a"onclick="b"#.into(),
        }],
    )])]);
    let html = render_plain(&doc).await;
    assert!(html.contains(r#"href="/a&quot;onclick=&quot;b""#), "{html}");
}

#[tokio::test]
async fn marks_wrap_in_sequence_order() {
    let doc = doc(vec![Node::paragraph(vec![Node::marked_text(
        "t",
        vec![Mark::Bold, Mark::Italic, Mark::Unknown("highlight".into())],
    )])]);
    assert_eq!(render_plain(&doc).await, "<p><em><strong>t</strong></em></p>");
}

#[tokio::test]
async fn component_embed_carries_props() {
    let doc = Document::from_value(&json!({
        "type": "doc",
        "content": [{
            "type": "componentEmbed",
            "attrs": { "name": "FireSim", "props": { "gridWidth": 50 } }
        }]
    }));
    assert_eq!(
        render_plain(&doc).await,
        r#"<component-placeholder data-component="FireSim" data-props="{&quot;gridWidth&quot;:50}"></component-placeholder>"#
    );
}

#[tokio::test]
async fn empty_paragraph_keeps_a_line_break() {
    assert_eq!(
        render_plain(&doc(vec![Node::paragraph(vec![])])).await,
        "<p><br></p>"
    );
}

#[tokio::test]
async fn unknown_kinds_render_their_children() {
    let doc = Document::from_value(&json!({
        "type": "doc",
        "content": [{
            "type": "callout",
            "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "inside" }] }]
        }]
    }));
    assert_eq!(render_plain(&doc).await, "<p>inside</p>");
}

#[tokio::test]
async fn code_without_language_skips_the_highlighter() {
    let highlighter = Arc::new(Tagging::default());
    let renderer = Renderer::default().with_highlighter(highlighter.clone());
    let doc = doc(vec![
        Node::code_block(None, "fn main() {}"),
        Node::code_block(Some("  "), "x"),
    ]);

    assert_eq!(
        renderer.render(&doc).await.unwrap(),
        "<pre><code>fn main() {}</code></pre><pre><code>x</code></pre>"
    );
    assert_eq!(highlighter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn highlighted_markup_is_inserted_verbatim() {
    let renderer = Renderer::default().with_highlighter(Arc::new(Tagging::default()));
    let doc = doc(vec![Node::code_block(Some("Rust "), "a")]);
    assert_eq!(
        renderer.render(&doc).await.unwrap(),
        r#"<div class="hl">Rust|a</div>"#
    );
}

#[tokio::test]
async fn disabled_highlighting_renders_plain_code() {
    let highlighter = Arc::new(Tagging::default());
    let renderer = Renderer::new(RenderOptions::default().with_syntax_highlighting(false))
        .with_highlighter(highlighter.clone());
    assert!(!renderer.options().enable_syntax_highlighting);
    let doc = doc(vec![Node::code_block(Some("rust"), "a < b")]);

    assert_eq!(
        renderer.render(&doc).await.unwrap(),
        r#"<pre><code class="language-rust">a &lt; b</code></pre>"#
    );
    assert_eq!(highlighter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_highlighting_falls_back_with_a_warning() {
    let renderer = Renderer::default().with_highlighter(Arc::new(Failing));
    let doc = doc(vec![
        Node::code_block(Some("rust"), "a < b"),
        Node::paragraph(vec![Node::text("after")]),
    ]);

    let rendered = renderer.render_with_diagnostics(&doc).await.unwrap();
    assert_eq!(
        rendered.html,
        r#"<pre><code class="language-rust">a &lt; b</code></pre><p>after</p>"#
    );
    assert_eq!(rendered.diagnostics.len(), 1);
    assert_eq!(rendered.diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(rendered.diagnostics[0].node_kind, "codeBlock");
}

#[tokio::test(start_paused = true)]
async fn slow_highlighters_time_out_into_plain_code() {
    let highlighter = TimeoutHighlighter::new(Delayed, Duration::from_millis(5));
    let renderer = Renderer::default().with_highlighter(Arc::new(highlighter));
    let doc = doc(vec![
        Node::code_block(Some("ms1"), "quick"),
        Node::code_block(Some("ms50"), "slow"),
    ]);

    let rendered = renderer.render_with_diagnostics(&doc).await.unwrap();
    assert_eq!(
        rendered.html,
        r#"[quick]<pre><code class="language-ms50">slow</code></pre>"#
    );
    assert_eq!(rendered.diagnostics.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn output_order_follows_the_document() {
    let renderer = Renderer::default().with_highlighter(Arc::new(Delayed));
    let doc = doc(vec![
        Node::code_block(Some("ms30"), "first"),
        Node::Blockquote {
            block: BlockAttrs::default(),
            content: vec![Node::code_block(Some("ms1"), "second")],
        },
        Node::code_block(None, "third"),
        Node::code_block(Some("ms10"), "fourth"),
    ]);

    assert_eq!(
        renderer.render(&doc).await.unwrap(),
        "[first]<blockquote>[second]</blockquote><pre><code>third</code></pre>[fourth]"
    );
}

#[tokio::test]
async fn unregistered_embeds_are_reported() {
    let renderer = Renderer::default().with_registry(Arc::new(ComponentRegistry::builtin()));
    let doc = doc(vec![
        Node::embed("FireSim", Default::default()),
        Node::embed("Teapot", Default::default()),
    ]);

    let rendered = renderer.render_with_diagnostics(&doc).await.unwrap();
    assert!(rendered.html.contains(r#"data-component="Teapot""#));
    assert_eq!(rendered.diagnostics.len(), 1);
    assert_eq!(rendered.diagnostics[0].node_kind, "componentEmbed");
    assert!(rendered.diagnostics[0].message.contains("Teapot"));
}

#[tokio::test]
async fn unusable_placeholder_tag_is_an_error() {
    let renderer = Renderer::new(RenderOptions::default().with_placeholder_tag("bad tag"));
    let err = renderer
        .render(&doc(vec![Node::embed("FireSim", Default::default())]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Write(HtmlWriteError::InvalidHtmlTag(tag)) if tag == "bad tag"
    ));
}

#[tokio::test]
async fn render_value_is_lenient() {
    let html = Renderer::default()
        .render_value(&json!({
            "type": "doc",
            "content": [
                { "type": "heading", "attrs": { "level": 9 }, "content": [{ "type": "text", "text": "H" }] },
                { "type": "image", "attrs": { "width": 320 } },
                42
            ]
        }))
        .await
        .unwrap();
    assert_eq!(html, r#"<h6>H</h6><img src="" alt="" width="320" class="blog-image">"#);
}

#[test]
fn renderer_can_be_shared_across_tasks() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    fn assert_send<T: Send>(_: &T) {}

    let renderer = Renderer::default().with_highlighter(Arc::new(Tagging::default()));
    assert_send_sync(&renderer);

    let doc = doc(vec![]);
    let future = renderer.render(&doc);
    assert_send(&future);
}
