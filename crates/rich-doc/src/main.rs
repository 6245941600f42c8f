#![doc = include_str!("../README.md")]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rich_doc::{
    estimate_read_minutes, extract_text, validate, word_count, Category, CommandHighlighter,
    ComponentRegistry, Document, RenderOptions, Renderer, TimeoutHighlighter,
};
use serde_json::Value;

/// Validates, measures and renders blog documents.
#[derive(Debug, Parser)]
#[clap(name = "rich-doc", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a document to an HTML fragment
    Render(RenderArgs),
    /// Check that a document may be saved
    Validate(InputArgs),
    /// Estimate the reading time of a document
    ReadTime(ReadTimeArgs),
    /// List the embeddable components
    Components(ComponentsArgs),
}

#[derive(Debug, Clone, Args)]
struct InputArgs {
    /// Path to the document JSON, or `-` for stdin
    #[clap(value_name = "INPUT", default_value = "-")]
    input: String,
}

#[derive(Debug, Clone, Args)]
struct RegistryArgs {
    /// Loads the component registry from a JSON file instead of the built-in table
    #[clap(long, value_name = "REGISTRY_PATH", env = "RICH_DOC_REGISTRY")]
    registry: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct RenderArgs {
    #[clap(flatten)]
    input: InputArgs,

    #[clap(flatten)]
    registry: RegistryArgs,

    /// Path to output file, stdout if omitted
    #[clap(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Loads render options from a JSON file
    #[clap(long, value_name = "OPTIONS_PATH")]
    options: Option<PathBuf>,

    /// Renders every code block plain
    #[clap(long)]
    no_highlight: bool,

    /// Highlights code blocks with an external command.
    ///
    /// The command reads code on stdin and writes HTML on stdout. An argument
    /// spelled `{lang}` is replaced with the block's language.
    #[clap(long, value_name = "COMMAND", env = "RICH_DOC_HIGHLIGHT_CMD")]
    highlight_cmd: Option<String>,

    /// Gives up on a single highlight call after this many milliseconds
    #[clap(long, value_name = "MILLIS", default_value_t = 2000)]
    highlight_timeout: u64,
}

#[derive(Debug, Clone, Args)]
struct ReadTimeArgs {
    #[clap(flatten)]
    input: InputArgs,

    /// Reading speed in words per minute
    #[clap(long, default_value_t = rich_doc::DEFAULT_WORDS_PER_MINUTE)]
    wpm: u32,
}

#[derive(Debug, Clone, Args)]
struct ComponentsArgs {
    #[clap(flatten)]
    registry: RegistryArgs,

    /// Prints the default props of this component as JSON
    #[clap(value_name = "NAME")]
    name: Option<String>,

    /// Only lists components of this category
    #[clap(long, value_parser = parse_category)]
    category: Option<Category>,

    /// Prints full descriptors as JSON
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Render(args) => render(args).await,
        Command::Validate(args) => check(args),
        Command::ReadTime(args) => read_time(args),
        Command::Components(args) => components(args),
    }
}

async fn render(args: RenderArgs) -> Result<()> {
    let value = read_document(&args.input.input)?;

    let mut options = match &args.options {
        Some(path) => serde_json::from_str::<RenderOptions>(&read_file(path)?)
            .with_context(|| format!("failed to parse render options {path:?}"))?,
        None => RenderOptions::default(),
    };
    if args.no_highlight {
        options.set_syntax_highlighting(false);
    }

    let mut renderer =
        Renderer::new(options).with_registry(Arc::new(load_registry(&args.registry)?));
    if let Some(command) = &args.highlight_cmd {
        let mut words = command.split_whitespace();
        let Some(program) = words.next() else {
            bail!("--highlight-cmd is empty");
        };
        let highlighter = CommandHighlighter::new(program, words);
        renderer = renderer.with_highlighter(Arc::new(TimeoutHighlighter::new(
            highlighter,
            Duration::from_millis(args.highlight_timeout),
        )));
    }

    let rendered = renderer
        .render_with_diagnostics(&Document::from_value(&value))
        .await
        .context("failed to render document")?;
    for diagnostic in &rendered.diagnostics {
        eprintln!("{diagnostic}");
    }

    match &args.output {
        Some(path) => std::fs::write(path, rendered.html.as_bytes())
            .with_context(|| format!("failed to write file {path:?}"))?,
        None => std::io::stdout()
            .write_all(rendered.html.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

fn check(args: InputArgs) -> Result<()> {
    let report = validate(&read_document(&args.input)?);
    if report.valid {
        println!("valid");
        return Ok(());
    }
    for error in &report.errors {
        eprintln!("error: {error}");
    }
    exit(1);
}

fn read_time(args: ReadTimeArgs) -> Result<()> {
    let doc = Document::from_value(&read_document(&args.input.input)?);
    let words = word_count(&extract_text(doc.root()));
    let minutes = estimate_read_minutes(doc.root(), args.wpm);
    println!("{minutes} min ({words} words)");
    Ok(())
}

fn components(args: ComponentsArgs) -> Result<()> {
    let registry = load_registry(&args.registry)?;

    if let Some(name) = &args.name {
        let Some(component) = registry.lookup(name) else {
            bail!("unknown component: {name}");
        };
        let defaults = Value::Object(component.default_props());
        println!("{}", serde_json::to_string_pretty(&defaults)?);
        return Ok(());
    }

    let listed = match args.category {
        Some(category) => registry.by_category(category),
        None => registry.iter().collect(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }
    for component in listed {
        println!(
            "{:<16} {:<14} {}",
            component.name,
            component.category.as_str(),
            component.label
        );
    }
    Ok(())
}

fn load_registry(args: &RegistryArgs) -> Result<ComponentRegistry> {
    match &args.registry {
        Some(path) => ComponentRegistry::from_json(&read_file(path)?)
            .with_context(|| format!("failed to load component registry {path:?}")),
        None => Ok(ComponentRegistry::builtin()),
    }
}

fn read_document(input: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        read_file(Path::new(input))?
    };
    serde_json::from_str(&text).with_context(|| format!("failed to parse document {input}"))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read file {path:?}"))
}

fn parse_category(s: &str) -> std::result::Result<Category, String> {
    s.parse().map_err(|err: ecow::EcoString| err.to_string())
}
