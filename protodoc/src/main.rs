//! protodoc — turn a protoc-gen-doc HTML reference into an API specification.
//!
//! Reads the generated page (`index.html` by default), joins every service's
//! method and HTTP-route tables, flattens each request/response message into
//! a parameter table and writes one section per method:
//!
//! `protodoc docs/index.html -o api.md --lang zh`

mod annotation;
mod assemble;
mod catalog;
mod error;
mod flatten;
mod generate;
mod link;
mod locale;
mod model;
mod render;
mod source;
mod toc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "index.html";
const DEFAULT_OUTPUT_STEM: &str = "output";
const LOG_ENV: &str = "PROTODOC_LOG";

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum EnvelopeArg {
    /// A first field named `data` is the envelope
    #[default]
    Name,
    /// A first field named `data` is the envelope only if it is a message
    Object,
}

impl From<EnvelopeArg> for flatten::EnvelopeRule {
    fn from(arg: EnvelopeArg) -> Self {
        match arg {
            EnvelopeArg::Name => flatten::EnvelopeRule::ByName,
            EnvelopeArg::Object => flatten::EnvelopeRule::ByNameAndObject,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "protodoc",
    about = "Generate per-method API specifications from protoc-gen-doc HTML"
)]
struct Cli {
    /// protoc-gen-doc HTML file
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output file, or `-` for stdout [default: output.<format extension>]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Document title
    #[arg(short = 't', long, default_value = "OpenApi")]
    title: String,

    /// Language of headings and table labels
    #[arg(long, value_enum, default_value_t = locale::Locale::En)]
    lang: locale::Locale,

    /// When a response's first field counts as the `data` envelope
    #[arg(long, value_enum, default_value_t = EnvelopeArg::Name)]
    envelope_rule: EnvelopeArg,

    /// Position of the fixed `code`/`message` response rows
    #[arg(long, value_enum, default_value_t = generate::StatusRows::Last)]
    status_rows: generate::StatusRows,

    /// Scalar type names (repeatable); replaces the protobuf builtin set
    #[arg(long = "scalar")]
    scalars: Vec<String>,

    /// Only document these services (repeatable, by display name)
    #[arg(long = "service")]
    services: Vec<String>,

    /// Exit successfully even if some methods could not be documented
    #[arg(long)]
    allow_errors: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let source = source::html::SourceDocument::parse(&input)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let catalog = if cli.scalars.is_empty() {
        catalog::TypeCatalog::default()
    } else {
        catalog::TypeCatalog::new(cli.scalars.iter().cloned())
    }
    .with_enums(source.toc().enum_anchors());

    let options = generate::GenerateOptions {
        title: cli.title.clone(),
        locale: cli.lang,
        flatten: flatten::FlattenOptions {
            envelope_rule: cli.envelope_rule.into(),
            envelope_description: cli.lang.labels().envelope.to_string(),
        },
        status_rows: cli.status_rows,
        services: cli.services.clone(),
    };

    let renderer = render::create_renderer(&cli.format, cli.lang)?;
    let report = generate::generate(source.toc(), &source, &catalog, &options);
    let rendered = renderer
        .render(&report.document)
        .context("failed to render document")?;

    let out_path = cli.output.clone().unwrap_or_else(|| {
        Path::new(DEFAULT_OUTPUT_STEM).with_extension(renderer.file_extension())
    });
    write_output(&out_path, &rendered)?;
    info!(
        methods = report.document.sections.len(),
        failures = report.failures.len(),
        output = %out_path.display(),
        "document written"
    );

    if !report.failures.is_empty() {
        let summary = report
            .failures
            .iter()
            .map(|f| format!("  {}", f))
            .collect::<Vec<_>>()
            .join("\n");
        if cli.allow_errors {
            warn!("{} section(s) incomplete:\n{}", report.failures.len(), summary);
        } else {
            anyhow::bail!(
                "{} section(s) could not be documented:\n{}",
                report.failures.len(),
                summary
            );
        }
    }

    Ok(())
}

/// Log to stderr; `PROTODOC_LOG` overrides the level chosen by `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if path == Path::new("-") {
        print!("{}", content);
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
