use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use text_tree::driver::TextTreeDriver;
use text_tree::model::MergePolicy;
use text_tree::render::NhxRenderer;
use text_tree::segment::{RootPattern, SentSplitting};
use text_tree::style::StyleConfig;
use text_tree::Result;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Merge sentences starting (or ending) with the same words into one tree.
#[derive(Parser)]
#[command(name = "text-tree")]
#[command(version)]
struct Args {
    /// Text files, one document each (one per line with --lines)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Root words sentences must start with (or end with, see --reverse)
    #[arg(short, long)]
    root: String,

    /// Match sentence ends and draw the tree right to left
    #[arg(long)]
    reverse: bool,

    /// Treat every non-empty line of the input files as a document
    #[arg(long)]
    lines: bool,

    /// Annotate leaves with the file name (and line number) they come from
    #[arg(long)]
    file_refs: bool,

    /// Highlight tokens matching this regular expression (repeatable)
    #[arg(long = "highlight", value_name = "PATTERN")]
    highlights: Vec<String>,

    /// Style configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where sentences end
    #[arg(long, value_enum, default_value_t = Split::Punctuation)]
    split: Split,

    /// Keep the reference of the first instead of the last merged sentence
    #[arg(long)]
    keep_first: bool,

    /// Output file (Newick with NHX annotations)
    #[arg(short, long, default_value = "text_tree.nhx")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Split {
    Punctuation,
    Newline,
    Both,
}

impl From<Split> for SentSplitting {
    fn from(split: Split) -> Self {
        match split {
            Split::Punctuation => SentSplitting::Punctuation,
            Split::Newline => SentSplitting::Newline,
            Split::Both => SentSplitting::PunctuationAndNewline,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("text_tree={}", args.log_level.to_lowercase())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("text-tree v{} starting...", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let (documents, references) = read_documents(args)?;

    let style = match &args.config {
        Some(path) => StyleConfig::from_file(path)?,
        None => StyleConfig::default(),
    };
    let merge_policy = if args.keep_first {
        MergePolicy::KeepFirst
    } else {
        MergePolicy::KeepLast
    };

    let mut driver = TextTreeDriver::new()
        .with_reverse(args.reverse)
        .with_highlights(args.highlights.clone())
        .with_style(style)
        .with_merge_policy(merge_policy)
        .with_sent_splitting(args.split.into());
    if args.file_refs {
        driver = driver.with_references(references);
    }

    let outcome = driver.draw(documents.as_slice(), &RootPattern::words(&args.root), &args.output, &NhxRenderer)?;

    if outcome.is_empty() {
        println!("No sentences matching '{}' found", args.root);
    } else {
        println!(
            "Merged {} sentences from {} documents into {}",
            outcome.num_sentences(),
            outcome.doc_sentences.iter().filter(|s| !s.is_empty()).count(),
            args.output.display()
        );
    }
    Ok(())
}

/// Reads documents and their file references.
fn read_documents(args: &Args) -> Result<(Vec<String>, Vec<Option<String>>)> {
    let mut documents = Vec::new();
    let mut references = Vec::new();

    for path in &args.files {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if args.lines {
            for (i, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                documents.push(line.to_string());
                references.push(Some(format!("{name}:{}", i + 1)));
            }
        } else {
            documents.push(content);
            references.push(Some(name));
        }
    }

    debug!("Read {} documents from {} files", documents.len(), args.files.len());
    Ok((documents, references))
}
