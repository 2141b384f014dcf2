mod echo;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use citeloc_core::citation::prepare;
use citeloc_core::{
    Citation, CollectConfig, FetchConfig, JsonConfig, LocationOutput, LocatorConfig, PageCache, Sample, Source,
    TextConfig, Webpage, collect, content_start_accuracy, data_preservation, fetch_file, fetch_stdin, locate, to_json,
};
use citeloc_core::formatters::{format_content_start, format_locations, format_preservation};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use echo::{format_size, print_banner, print_detail, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Locate article content and citation fields in web pages
#[derive(Parser, Debug)]
#[command(name = "citeloc")]
#[command(version)]
#[command(about = "Locate article content and citation fields in web pages", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the article content of a page, starting at its title
    Content(ContentArgs),
    /// Locate citation values in a page and print their spans
    Locate(LocateArgs),
    /// Fetch every page of a citation records file and locate its fields
    Collect(CollectArgs),
    /// Measure content trimming against a citation records file
    Evaluate(EvaluateArgs),
    /// Generate a shell completion script
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,
}

impl FetchArgs {
    fn config(&self) -> FetchConfig {
        let default = FetchConfig::default();
        FetchConfig { timeout: self.timeout, user_agent: self.user_agent.clone().unwrap_or(default.user_agent) }
    }
}

#[derive(Args, Debug)]
struct ContentArgs {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Title hint to use instead of the page's own
    #[arg(long, value_name = "TITLE")]
    hint: Option<String>,

    /// Print the standardized text instead of Markdown
    #[arg(long)]
    standardize: bool,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct LocateArgs {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Article title
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Author name (repeatable)
    #[arg(long = "author", value_name = "NAME")]
    authors: Vec<String>,

    /// Publication date
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Publisher name
    #[arg(long, value_name = "NAME")]
    publisher: Option<String>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct CollectArgs {
    /// JSON file with an array of citation records
    #[arg(value_name = "RECORDS")]
    records: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short, long, default_value = "8", value_name = "NUM")]
    workers: usize,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// JSON file with an array of citation records
    #[arg(value_name = "RECORDS")]
    records: PathBuf,

    /// Read pages from this directory, named by record index (0.html, 1.html, ...)
    #[arg(long, value_name = "DIR")]
    pages: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    fetch: FetchArgs,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Reads a page from a URL, file, or stdin.
async fn load_page(input: &str, fetch: &FetchConfig, verbose: bool) -> anyhow::Result<Webpage> {
    let html = match Source::from_input(input) {
        Source::Url(url) => {
            if verbose {
                print_step(1, 3, &format!("Fetching from {}", url.as_str().bright_white().underline()));
            }
            citeloc_core::fetch_url(url.as_str(), fetch).await.context("Failed to fetch URL")?
        }
        Source::File(path) => {
            if verbose {
                print_step(1, 3, &format!("Reading from file {}", path.display().bright_white()));
            }
            fetch_file(&path.to_string_lossy()).with_context(|| format!("Failed to read file: {}", input))?
        }
        Source::Stdin => {
            if verbose {
                print_step(1, 3, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        }
    };

    if verbose {
        print_detail("Size", &format_size(html.len()));
        print_step(2, 3, "Rendering Markdown");
    }

    let page = Webpage::from_html(input, html).context("Failed to render page")?;

    if verbose && let Some(hint) = &page.title_hint {
        print_detail("Title hint", hint);
    }

    Ok(page)
}

fn read_records(path: &Path) -> anyhow::Result<Vec<Citation>> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read records: {}", path.display()))?;
    Citation::from_json_records(&json).with_context(|| format!("Failed to parse records: {}", path.display()))
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn run_content(args: ContentArgs, verbose: bool) -> anyhow::Result<()> {
    let mut page = load_page(&args.input, &args.fetch.config(), verbose).await?;
    if let Some(hint) = args.hint {
        page.title_hint = Some(hint);
    }

    let config = LocatorConfig::default();
    if verbose {
        print_step(3, 3, "Locating content start");
        print_detail("Offset", &page.content_start(&config).to_string());
    }

    let mut content = if args.standardize { page.standardized_content(&config) } else { page.content(&config) };
    if !content.ends_with('\n') {
        content.push('\n');
    }

    write_output(args.output.as_deref(), &content)
}

async fn run_locate(args: LocateArgs, verbose: bool) -> anyhow::Result<()> {
    let page = load_page(&args.input, &args.fetch.config(), verbose).await?;

    let citation = Citation {
        url: args.input.clone(),
        title: args.title,
        authors: args.authors,
        date: args.date,
        publisher: args.publisher,
    };
    if citation.fields().is_empty() {
        print_warning("No values given; pass --title, --author, --date or --publisher");
    }

    if verbose {
        print_step(3, 3, "Locating citation fields");
    }

    let config = LocatorConfig::default();
    let text = page.standardized_content(&config);
    let locations: BTreeMap<_, _> = citation
        .fields()
        .into_iter()
        .map(|(name, kind, value)| (name.to_string(), locate(&prepare(&value, kind), &text, kind)))
        .collect();

    let output = match args.format {
        OutputFormat::Json => {
            let output = LocationOutput {
                source: Some(args.input),
                content_start: Some(page.content_start(&config)),
                locations,
            };
            format!("{}\n", to_json(&output, &JsonConfig { pretty: args.pretty })?)
        }
        OutputFormat::Text => format_locations(&text, &locations, &TextConfig { show_snippets: true }),
    };

    write_output(None, &output)
}

async fn run_collect(args: CollectArgs, verbose: bool) -> anyhow::Result<()> {
    let citations = read_records(&args.records)?;
    if verbose {
        print_info(&format!("Collecting {} records with {} workers", citations.len(), args.workers));
    }

    let config = CollectConfig { workers: args.workers, fetch: args.fetch.config(), ..Default::default() };
    let collection = collect(citations, &config).await;

    if !collection.bad_links.is_empty() {
        print_warning(&format!("{} pages could not be used", collection.bad_links.len()));
    }

    let json = to_json(&collection, &JsonConfig { pretty: args.pretty })?;
    write_output(args.output.as_deref(), &format!("{}\n", json))
}

async fn run_evaluate(args: EvaluateArgs, verbose: bool) -> anyhow::Result<()> {
    let citations = read_records(&args.records)?;
    let fetch = args.fetch.config();
    let mut cache = PageCache::new();
    let mut samples = Vec::new();

    for (index, citation) in citations.into_iter().enumerate() {
        let page = match &args.pages {
            Some(dir) => {
                let path = dir.join(format!("{}.html", index));
                fetch_file(&path.to_string_lossy())
                    .and_then(|html| Webpage::from_html(citation.url.clone(), html))
            }
            None => cache.fetch(&citation.url, &fetch).await.cloned(),
        };

        match page {
            Ok(page) => samples.push(Sample { citation, page }),
            Err(e) => print_warning(&format!("Skipping {}: {}", citation.url, e)),
        }
    }

    if verbose {
        print_info(&format!("Evaluating {} pages", samples.len()));
    }

    let config = LocatorConfig::default();
    let preservation = data_preservation(&samples, &config);
    let content_start = content_start_accuracy(&samples, &config);

    let output = match args.format {
        OutputFormat::Json => {
            let report = json!({ "data_preservation": preservation, "content_start": content_start });
            format!("{}\n", to_json(&report, &JsonConfig { pretty: args.pretty })?)
        }
        OutputFormat::Text => {
            format!("{}\n{}", format_preservation(&preservation), format_content_start(&content_start))
        }
    };

    write_output(None, &output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    match cli.command {
        Command::Content(args) => run_content(args, cli.verbose).await,
        Command::Locate(args) => run_locate(args, cli.verbose).await,
        Command::Collect(args) => run_collect(args, cli.verbose).await,
        Command::Evaluate(args) => run_evaluate(args, cli.verbose).await,
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "citeloc", &mut std::io::stdout());
            Ok(())
        }
    }
}
