//! CLI binary for pdf-token-counter.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `CountConfig`, drives a `Session`, and prints the rendered view.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_token_counter::{
    inspect, render, CountConfig, CountProgressCallback, DroppedItem, Gesture, PdfiumEngine,
    ProgressCallback, RunState, Session, View,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// The bar starts as a spinner; `on_run_start` gives it a length.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Counting");
    }
}

impl CountProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_start(&self, page_number: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_number}"));
    }

    fn on_page_complete(&self, page_number: usize, total_pages: usize, token_count: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_number,
            total_pages,
            dim(&format!("{token_count:>6} tokens")),
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_number: usize, total_pages: usize, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_number,
            total_pages,
            red(&msg),
        ));
        self.bar.abandon();
    }

    fn on_run_complete(&self, _total_pages: usize, _total_tokens: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Count tokens per page
  pdftokens report.pdf

  # Several files behave like a drag-and-drop: only the first is used,
  # and it must be a PDF
  pdftokens report.pdf appendix.pdf

  # Machine-readable output, including each page's text
  pdftokens --json report.pdf > counts.json

  # Print the extracted text under the counts
  pdftokens --show-text report.pdf

  # Page count only
  pdftokens --inspect-only report.pdf

  # Interactive session: open, drop, clear, quit
  pdftokens --interactive

TOKENS:
  A token is a maximal run of non-whitespace characters. "Hello   world"
  is 2 tokens; punctuation is not stripped.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to an existing libpdfium (file or directory)
  PDFIUM_CACHE_DIR        Override the directory searched for libpdfium
  PDFTOKENS_PASSWORD      Password for encrypted PDFs
  RUST_LOG                Log filter (e.g. pdf_token_counter=debug)
"#;

/// Count whitespace-delimited tokens per page of a PDF.
#[derive(Parser, Debug)]
#[command(
    name = "pdftokens",
    version,
    about = "Count whitespace-delimited tokens per page of a PDF",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file(s). With more than one, only the first is used.
    #[arg(required_unless_present = "interactive")]
    files: Vec<PathBuf>,

    /// Output the outcome as JSON instead of the text view.
    #[arg(long, env = "PDFTOKENS_JSON")]
    json: bool,

    /// Print each page's extracted text after the counts.
    #[arg(long)]
    show_text: bool,

    /// Print the page count only, no token counting.
    #[arg(long)]
    inspect_only: bool,

    /// Run a line-driven session reading commands from stdin.
    #[arg(short, long)]
    interactive: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFTOKENS_PASSWORD")]
    password: Option<String>,

    /// PDFium library file or directory.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Warn (but still process) when the input exceeds this many MB.
    #[arg(long, env = "PDFTOKENS_SOFT_LIMIT_MB", default_value_t = 50,
          value_parser = clap::value_parser!(u64).range(1..))]
    soft_limit_mb: u64,

    /// Disable progress bar.
    #[arg(long, env = "PDFTOKENS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFTOKENS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, env = "PDFTOKENS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.interactive;
    let filter = log_filter(cli.verbose, cli.quiet);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Ensure the PDF engine is available ───────────────────────────────
    let engine = match cli.pdfium_lib {
        Some(ref path) => PdfiumEngine::with_library_path(path.clone()),
        None => PdfiumEngine::new(),
    };
    if let Err(e) = tokio::task::spawn_blocking({
        let engine = engine.clone();
        move || engine.probe()
    })
    .await
    .context("PDF engine probe panicked")?
    {
        // Every run would fail the same way; say so once, up front.
        eprintln!("{} {}", red("✘"), e);
    }

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn CountProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, engine, progress_cb)?;

    if cli.interactive {
        return run_interactive(&config).await;
    }

    let gesture = gesture_for(&cli.files);

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let path = pdf_token_counter::pipeline::input::select(&gesture)
            .context("No PDF selected: only PDF files are accepted")?;
        let info = inspect(path, &config).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialise document info")?
            );
        } else {
            println!("File:   {}", info.file_name);
            println!("Bytes:  {}", info.byte_len);
            println!("Pages:  {}", info.page_count);
        }
        return Ok(());
    }

    // ── Run ──────────────────────────────────────────────────────────────
    let mut session = Session::new();
    let state = session.run(&gesture, &config).await;

    match state {
        RunState::Idle => {
            anyhow::bail!("No PDF selected: only PDF files are accepted");
        }
        RunState::Failed { message, .. } => {
            if cli.json {
                println!("{}", serde_json::json!({ "error": message }));
            } else {
                eprintln!("{} {}", red("✘"), render(state));
            }
            std::process::exit(1);
        }
        RunState::Success { outcome, file_name } => {
            if cli.json {
                let report = serde_json::json!({
                    "file_name": file_name,
                    "outcome": outcome,
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialise outcome")?
                );
            } else {
                println!("{}", render(state));
                if cli.show_text {
                    for page in outcome.pages() {
                        println!("\n{}", bold(&format!("── Page {} ──", page.page_number)));
                        println!("{}", page.extracted_text);
                    }
                }
                if !cli.quiet {
                    eprintln!("{}", dim(&format!("{}ms", outcome.duration_ms())));
                }
            }
        }
        RunState::Loading { .. } => {
            anyhow::bail!("Run ended while still loading");
        }
    }

    Ok(())
}

/// Default log filter when `RUST_LOG` is unset. Library INFO lines are
/// always hidden (the progress bar covers them); WARN lines such as the
/// oversized-file notice stay visible unless `--quiet`.
fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Map CLI args to `CountConfig`.
fn build_config(
    cli: &Cli,
    engine: PdfiumEngine,
    progress: Option<ProgressCallback>,
) -> Result<CountConfig> {
    let mut builder = CountConfig::builder()
        .engine(Arc::new(engine))
        .soft_size_limit_bytes(cli.soft_limit_mb * 1024 * 1024);

    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// One file is a browse; several behave like a drop.
fn gesture_for(files: &[PathBuf]) -> Gesture {
    match files {
        [single] => Gesture::Browse(single.clone()),
        many => Gesture::Drop(many.iter().map(DroppedItem::from_path).collect()),
    }
}

const INTERACTIVE_HELP: &str =
    "commands: open <path> | drop <path> [\"path with spaces\"…] | clear | help | quit";

/// Line-driven session: each command is a gesture, and the view is
/// re-rendered after every transition.
async fn run_interactive(config: &CountConfig) -> Result<()> {
    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", dim(INTERACTIVE_HELP));
    print_view(&render(session.state()));

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            Command::Open(path) => {
                submit_and_count(&mut session, &Gesture::Browse(path), config).await;
            }
            Command::Drop(paths) => {
                let items = paths.into_iter().map(DroppedItem::from_path).collect();
                let gesture = Gesture::Drop(items);
                submit_and_count(&mut session, &gesture, config).await;
            }
            Command::Clear => {
                session.clear();
                print_view(&render(session.state()));
            }
            Command::Help => println!("{}", dim(INTERACTIVE_HELP)),
            Command::Quit => break,
            Command::Usage(usage) => println!("{}", red(&format!("usage: {usage}"))),
            Command::Unknown(other) => {
                println!("{}", red(&format!("unknown command '{other}'")));
            }
        }
    }

    Ok(())
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Open(PathBuf),
    Drop(Vec<PathBuf>),
    Clear,
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

/// Parse an interactive line. Blank lines yield `None`.
///
/// `open` takes the rest of the line as a single path, so paths may contain
/// spaces. `drop` takes several paths; wrap one in double quotes to keep
/// its spaces.
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => return None,
        "open" | "browse" if rest.is_empty() => Command::Usage("open <path>"),
        "open" | "browse" => Command::Open(PathBuf::from(unquote(rest))),
        "drop" => Command::Drop(split_paths(rest)),
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Whitespace-separated paths; a double-quoted run is one path.
fn split_paths(s: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in s.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }
    paths
}

async fn submit_and_count(session: &mut Session, gesture: &Gesture, config: &CountConfig) {
    let Some(path) = session.submit(gesture) else {
        // Rejected gestures leave the view as it was.
        return;
    };
    print_view(&render(session.state()));

    let result = pdf_token_counter::count_file(&path, config).await;
    session.finish(result);
    print_view(&render(session.state()));
}

fn print_view(view: &View) {
    match view {
        View::ErrorBanner { .. } => println!("\n{}", red(&view.to_string())),
        View::Results { .. } => println!("\n{}", green(&view.to_string())),
        _ => println!("\n{view}"),
    }
}
