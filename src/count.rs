//! Counting entry points.
//!
//! [`count_with_engine`] is the pipeline itself; the other functions resolve
//! their inputs (engine, bytes) and delegate to it.
//!
//! Pages are read strictly in order, one request in flight at a time. The
//! first failure aborts the run and whatever was already counted is
//! discarded, so callers only ever see a complete outcome or an error.

use crate::config::CountConfig;
use crate::engine::PdfEngine;
use crate::error::{EngineError, TokenCountError};
use crate::output::{DocumentInfo, PageResult, ProcessingOutcome};
use crate::pipeline::{input, tokenize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Count tokens in a PDF file.
///
/// This is the primary entry point for the library.
///
/// # Example
/// ```rust,no_run
/// use pdf_token_counter::{count_file, CountConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = count_file("document.pdf", &CountConfig::default()).await?;
/// for page in outcome.pages() {
///     println!("Page {}: {} tokens", page.page_number, page.token_count);
/// }
/// println!("Total: {}", outcome.total_tokens());
/// # Ok(())
/// # }
/// ```
pub async fn count_file(
    path: impl AsRef<Path>,
    config: &CountConfig,
) -> Result<ProcessingOutcome, TokenCountError> {
    let path = path.as_ref();
    let upload = input::read_upload(path, config.soft_size_limit_bytes).await?;
    count_named_bytes(&upload.name, upload.bytes, config).await
}

/// Count tokens in PDF bytes already held in memory.
pub async fn count_bytes(
    bytes: Vec<u8>,
    config: &CountConfig,
) -> Result<ProcessingOutcome, TokenCountError> {
    count_named_bytes("<memory>", bytes, config).await
}

/// Synchronous wrapper around [`count_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn count_sync(
    path: impl AsRef<Path>,
    config: &CountConfig,
) -> Result<ProcessingOutcome, TokenCountError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| TokenCountError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(count_file(path, config))
}

/// Open a document and report its page count without extracting text.
pub async fn inspect(
    path: impl AsRef<Path>,
    config: &CountConfig,
) -> Result<DocumentInfo, TokenCountError> {
    let path = path.as_ref();
    let upload = input::read_upload(path, config.soft_size_limit_bytes).await?;
    let byte_len = upload.bytes.len();

    let engine = config.resolve_engine();
    let document = engine
        .open(upload.bytes, config.password.as_deref())
        .await
        .map_err(|e| open_error(engine.name(), &upload.name, e))?;

    Ok(DocumentInfo {
        file_name: upload.name,
        byte_len,
        page_count: document.page_count(),
    })
}

/// Run the extraction-and-count pipeline against `engine`.
///
/// `name` is only used in log lines and error messages.
pub async fn count_with_engine(
    engine: &dyn PdfEngine,
    name: &str,
    bytes: Vec<u8>,
    config: &CountConfig,
) -> Result<ProcessingOutcome, TokenCountError> {
    let start = Instant::now();
    info!("Starting token count: {} ({} bytes)", name, bytes.len());

    // ── Step 1: Open ─────────────────────────────────────────────────────
    let document = engine
        .open(bytes, config.password.as_deref())
        .await
        .map_err(|e| open_error(engine.name(), name, e))?;
    let total_pages = document.page_count();
    info!("{} has {} pages", name, total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total_pages);
    }

    // ── Step 2: Per-page extraction, strictly sequential ────────────────
    let mut pages = Vec::with_capacity(total_pages);
    for page_number in 1..=total_pages {
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_number, total_pages);
        }

        let fragments = match document.text_fragments(page_number).await {
            Ok(fragments) => fragments,
            Err(e) => {
                let err = page_error(engine.name(), page_number, total_pages, e);
                warn!("Aborting run for {}: {}", name, err);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_error(page_number, total_pages, &err.to_string());
                }
                return Err(err);
            }
        };

        // ── Step 2b: Tokenize ────────────────────────────────────────────
        let joined = tokenize::join_fragments(&fragments);
        let token_count = tokenize::count_tokens(&joined);
        debug!(
            "Page {}/{}: {} fragments, {} tokens",
            page_number,
            total_pages,
            fragments.len(),
            token_count
        );

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_number, total_pages, token_count);
        }

        pages.push(PageResult {
            page_number,
            token_count,
            extracted_text: tokenize::trim_separators(&joined).to_string(),
        });
    }

    // ── Step 3: Aggregate ────────────────────────────────────────────────
    let outcome = ProcessingOutcome::from_pages(pages, start.elapsed().as_millis() as u64);

    info!(
        "Token count complete: {} tokens over {} pages, {}ms",
        outcome.total_tokens(),
        outcome.page_count(),
        outcome.duration_ms()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total_pages, outcome.total_tokens());
    }

    Ok(outcome)
}

// ── Internal helpers ─────────────────────────────────────────────────────

async fn count_named_bytes(
    name: &str,
    bytes: Vec<u8>,
    config: &CountConfig,
) -> Result<ProcessingOutcome, TokenCountError> {
    let engine = config.resolve_engine();
    count_with_engine(engine.as_ref(), name, bytes, config).await
}

fn open_error(engine: &str, name: &str, err: EngineError) -> TokenCountError {
    match err {
        EngineError::Unavailable(detail) => TokenCountError::CapabilityUnavailable {
            engine: engine.to_string(),
            detail,
        },
        EngineError::PasswordRequired => TokenCountError::PasswordRequired {
            name: name.to_string(),
        },
        EngineError::Failed(detail) => TokenCountError::ParseError {
            name: name.to_string(),
            detail,
        },
    }
}

fn page_error(engine: &str, page: usize, total: usize, err: EngineError) -> TokenCountError {
    match err {
        EngineError::Unavailable(detail) => TokenCountError::CapabilityUnavailable {
            engine: engine.to_string(),
            detail,
        },
        other => TokenCountError::PageReadError {
            page,
            total,
            detail: other.to_string(),
        },
    }
}
