//! # pdf-token-counter
//!
//! Count whitespace-delimited tokens on every page of a PDF document.
//!
//! A "token" is a maximal run of non-whitespace characters. This is word
//! counting, not a linguistic or subword tokenizer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     pick one file from a browse or drop gesture, read bytes
//!  ├─ 2. Open      hand the bytes to the PDF engine (PDFium by default)
//!  ├─ 3. Extract   request each page's text fragments, one page at a time
//!  ├─ 4. Tokenize  join fragments with spaces, count whitespace runs
//!  └─ 5. Output    per-page counts + their total
//! ```
//!
//! Any failure aborts the run; there are no partial results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_token_counter::{count_file, CountConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let outcome = count_file("document.pdf", &CountConfig::default()).await?;
//!     println!("{} tokens on {} pages", outcome.total_tokens(), outcome.page_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftokens` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## Bring your own engine
//!
//! The PDF engine is injected through [`CountConfig`]; implement
//! [`PdfEngine`] to count documents with something other than PDFium.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod count;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod session;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CountConfig, CountConfigBuilder, DEFAULT_SOFT_SIZE_LIMIT};
pub use count::{count_bytes, count_file, count_sync, count_with_engine, inspect};
pub use engine::{PdfDocumentHandle, PdfEngine, PdfiumEngine};
pub use error::{EngineError, TokenCountError};
pub use output::{DocumentInfo, PageResult, ProcessingOutcome};
pub use pipeline::input::{DroppedItem, Gesture, UploadedFile};
pub use pipeline::tokenize::count_tokens;
pub use progress::{CountProgressCallback, NoopProgressCallback, ProgressCallback};
pub use session::{RunState, Session};
pub use view::{render, View};
