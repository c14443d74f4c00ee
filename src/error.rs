//! Error types for the pdf-token-counter library.
//!
//! Every failure aborts the whole run: there is no partial result for a
//! document whose third page could not be read. Two layers exist:
//!
//! * [`EngineError`]: what a [`crate::engine::PdfEngine`] implementation
//!   reports. Engines know nothing about runs or pages-in-context.
//!
//! * [`TokenCountError`]: what the pipeline returns. Engine errors are
//!   mapped onto it at the pipeline boundary (open failures become
//!   [`TokenCountError::ParseError`], page failures become
//!   [`TokenCountError::PageReadError`]).
//!
//! Presentation never sees the structure; it receives the single string
//! produced by [`TokenCountError::user_message`].

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf-token-counter library.
#[derive(Debug, Error)]
pub enum TokenCountError {
    // ── Engine errors ─────────────────────────────────────────────────────
    /// The PDF engine is not present in this environment.
    #[error(
        "PDF engine '{engine}' is unavailable: {detail}\n\n\
Point PDFIUM_LIB_PATH at an existing libpdfium, or place the library in\n\
the pdfium cache directory, then try again.\n"
    )]
    CapabilityUnavailable { engine: String, detail: String },

    // ── Document errors ───────────────────────────────────────────────────
    /// The buffer is not a parseable document.
    #[error("'{name}' could not be parsed as a PDF: {detail}")]
    ParseError { name: String, detail: String },

    /// The document is encrypted and no (or a wrong) password was given.
    #[error(
        "'{name}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>."
    )]
    PasswordRequired { name: String },

    /// A page could not be read; the whole run is aborted.
    #[error("Page {page} of {total} could not be read: {detail}")]
    PageReadError {
        page: usize,
        total: usize,
        detail: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The input file could not be read into memory.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenCountError {
    /// The one-line message shown in the error banner.
    ///
    /// A missing engine reads differently from a bad document because the
    /// user fixes it differently: the environment, not the file.
    pub fn user_message(&self) -> String {
        match self {
            TokenCountError::CapabilityUnavailable { .. } => {
                "PDF processing engine failed to load. Install PDFium and try again.".to_string()
            }
            other => {
                let full = other.to_string();
                let first_line = full.lines().next().unwrap_or_default();
                format!("Failed to process PDF: {first_line}")
            }
        }
    }
}

/// An error reported by a [`crate::engine::PdfEngine`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The engine's backing library cannot be loaded.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// The document needs a password that was not supplied or was wrong.
    #[error("password required")]
    PasswordRequired,

    /// The engine was available but the operation failed.
    #[error("{0}")]
    Failed(String),
}
