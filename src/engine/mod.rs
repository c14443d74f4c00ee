//! The PDF engine seam.
//!
//! The pipeline never talks to a parsing library directly. It receives an
//! [`Arc<dyn PdfEngine>`](PdfEngine) through [`crate::config::CountConfig`]
//! and uses exactly two operations: open a document from bytes, and fetch
//! the text fragments of one page. Tests inject an in-memory engine; the
//! default is [`pdfium::PdfiumEngine`].
//!
//! Futures are boxed so the traits stay object-safe and the engine can be
//! shared behind an `Arc`.

pub mod pdfium;

use crate::error::EngineError;
use futures::future::BoxFuture;

pub use pdfium::PdfiumEngine;

/// A PDF parsing capability.
pub trait PdfEngine: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Open a document from its raw bytes.
    ///
    /// Resolves to [`EngineError::Unavailable`] when the engine itself
    /// cannot run, [`EngineError::PasswordRequired`] for locked documents,
    /// and [`EngineError::Failed`] for anything unparseable.
    fn open<'a>(
        &'a self,
        bytes: Vec<u8>,
        password: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn PdfDocumentHandle>, EngineError>>;
}

/// An open document.
pub trait PdfDocumentHandle: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Ordered text fragments of the 1-indexed page `page_number`.
    fn text_fragments(&self, page_number: usize) -> BoxFuture<'_, Result<Vec<String>, EngineError>>;
}
