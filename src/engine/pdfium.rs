//! PDFium-backed engine.
//!
//! ## Why a worker thread per document?
//!
//! A `PdfDocument` borrows the `Pdfium` binding it was loaded from, and
//! pdfium keeps thread-local state, so neither can be parked inside an
//! async task. Each opened document therefore gets one OS thread that owns
//! the binding and the document for its whole life. The async side talks to
//! it over a bounded channel: one request per page, one oneshot reply each.
//! Dropping the [`PdfDocumentHandle`] closes the channel and the thread
//! exits.

use crate::engine::{PdfDocumentHandle, PdfEngine};
use crate::error::EngineError;
use futures::future::BoxFuture;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Engine that parses documents with the PDFium library.
#[derive(Debug, Clone, Default)]
pub struct PdfiumEngine {
    library_path: Option<PathBuf>,
}

impl PdfiumEngine {
    /// Engine that locates PDFium through the default search order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine bound to the PDFium library at `path` (file or directory).
    pub fn with_library_path(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
        }
    }

    /// Check that PDFium can be bound, without opening a document.
    pub fn probe(&self) -> Result<(), EngineError> {
        pdfium_locate::bind(self.library_path.as_deref())
            .map(|_| ())
            .map_err(|e| EngineError::Unavailable(e.to_string()))
    }
}

impl PdfEngine for PdfiumEngine {
    fn name(&self) -> &str {
        "pdfium"
    }

    fn open<'a>(
        &'a self,
        bytes: Vec<u8>,
        password: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn PdfDocumentHandle>, EngineError>> {
        let library_path = self.library_path.clone();
        let password = password.map(str::to_string);

        Box::pin(async move {
            let (ready_tx, ready_rx) = oneshot::channel();
            let (request_tx, request_rx) = mpsc::channel(1);

            std::thread::Builder::new()
                .name("pdfium-worker".to_string())
                .spawn(move || serve_document(library_path, bytes, password, ready_tx, request_rx))
                .map_err(|e| EngineError::Failed(format!("could not start pdfium worker: {e}")))?;

            let page_count = ready_rx.await.map_err(|_| {
                EngineError::Failed("pdfium worker exited before the document was opened".into())
            })??;

            info!("PDF loaded: {} pages", page_count);

            Ok(Box::new(PdfiumDocument {
                page_count,
                requests: request_tx,
            }) as Box<dyn PdfDocumentHandle>)
        })
    }
}

/// Handle to a document held open by a worker thread.
struct PdfiumDocument {
    page_count: usize,
    requests: mpsc::Sender<PageRequest>,
}

struct PageRequest {
    page_number: usize,
    reply: oneshot::Sender<Result<Vec<String>, EngineError>>,
}

impl PdfDocumentHandle for PdfiumDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn text_fragments(
        &self,
        page_number: usize,
    ) -> BoxFuture<'_, Result<Vec<String>, EngineError>> {
        Box::pin(async move {
            let (reply, answer) = oneshot::channel();
            self.requests
                .send(PageRequest { page_number, reply })
                .await
                .map_err(|_| EngineError::Failed("pdfium worker has stopped".into()))?;

            answer
                .await
                .map_err(|_| EngineError::Failed("pdfium worker dropped the page request".into()))?
        })
    }
}

/// Worker thread body: bind, load, then answer page requests until the
/// handle is dropped.
fn serve_document(
    library_path: Option<PathBuf>,
    bytes: Vec<u8>,
    password: Option<String>,
    ready: oneshot::Sender<Result<usize, EngineError>>,
    mut requests: mpsc::Receiver<PageRequest>,
) {
    let pdfium = match pdfium_locate::bind(library_path.as_deref()) {
        Ok(pdfium) => pdfium,
        Err(e) => {
            let _ = ready.send(Err(EngineError::Unavailable(e.to_string())));
            return;
        }
    };

    let document = match pdfium.load_pdf_from_byte_vec(bytes, password.as_deref()) {
        Ok(document) => document,
        Err(e) => {
            let _ = ready.send(Err(classify_load_error(&format!("{e:?}"))));
            return;
        }
    };

    let pages = document.pages();
    let page_count = pages.len() as usize;
    if ready.send(Ok(page_count)).is_err() {
        return;
    }

    while let Some(request) = requests.blocking_recv() {
        let result = read_page(pages, request.page_number, page_count);
        let _ = request.reply.send(result);
    }

    debug!("pdfium worker finished");
}

fn read_page(
    pages: &PdfPages<'_>,
    page_number: usize,
    page_count: usize,
) -> Result<Vec<String>, EngineError> {
    if page_number == 0 || page_number > page_count {
        return Err(EngineError::Failed(format!(
            "page {page_number} is out of range (document has {page_count} pages)"
        )));
    }

    let index = u16::try_from(page_number - 1).map_err(|_| {
        EngineError::Failed(format!(
            "page {page_number} exceeds pdfium's page index range"
        ))
    })?;

    let page = pages
        .get(index)
        .map_err(|e| EngineError::Failed(format!("{e:?}")))?;
    let text = page
        .text()
        .map_err(|e| EngineError::Failed(format!("{e:?}")))?;

    let fragments: Vec<String> = text.segments().iter().map(|segment| segment.text()).collect();
    debug!("Page {} → {} text fragments", page_number, fragments.len());
    Ok(fragments)
}

/// Pdfium reports a locked document as a generic load error whose debug
/// text names the password failure.
fn classify_load_error(detail: &str) -> EngineError {
    if detail.contains("Password") || detail.contains("password") {
        EngineError::PasswordRequired
    } else {
        EngineError::Failed(detail.to_string())
    }
}
