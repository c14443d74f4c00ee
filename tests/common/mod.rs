//! Shared test helpers: an in-memory engine whose behaviour is scripted
//! per page.

#![allow(dead_code)]

use futures::future::BoxFuture;
use pdf_token_counter::{EngineError, PdfDocumentHandle, PdfEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a scripted page returns.
#[derive(Debug, Clone)]
pub enum Page {
    Text(Vec<&'static str>),
    Fail(&'static str),
}

/// What opening a scripted document does.
#[derive(Debug, Clone)]
pub enum Open {
    Pages(Vec<Page>),
    Unavailable,
    Locked,
    Corrupt(&'static str),
}

/// Records every page request so tests can check order and overlap.
#[derive(Debug, Default)]
pub struct Calls {
    pub requested: Mutex<Vec<usize>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub opens: AtomicUsize,
    pub passwords: Mutex<Vec<Option<String>>>,
}

pub struct ScriptedEngine {
    script: Open,
    pub calls: Arc<Calls>,
}

impl ScriptedEngine {
    pub fn new(script: Open) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: Arc::new(Calls::default()),
        })
    }

    pub fn with_pages(pages: Vec<Page>) -> Arc<Self> {
        Self::new(Open::Pages(pages))
    }

    pub fn requested(&self) -> Vec<usize> {
        self.calls.requested.lock().unwrap().clone()
    }

    pub fn passwords(&self) -> Vec<Option<String>> {
        self.calls.passwords.lock().unwrap().clone()
    }
}

struct ScriptedDocument {
    pages: Vec<Page>,
    calls: Arc<Calls>,
}

impl PdfEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn open<'a>(
        &'a self,
        _bytes: Vec<u8>,
        password: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Box<dyn PdfDocumentHandle>, EngineError>> {
        Box::pin(async move {
            self.calls.opens.fetch_add(1, Ordering::SeqCst);
            self.calls
                .passwords
                .lock()
                .unwrap()
                .push(password.map(str::to_string));
            tokio::task::yield_now().await;
            match &self.script {
                Open::Pages(pages) => Ok(Box::new(ScriptedDocument {
                    pages: pages.clone(),
                    calls: Arc::clone(&self.calls),
                }) as Box<dyn PdfDocumentHandle>),
                Open::Unavailable => Err(EngineError::Unavailable(
                    "no engine in this environment".into(),
                )),
                Open::Locked => Err(EngineError::PasswordRequired),
                Open::Corrupt(detail) => Err(EngineError::Failed(detail.to_string())),
            }
        })
    }
}

impl PdfDocumentHandle for ScriptedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text_fragments(
        &self,
        page_number: usize,
    ) -> BoxFuture<'_, Result<Vec<String>, EngineError>> {
        Box::pin(async move {
            let now = self.calls.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.calls.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.requested.lock().unwrap().push(page_number);

            tokio::task::yield_now().await;

            let result = match self.pages.get(page_number - 1) {
                Some(Page::Text(fragments)) => {
                    Ok(fragments.iter().map(|s| s.to_string()).collect())
                }
                Some(Page::Fail(detail)) => Err(EngineError::Failed(detail.to_string())),
                None => Err(EngineError::Failed(format!("no page {page_number}"))),
            };

            self.calls.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        })
    }
}

/// `n` pages, each with the given fragments.
pub fn uniform_pages(n: usize, fragments: Vec<&'static str>) -> Vec<Page> {
    (0..n).map(|_| Page::Text(fragments.clone())).collect()
}
