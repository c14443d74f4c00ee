//! Progress-callback trait for per-page counting events.
//!
//! Inject an [`Arc<dyn CountProgressCallback>`] via
//! [`crate::config::CountConfigBuilder::progress_callback`] to receive
//! events while the pipeline walks the document.
//!
//! Pages are processed one at a time, so events for a run arrive in page
//! order: `on_run_start`, then `on_page_start`/`on_page_complete` pairs,
//! then `on_run_complete`. A failed page produces `on_page_error` and the
//! run ends there; `on_run_complete` is not called.
//!
//! # Example
//!
//! ```rust
//! use pdf_token_counter::{CountConfig, CountProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct TokenTally {
//!     seen: AtomicUsize,
//! }
//!
//! impl CountProgressCallback for TokenTally {
//!     fn on_page_complete(&self, page_number: usize, total_pages: usize, token_count: usize) {
//!         self.seen.fetch_add(token_count, Ordering::SeqCst);
//!         eprintln!("Page {}/{}: {} tokens", page_number, total_pages, token_count);
//!     }
//! }
//!
//! let config = CountConfig::builder()
//!     .progress_callback(Arc::new(TokenTally { seen: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the counting pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only
/// override what they care about.
pub trait CountProgressCallback: Send + Sync {
    /// Called once the document is open and its page count is known.
    fn on_run_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page's text is requested.
    fn on_page_start(&self, page_number: usize, total_pages: usize) {
        let _ = (page_number, total_pages);
    }

    /// Called when a page has been read and counted.
    fn on_page_complete(&self, page_number: usize, total_pages: usize, token_count: usize) {
        let _ = (page_number, total_pages, token_count);
    }

    /// Called when a page cannot be read. The run aborts afterwards.
    fn on_page_error(&self, page_number: usize, total_pages: usize, error: &str) {
        let _ = (page_number, total_pages, error);
    }

    /// Called once after every page has been counted.
    fn on_run_complete(&self, total_pages: usize, total_tokens: usize) {
        let _ = (total_pages, total_tokens);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl CountProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::CountConfig`].
pub type ProgressCallback = Arc<dyn CountProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        tokens: AtomicUsize,
        errors: AtomicUsize,
        total_pages: AtomicUsize,
    }

    impl CountProgressCallback for TrackingCallback {
        fn on_run_start(&self, total_pages: usize) {
            self.total_pages.store(total_pages, Ordering::SeqCst);
        }

        fn on_page_start(&self, _page_number: usize, _total_pages: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_complete(&self, _page_number: usize, _total_pages: usize, token_count: usize) {
            self.tokens.fetch_add(token_count, Ordering::SeqCst);
        }

        fn on_page_error(&self, _page_number: usize, _total_pages: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(5);
        cb.on_page_start(1, 5);
        cb.on_page_complete(1, 5, 42);
        cb.on_page_error(2, 5, "bad page");
        cb.on_run_complete(5, 42);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_run_start(3);
        tracker.on_page_start(1, 3);
        tracker.on_page_complete(1, 3, 10);
        tracker.on_page_start(2, 3);
        tracker.on_page_complete(2, 3, 5);
        tracker.on_page_start(3, 3);
        tracker.on_page_error(3, 3, "unreadable");

        assert_eq!(tracker.total_pages.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.tokens.load(Ordering::SeqCst), 15);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }
}
