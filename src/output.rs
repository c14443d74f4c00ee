//! Result types produced by a counting run.

use serde::{Deserialize, Serialize};

/// Token count for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_number: usize,
    /// Number of whitespace-delimited tokens on the page.
    pub token_count: usize,
    /// The page's text fragments joined with single spaces, trimmed.
    pub extracted_text: String,
}

/// The outcome of a successful run: one [`PageResult`] per page, in page
/// order, plus their total.
///
/// Fields are private so the total can never drift from the pages; build
/// one with [`ProcessingOutcome::from_pages`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingOutcome {
    pages: Vec<PageResult>,
    total_tokens: usize,
    duration_ms: u64,
}

impl ProcessingOutcome {
    /// Aggregate per-page results into an outcome.
    pub fn from_pages(pages: Vec<PageResult>, duration_ms: u64) -> Self {
        let total_tokens = pages.iter().map(|p| p.token_count).sum();
        Self {
            pages,
            total_tokens,
            duration_ms,
        }
    }

    pub fn pages(&self) -> &[PageResult] {
        &self.pages
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Wall-clock time of the run in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// True when the document yielded no countable text at all.
    pub fn has_no_text(&self) -> bool {
        self.pages.is_empty() || self.total_tokens == 0
    }
}

/// Basic facts about a document, gathered without extracting text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub file_name: String,
    pub byte_len: usize,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, tokens: usize) -> PageResult {
        PageResult {
            page_number: n,
            token_count: tokens,
            extracted_text: String::new(),
        }
    }

    #[test]
    fn total_is_sum_of_pages() {
        let outcome = ProcessingOutcome::from_pages(vec![page(1, 4), page(2, 0), page(3, 11)], 7);
        assert_eq!(outcome.total_tokens(), 15);
        assert_eq!(outcome.page_count(), 3);
        assert!(!outcome.has_no_text());
    }

    #[test]
    fn empty_outcome_has_no_text() {
        let outcome = ProcessingOutcome::from_pages(Vec::new(), 0);
        assert_eq!(outcome.total_tokens(), 0);
        assert!(outcome.has_no_text());
    }

    #[test]
    fn all_zero_pages_have_no_text() {
        let outcome = ProcessingOutcome::from_pages(vec![page(1, 0), page(2, 0)], 0);
        assert!(outcome.has_no_text());
    }

    #[test]
    fn serialises_with_snake_case_fields() {
        let outcome = ProcessingOutcome::from_pages(vec![page(1, 2)], 3);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["total_tokens"], 2);
        assert_eq!(json["pages"][0]["page_number"], 1);
        assert_eq!(json["pages"][0]["token_count"], 2);
    }
}
