//! Pipeline stages for PDF token counting.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ engine.open ──▶ engine.text_fragments (page 1..N) ──▶ tokenize
//! (gesture)   (bytes)          (one page at a time)               (count)
//! ```
//!
//! 1. [`input`]   : pick at most one file from a gesture and read its bytes
//! 2. engine      : see [`crate::engine`]; opening and page reads are the
//!    async suspension points
//! 3. [`tokenize`]: join a page's fragments and count whitespace tokens
//!
//! Aggregation lives in [`crate::count`].

pub mod input;
pub mod tokenize;
