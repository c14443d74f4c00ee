//! Result presentation: a pure mapping from [`RunState`] to what is shown.

use crate::session::RunState;
use std::fmt;

/// One row of the per-page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub page_number: usize,
    pub token_count: usize,
}

/// What the result area displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Nothing selected: invite an upload.
    Prompt,
    /// A run is in progress.
    Progress { file_name: String },
    /// The last run failed.
    ErrorBanner { file_name: String, message: String },
    /// The run succeeded but found no pages or no tokens.
    NoTextContent { file_name: String },
    /// Totals plus one row per page, in page order.
    Results {
        file_name: String,
        total_tokens: usize,
        rows: Vec<PageRow>,
    },
}

/// Map a state to its view.
pub fn render(state: &RunState) -> View {
    match state {
        RunState::Idle => View::Prompt,
        RunState::Loading { file_name } => View::Progress {
            file_name: file_name.clone(),
        },
        RunState::Failed { message, file_name } => View::ErrorBanner {
            file_name: file_name.clone(),
            message: message.clone(),
        },
        RunState::Success { outcome, file_name } if outcome.has_no_text() => View::NoTextContent {
            file_name: file_name.clone(),
        },
        RunState::Success { outcome, file_name } => View::Results {
            file_name: file_name.clone(),
            total_tokens: outcome.total_tokens(),
            rows: outcome
                .pages()
                .iter()
                .map(|p| PageRow {
                    page_number: p.page_number,
                    token_count: p.token_count,
                })
                .collect(),
        },
    }
}

/// Format `n` with comma thousands separators: `1234567` → `"1,234,567"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Prompt => {
                writeln!(f, "Upload a PDF to count tokens per page and total.")?;
                write!(f, "PDF files only, max 50MB.")
            }
            View::Progress { file_name } => {
                writeln!(f, "Processing PDF, please wait...")?;
                write!(f, "Analyzing: {file_name}")
            }
            View::ErrorBanner { message, .. } => write!(f, "Error: {message}"),
            View::NoTextContent { file_name } => {
                writeln!(f, "Results for: {file_name}")?;
                write!(f, "The PDF appears to have no text content.")
            }
            View::Results {
                file_name,
                total_tokens,
                rows,
            } => {
                writeln!(f, "Token Analysis Complete")?;
                writeln!(f, "Results for: {file_name}")?;
                writeln!(f, "Total Tokens: {}", group_thousands(*total_tokens))?;
                write!(f, "Tokens per Page:")?;
                for row in rows {
                    write!(
                        f,
                        "\n  Page {:>4}: {} tokens",
                        row.page_number,
                        group_thousands(row.token_count)
                    )?;
                }
                Ok(())
            }
        }
    }
}
