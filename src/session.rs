//! The presentation state machine.
//!
//! A [`Session`] holds exactly one [`RunState`]. It moves only on these events:
//!
//! ```text
//!            submit(gesture selects a file)
//!   Idle ────────────────────────────────▶ Loading ──finish(Ok)──▶ Success
//!    ▲  ◀───────── clear() ────────────┐      │
//!    │                                 │      └──finish(Err)──▶ Failed
//!    └──────── clear() ◀── Success / Failed ──submit──▶ Loading
//! ```
//!
//! While Loading, input is disabled: `submit` and `clear` are ignored. This
//! is the only guard against overlapping runs; the pipeline itself has none.

use crate::config::CountConfig;
use crate::count::count_file;
use crate::error::TokenCountError;
use crate::output::ProcessingOutcome;
use crate::pipeline::input::{self, Gesture};
use std::path::PathBuf;
use tracing::{debug, warn};

/// What the result area is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// Nothing selected yet, or cleared.
    #[default]
    Idle,
    /// A run is in flight.
    Loading { file_name: String },
    /// The last run finished.
    Success {
        outcome: ProcessingOutcome,
        file_name: String,
    },
    /// The last run failed.
    Failed { message: String, file_name: String },
}

impl RunState {
    /// Name of the file the state refers to, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            RunState::Idle => None,
            RunState::Loading { file_name }
            | RunState::Success { file_name, .. }
            | RunState::Failed { file_name, .. } => Some(file_name),
        }
    }
}

/// Owns the current [`RunState`] and applies transitions.
#[derive(Debug, Default)]
pub struct Session {
    state: RunState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Whether the input control accepts gestures right now.
    pub fn input_enabled(&self) -> bool {
        !matches!(self.state, RunState::Loading { .. })
    }

    /// Apply a gesture. Returns the file to process when the session moved
    /// to Loading; `None` leaves the state untouched.
    pub fn submit(&mut self, gesture: &Gesture) -> Option<PathBuf> {
        if !self.input_enabled() {
            warn!("Input ignored: a file is still being processed");
            return None;
        }

        let path = input::select(gesture)?.to_path_buf();
        let file_name = input::display_name(&path);
        debug!("Loading {}", file_name);
        self.state = RunState::Loading { file_name };
        Some(path)
    }

    /// Record the result of the in-flight run.
    pub fn finish(&mut self, result: Result<ProcessingOutcome, TokenCountError>) {
        let file_name = match &self.state {
            RunState::Loading { file_name } => file_name.clone(),
            other => {
                warn!("Run result ignored: session is not loading ({:?})", other.file_name());
                return;
            }
        };

        self.state = match result {
            Ok(outcome) => RunState::Success { outcome, file_name },
            Err(e) => {
                warn!("Error processing PDF '{}': {}", file_name, e);
                RunState::Failed {
                    message: e.user_message(),
                    file_name,
                }
            }
        };
    }

    /// Reset to Idle. Ignored while Loading. Returns whether it applied.
    pub fn clear(&mut self) -> bool {
        if !self.input_enabled() {
            return false;
        }
        self.state = RunState::Idle;
        true
    }

    /// Submit a gesture and, if it selected a file, count it to completion.
    pub async fn run(&mut self, gesture: &Gesture, config: &CountConfig) -> &RunState {
        if let Some(path) = self.submit(gesture) {
            let result = count_file(&path, config).await;
            self.finish(result);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PageResult;
    use crate::pipeline::input::DroppedItem;

    fn outcome(tokens: &[usize]) -> ProcessingOutcome {
        let pages = tokens
            .iter()
            .enumerate()
            .map(|(i, &t)| PageResult {
                page_number: i + 1,
                token_count: t,
                extracted_text: String::new(),
            })
            .collect();
        ProcessingOutcome::from_pages(pages, 0)
    }

    #[test]
    fn starts_idle() {
        let session = Session::new();
        assert_eq!(session.state(), &RunState::Idle);
        assert!(session.input_enabled());
    }

    #[test]
    fn browse_moves_to_loading() {
        let mut session = Session::new();
        let path = session.submit(&Gesture::Browse("/tmp/report.pdf".into()));
        assert_eq!(path, Some(PathBuf::from("/tmp/report.pdf")));
        assert_eq!(
            session.state(),
            &RunState::Loading {
                file_name: "report.pdf".into()
            }
        );
        assert!(!session.input_enabled());
    }

    #[test]
    fn rejected_drop_leaves_state_unchanged() {
        let mut session = Session::new();
        session.submit(&Gesture::Browse("a.pdf".into()));
        session.finish(Ok(outcome(&[3])));
        let before = session.state().clone();

        let path = session.submit(&Gesture::Drop(vec![DroppedItem::from_path("cat.png")]));
        assert_eq!(path, None);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn submit_is_ignored_while_loading() {
        let mut session = Session::new();
        session.submit(&Gesture::Browse("first.pdf".into()));
        assert_eq!(session.submit(&Gesture::Browse("second.pdf".into())), None);
        assert_eq!(session.state().file_name(), Some("first.pdf"));
        assert!(!session.clear());
    }

    #[test]
    fn failure_replaces_previous_results() {
        let mut session = Session::new();
        session.submit(&Gesture::Browse("good.pdf".into()));
        session.finish(Ok(outcome(&[1, 2])));

        session.submit(&Gesture::Browse("bad.pdf".into()));
        session.finish(Err(TokenCountError::ParseError {
            name: "bad.pdf".into(),
            detail: "Invalid PDF structure".into(),
        }));

        match session.state() {
            RunState::Failed { message, file_name } => {
                assert_eq!(file_name, "bad.pdf");
                assert!(message.starts_with("Failed to process PDF"), "got: {message}");
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn finish_without_loading_is_ignored() {
        let mut session = Session::new();
        session.finish(Ok(outcome(&[1])));
        assert_eq!(session.state(), &RunState::Idle);
    }

    #[test]
    fn clear_resets_to_idle() {
        let mut session = Session::new();
        session.submit(&Gesture::Browse("a.pdf".into()));
        session.finish(Ok(outcome(&[4])));
        assert!(session.clear());
        assert_eq!(session.state(), &RunState::Idle);
    }
}
