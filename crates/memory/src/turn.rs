//! A single question/answer exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question and the answer it got, real or refusal.
///
/// Fields are private so a recorded turn cannot be edited after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    question: String,
    answer: String,
    refused: bool,
    created_at: DateTime<Utc>,
}

impl Turn {
    /// A turn answered by the remote model.
    pub fn answered(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self::new(question, answer, false)
    }

    /// A turn short-circuited with the refusal text.
    pub fn refused(question: impl Into<String>, refusal: impl Into<String>) -> Self {
        Self::new(question, refusal, true)
    }

    fn new(question: impl Into<String>, answer: impl Into<String>, refused: bool) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            refused,
            created_at: Utc::now(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether the answer is the out-of-domain refusal.
    pub fn is_refusal(&self) -> bool {
        self.refused
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
