//! Domain gate applied before any remote call.

use munglog_config::{FilterConfig, FilterStrategy};
use munglog_memory::SessionMemory;

/// Decides whether a question belongs to the pet-care domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainFilter {
    /// Accept iff the raw question contains at least one keyword
    /// (case-sensitive substring match).
    Keyword { keywords: Vec<String> },
    /// Accept everything.
    AlwaysAccept,
}

impl DomainFilter {
    pub fn keyword<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keyword {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        match config.strategy {
            FilterStrategy::Keyword => Self::keyword(config.keywords.iter().cloned()),
            FilterStrategy::AlwaysAccept => Self::AlwaysAccept,
        }
    }

    pub fn strategy(&self) -> FilterStrategy {
        match self {
            Self::Keyword { .. } => FilterStrategy::Keyword,
            Self::AlwaysAccept => FilterStrategy::AlwaysAccept,
        }
    }

    /// `true` if the question should be forwarded to the model.
    ///
    /// The memory snapshot is part of the contract but neither strategy
    /// reads it. Empty keywords never match, so an empty list or an empty
    /// question refuses under the keyword strategy.
    pub fn is_valid(&self, question: &str, _memory: &SessionMemory) -> bool {
        match self {
            Self::Keyword { keywords } => keywords
                .iter()
                .any(|k| !k.is_empty() && question.contains(k.as_str())),
            Self::AlwaysAccept => true,
        }
    }
}
