//! Audit record for one slate selection.
//!
//! Prompt-serving flows usually want more than the word list: they want to
//! know which slots were exploration draws (so those impressions can be
//! logged separately) and what ranking the exploitation slots came from.

use crate::bandit::ScoredWord;
use crate::config::BanditConfig;

/// How a slot in the slate was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickReason {
    /// Highest-ranked word not yet in the slate.
    Exploit,
    /// Uniform draw from the words not yet in the slate.
    Explore,
}

/// One slot of a slate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlatePick {
    pub word: String,
    /// Zero-based position of the word in the score ranking.
    pub rank: usize,
    pub score: f64,
    pub reason: PickReason,
}

/// A selected slate plus the context it was selected from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlateDecision {
    /// Selected slots, in slate order.
    pub picks: Vec<SlatePick>,
    /// Every candidate in rank order (best first).
    pub ranked: Vec<ScoredWord>,
    /// The config snapshot the slate was computed with.
    pub config: BanditConfig,
}

impl SlateDecision {
    /// The slate as a plain word list.
    pub fn words(&self) -> Vec<String> {
        self.picks.iter().map(|p| p.word.clone()).collect()
    }

    /// Consume the decision, keeping only the word list.
    pub fn into_words(self) -> Vec<String> {
        self.picks.into_iter().map(|p| p.word).collect()
    }

    /// Number of slots filled by exploration.
    pub fn explored(&self) -> usize {
        self.picks
            .iter()
            .filter(|p| p.reason == PickReason::Explore)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }
}
