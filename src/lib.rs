//! `sketchslate`: prompt-slate selection and pairwise rating updates for a
//! community drawing game.
//!
//! Two small, pure engines:
//!
//! - **Slate selection** ([`select_slate`] / [`select_slate_explain`]): turns
//!   per-word pick/post rates into a short list of candidate prompts.
//!   Rates are standardized across the candidate population, clamped, and
//!   combined with configurable weights; each slot then either takes the best
//!   remaining word or, with probability `exploration_rate`, a uniform draw
//!   from the rest.
//! - **Rating updates** ([`calculate_rating_change`]): Elo deltas for a
//!   head-to-head result, rounded independently per side.
//!
//! **Goals:**
//! - **Deterministic under test**: randomness is always injected; same stats +
//!   config + seeded RNG give the same slate.
//! - **No ambient state**: configuration is passed into every call. Runtime
//!   tunability lives in a [`ConfigProvider`], never in the core functions.
//! - **Snapshot inputs**: the core consumes a fully materialized
//!   `&[WordStat]`; pagination belongs to the [`WordStatStore`].
//!
//! **Non-goals:**
//! - Matchmaking (who plays whom).
//! - Storage schema design. [`MemoryStore`] is a reference collaborator with
//!   the replace/snapshot semantics the core relies on, not a database.
//!
//! # Quick start
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use sketchslate::{
//!     calculate_rating_change, select_slate, ConfigProvider, MemoryStore, SharedConfig,
//!     WordStatStore,
//! };
//!
//! let store = MemoryStore::from_words(["cat", "dog", "tree"]);
//! let provider = SharedConfig::default();
//!
//! // One config snapshot per call.
//! let cfg = provider.bandit_config();
//! let mut rng = StdRng::seed_from_u64(7);
//! let slate = select_slate(&store.word_stats(), &cfg, 2, &mut rng).unwrap();
//! assert_eq!(slate.len(), 2);
//!
//! let delta = calculate_rating_change(1210.0, 1190.0, provider.k_factor());
//! assert!(delta.winner_change > 0 && delta.loser_change < 0);
//! ```

mod bandit;
pub use bandit::*;

mod config;
pub use config::*;

mod decision;
pub use decision::*;

mod elo;
pub use elo::*;

mod error;
pub use error::{ConfigError, Error, Result};

mod provider;
pub use provider::*;

mod stats;
pub use stats::{clamp_symmetric, mean, population_std_dev, round_half_up, z_scores};

mod store;
pub use store::*;

/// An ordered list of selected words, best slot first. Never contains duplicates.
pub type Slate = Vec<String>;

/// Performance statistics for one dictionary word.
///
/// Rates are stored as given; clamping happens only in the scoring stage.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordStat {
    /// The word as displayed. Identity is case-insensitive (see [`WordStat::key`]).
    pub word: String,
    /// Historical rate at which the word, when offered, was chosen.
    pub pick_rate: f64,
    /// Historical rate at which a drawing of the word was published.
    pub post_rate: f64,
    /// Number of times the word has been offered.
    ///
    /// Not consumed by scoring.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sample_size: u64,
}

impl WordStat {
    /// A word with fresh (all-zero) statistics.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    /// A word with the given rates and no sample count.
    pub fn with_rates(word: impl Into<String>, pick_rate: f64, post_rate: f64) -> Self {
        Self {
            word: word.into(),
            pick_rate,
            post_rate,
            sample_size: 0,
        }
    }

    /// Case-insensitive identity key.
    pub fn key(&self) -> String {
        word_key(&self.word)
    }
}

pub(crate) fn word_key(word: &str) -> String {
    word.trim().to_lowercase()
}
