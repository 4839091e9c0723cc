//! Error types.
//!
//! The core only ever fails on bad configuration. An empty candidate set is
//! not an error (it yields an empty slate). `UnknownWord` is raised by the
//! in-crate store, never by the selection or rating functions.

use thiserror::Error;

/// Rejected `BanditConfig` / K-factor values.
///
/// Missing-field variants come from partially-filled updates
/// ([`crate::BanditConfigUpdate`]); out-of-range variants carry the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("exploration_rate is required")]
    MissingExplorationRate,

    #[error("z_score_clamp is required")]
    MissingZScoreClamp,

    #[error("weight_pick_rate is required")]
    MissingWeightPickRate,

    #[error("weight_post_rate is required")]
    MissingWeightPostRate,

    #[error("exploration_rate must be a finite number in [0, 1], got {0}")]
    ExplorationRateOutOfRange(f64),

    #[error("z_score_clamp must be a finite number > 0, got {0}")]
    ZScoreClampOutOfRange(f64),

    #[error("weight_pick_rate must be a finite number >= 0, got {0}")]
    WeightPickRateOutOfRange(f64),

    #[error("weight_post_rate must be a finite number >= 0, got {0}")]
    WeightPostRateOutOfRange(f64),

    #[error("k_factor must be a finite number > 0, got {0}")]
    InvalidKFactor(f64),
}

impl ConfigError {
    /// Name of the offending configuration field.
    ///
    /// Admin surfaces key their own user-facing copy off this.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingExplorationRate | Self::ExplorationRateOutOfRange(_) => "exploration_rate",
            Self::MissingZScoreClamp | Self::ZScoreClampOutOfRange(_) => "z_score_clamp",
            Self::MissingWeightPickRate | Self::WeightPickRateOutOfRange(_) => "weight_pick_rate",
            Self::MissingWeightPostRate | Self::WeightPostRateOutOfRange(_) => "weight_post_rate",
            Self::InvalidKFactor(_) => "k_factor",
        }
    }

    /// Whether the field was absent (as opposed to present but out of range).
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::MissingExplorationRate
                | Self::MissingZScoreClamp
                | Self::MissingWeightPickRate
                | Self::MissingWeightPostRate
        )
    }
}

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Configuration passed to the core (or offered to a provider) is malformed.
    #[error("configuration invalid: {0}")]
    Config(#[from] ConfigError),

    /// A statistics update named a word that is not in the dictionary.
    #[error("word not in dictionary: {0}")]
    UnknownWord(String),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
