//! Pairwise (Elo) rating updates for head-to-head tournament results.
//!
//! Logistic model with a 400-point scale. The two deltas are rounded
//! independently, so they need not cancel: at equal ratings they can differ
//! by one point, and the gap grows as ratings diverge. Callers must not
//! derive one delta from the other.

use crate::config::KFactor;
use crate::stats::round_half_up;

/// Rating points per factor-of-ten change in odds.
pub const ELO_SCALE: f64 = 400.0;

/// Signed rating deltas for one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EloResult {
    pub winner_change: i64,
    pub loser_change: i64,
}

impl EloResult {
    /// Ratings after applying the deltas, `(winner, loser)`.
    pub fn apply(&self, winner_rating: f64, loser_rating: f64) -> (f64, f64) {
        (
            winner_rating + self.winner_change as f64,
            loser_rating + self.loser_change as f64,
        )
    }

    /// `winner_change + loser_change`; nonzero when rounding drifted.
    pub fn net(&self) -> i64 {
        self.winner_change + self.loser_change
    }
}

/// Probability that a player rated `rating` beats one rated `opponent`.
///
/// Strictly inside `(0, 1)` for any finite pair whose gap is not extreme
/// enough to saturate `f64`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / ELO_SCALE))
}

/// Rating deltas for `winner_rating` beating `loser_rating`.
///
/// `winner_change = round(k * (1 - E_w))`, `loser_change = round(k * (0 - E_l))`
/// with `E_l = 1 - E_w`; halves round toward positive infinity. Negative
/// ratings are not special-cased.
///
/// # Example
///
/// ```rust
/// use sketchslate::{calculate_rating_change, KFactor};
///
/// let k = KFactor::new(32.0).unwrap();
/// let even = calculate_rating_change(1200.0, 1200.0, k);
/// assert_eq!((even.winner_change, even.loser_change), (16, -16));
///
/// let upset = calculate_rating_change(1000.0, 1400.0, k);
/// let expected = calculate_rating_change(1400.0, 1000.0, k);
/// assert!(upset.winner_change > expected.winner_change);
/// ```
pub fn calculate_rating_change(winner_rating: f64, loser_rating: f64, k: KFactor) -> EloResult {
    let k = k.get();
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = 1.0 - expected_winner;
    EloResult {
        winner_change: round_half_up(k * (1.0 - expected_winner)),
        loser_change: round_half_up(k * (0.0 - expected_loser)),
    }
}
