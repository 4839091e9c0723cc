//! Epsilon-greedy slate selection over clamped z-scores.
//!
//! Scoring is deterministic: same statistics + config give the same ranking.
//! Randomness only enters through the per-slot explore/exploit coin and the
//! uniform exploration draw, both taken from a caller-supplied RNG.

use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::BanditConfig;
use crate::decision::{PickReason, SlateDecision, SlatePick};
use crate::error::Result;
use crate::stats::{clamp_symmetric, sanitize_rate, z_scores};
use crate::{Slate, WordStat};

/// Scoring row for one candidate word.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredWord {
    pub word: String,
    /// Pick rate as used for scoring (non-finite inputs become `0.0`).
    pub pick_rate: f64,
    /// Post rate as used for scoring (non-finite inputs become `0.0`).
    pub post_rate: f64,
    /// Carried through for diagnostics; not part of the score.
    pub sample_size: u64,
    /// Standardized pick rate, before clamping.
    pub pick_z: f64,
    /// Standardized post rate, before clamping.
    pub post_z: f64,
    /// `weight_pick_rate * clamp(pick_z) + weight_post_rate * clamp(post_z)`.
    pub score: f64,
    /// Position in the score ranking; `None` until ranked.
    pub rank: Option<usize>,
}

/// Collapse case-insensitive duplicates, keeping the first occurrence.
/// Blank words are not candidates.
fn dedup_by_key(stats: &[WordStat]) -> Vec<&WordStat> {
    let mut seen = HashSet::with_capacity(stats.len());
    stats
        .iter()
        .filter(|s| {
            let key = s.key();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

/// Score every candidate against the whole candidate population.
///
/// Rows come back in input order (after collapsing duplicate words).
/// Standardization is computed once over the full set; a metric with zero
/// variance contributes `0.0` for every word.
///
/// Fails when `cfg` does not validate.
pub fn score_words(stats: &[WordStat], cfg: &BanditConfig) -> Result<Vec<ScoredWord>> {
    cfg.validate()?;
    Ok(score_valid(stats, cfg))
}

/// Score and sort candidates, best first.
///
/// The sort is stable: equal scores keep their input order.
/// Fails when `cfg` does not validate.
pub fn rank_words(stats: &[WordStat], cfg: &BanditConfig) -> Result<Vec<ScoredWord>> {
    cfg.validate()?;
    Ok(rank_valid(stats, cfg))
}

fn score_valid(stats: &[WordStat], cfg: &BanditConfig) -> Vec<ScoredWord> {
    let unique = dedup_by_key(stats);
    let picks: Vec<f64> = unique.iter().map(|s| sanitize_rate(s.pick_rate)).collect();
    let posts: Vec<f64> = unique.iter().map(|s| sanitize_rate(s.post_rate)).collect();
    let pick_z = z_scores(&picks);
    let post_z = z_scores(&posts);

    unique
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let score = cfg.weight_pick_rate * clamp_symmetric(pick_z[i], cfg.z_score_clamp)
                + cfg.weight_post_rate * clamp_symmetric(post_z[i], cfg.z_score_clamp);
            ScoredWord {
                word: s.word.clone(),
                pick_rate: picks[i],
                post_rate: posts[i],
                sample_size: s.sample_size,
                pick_z: pick_z[i],
                post_z: post_z[i],
                score,
                rank: None,
            }
        })
        .collect()
}

fn rank_valid(stats: &[WordStat], cfg: &BanditConfig) -> Vec<ScoredWord> {
    let mut rows = score_valid(stats, cfg);
    // A validated config keeps scores finite. `partial_cmp` keeps `-0.0` and `0.0` tied.
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    for (i, r) in rows.iter_mut().enumerate() {
        r.rank = Some(i);
    }
    rows
}

/// Select up to `slate_size` distinct words.
///
/// Each slot independently explores with probability `cfg.exploration_rate`
/// (uniform draw over the words not yet chosen) and otherwise exploits (the
/// best-ranked word not yet chosen). The slate length is always
/// `min(slate_size, distinct candidates)`; an empty candidate set gives an
/// empty slate.
///
/// Fails only when `cfg` does not validate.
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use sketchslate::{select_slate, BanditConfig, WordStat};
///
/// let stats = vec![
///     WordStat::with_rates("cat", 0.5, 0.3),
///     WordStat::with_rates("dog", 0.9, 0.7),
///     WordStat::with_rates("tree", 0.1, 0.1),
/// ];
/// let cfg = BanditConfig::default().with_exploration_rate(0.0);
/// let mut rng = StdRng::seed_from_u64(0);
///
/// let slate = select_slate(&stats, &cfg, 2, &mut rng).unwrap();
/// assert_eq!(slate, vec!["dog".to_string(), "cat".to_string()]);
/// ```
pub fn select_slate<R>(
    stats: &[WordStat],
    cfg: &BanditConfig,
    slate_size: usize,
    rng: &mut R,
) -> Result<Slate>
where
    R: Rng + ?Sized,
{
    Ok(select_slate_explain(stats, cfg, slate_size, rng)?.into_words())
}

/// Like [`select_slate`], but also reports how each slot was filled and the
/// ranking it was drawn from.
pub fn select_slate_explain<R>(
    stats: &[WordStat],
    cfg: &BanditConfig,
    slate_size: usize,
    rng: &mut R,
) -> Result<SlateDecision>
where
    R: Rng + ?Sized,
{
    cfg.validate()?;

    let ranked = rank_valid(stats, cfg);
    let take = slate_size.min(ranked.len());

    // Indices into `ranked`, kept in rank order so the front is the exploit pick.
    let mut remaining: Vec<usize> = (0..ranked.len()).collect();
    let mut picks = Vec::with_capacity(take);
    for _ in 0..take {
        let explore = cfg.exploration_rate > 0.0 && rng.random_bool(cfg.exploration_rate);
        let (slot, reason) = if explore {
            (rng.random_range(0..remaining.len()), PickReason::Explore)
        } else {
            (0, PickReason::Exploit)
        };
        let idx = remaining.remove(slot);
        let row = &ranked[idx];
        picks.push(SlatePick {
            word: row.word.clone(),
            rank: idx,
            score: row.score,
            reason,
        });
    }

    let decision = SlateDecision {
        picks,
        ranked,
        config: *cfg,
    };
    tracing::debug!(
        candidates = decision.ranked.len(),
        slate_size,
        selected = decision.len(),
        explored = decision.explored(),
        "selected slate"
    );
    Ok(decision)
}
