//! Runtime-tunable parameters for slate selection and rating updates.
//!
//! Both are plain values passed into every call. Validation happens at the
//! boundary ([`BanditConfigUpdate::validate`], [`KFactor::new`]) and again,
//! defensively, on entry to the selection functions.

use crate::error::ConfigError;

/// Configuration knobs for slate selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BanditConfigUpdate"))]
pub struct BanditConfig {
    /// Per-slot probability of drawing uniformly from the unselected remainder.
    ///
    /// Must be in `[0, 1]`. `0.0` is pure exploitation.
    pub exploration_rate: f64,
    /// Symmetric bound applied to standardized rates before weighting (must be > 0).
    pub z_score_clamp: f64,
    /// Weight on the clamped pick-rate z-score (must be >= 0).
    pub weight_pick_rate: f64,
    /// Weight on the clamped post-rate z-score (must be >= 0).
    pub weight_post_rate: f64,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            exploration_rate: 0.1,
            z_score_clamp: 3.0,
            weight_pick_rate: 1.0,
            weight_post_rate: 1.0,
        }
    }
}

impl BanditConfig {
    /// Check every field against its allowed range.
    ///
    /// Non-finite values are rejected for every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.exploration_rate;
        if !(r.is_finite() && (0.0..=1.0).contains(&r)) {
            return Err(ConfigError::ExplorationRateOutOfRange(r));
        }
        let c = self.z_score_clamp;
        if !(c.is_finite() && c > 0.0) {
            return Err(ConfigError::ZScoreClampOutOfRange(c));
        }
        let w = self.weight_pick_rate;
        if !(w.is_finite() && w >= 0.0) {
            return Err(ConfigError::WeightPickRateOutOfRange(w));
        }
        let w = self.weight_post_rate;
        if !(w.is_finite() && w >= 0.0) {
            return Err(ConfigError::WeightPostRateOutOfRange(w));
        }
        Ok(())
    }

    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate;
        self
    }

    pub fn with_z_score_clamp(mut self, clamp: f64) -> Self {
        self.z_score_clamp = clamp;
        self
    }

    pub fn with_weights(mut self, pick: f64, post: f64) -> Self {
        self.weight_pick_rate = pick;
        self.weight_post_rate = post;
        self
    }
}

/// A partially-filled `BanditConfig`, as submitted through an admin form.
///
/// Every field is optional so that a missing field can be reported as such
/// instead of silently defaulting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BanditConfigUpdate {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub exploration_rate: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub z_score_clamp: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub weight_pick_rate: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub weight_post_rate: Option<f64>,
}

impl BanditConfigUpdate {
    /// Require all four fields, then range-check them.
    ///
    /// Missing fields are reported before out-of-range ones, in declaration order.
    pub fn validate(self) -> Result<BanditConfig, ConfigError> {
        let cfg = BanditConfig {
            exploration_rate: self
                .exploration_rate
                .ok_or(ConfigError::MissingExplorationRate)?,
            z_score_clamp: self.z_score_clamp.ok_or(ConfigError::MissingZScoreClamp)?,
            weight_pick_rate: self
                .weight_pick_rate
                .ok_or(ConfigError::MissingWeightPickRate)?,
            weight_post_rate: self
                .weight_post_rate
                .ok_or(ConfigError::MissingWeightPostRate)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl From<BanditConfig> for BanditConfigUpdate {
    fn from(cfg: BanditConfig) -> Self {
        Self {
            exploration_rate: Some(cfg.exploration_rate),
            z_score_clamp: Some(cfg.z_score_clamp),
            weight_pick_rate: Some(cfg.weight_pick_rate),
            weight_post_rate: Some(cfg.weight_post_rate),
        }
    }
}

impl TryFrom<BanditConfigUpdate> for BanditConfig {
    type Error = ConfigError;

    fn try_from(update: BanditConfigUpdate) -> Result<Self, Self::Error> {
        update.validate()
    }
}

/// Default K-factor.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Maximum rating swing per match. Always finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct KFactor(f64);

impl KFactor {
    pub fn new(k: f64) -> Result<Self, ConfigError> {
        if k.is_finite() && k > 0.0 {
            Ok(Self(k))
        } else {
            Err(ConfigError::InvalidKFactor(k))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for KFactor {
    fn default() -> Self {
        Self(DEFAULT_K_FACTOR)
    }
}

impl TryFrom<f64> for KFactor {
    type Error = ConfigError;

    fn try_from(k: f64) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl From<KFactor> for f64 {
    fn from(k: KFactor) -> f64 {
        k.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> BanditConfigUpdate {
        BanditConfig::default().into()
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(BanditConfig::default().validate(), Ok(()));
    }

    #[test]
    fn each_missing_field_is_reported_distinctly() {
        let cases = [
            (
                BanditConfigUpdate { exploration_rate: None, ..full() },
                ConfigError::MissingExplorationRate,
            ),
            (
                BanditConfigUpdate { z_score_clamp: None, ..full() },
                ConfigError::MissingZScoreClamp,
            ),
            (
                BanditConfigUpdate { weight_pick_rate: None, ..full() },
                ConfigError::MissingWeightPickRate,
            ),
            (
                BanditConfigUpdate { weight_post_rate: None, ..full() },
                ConfigError::MissingWeightPostRate,
            ),
        ];
        for (update, want) in cases {
            assert_eq!(update.validate(), Err(want));
        }
    }

    #[test]
    fn each_out_of_range_field_is_reported_distinctly() {
        let base = BanditConfig::default();
        assert!(matches!(
            base.with_exploration_rate(1.5).validate(),
            Err(ConfigError::ExplorationRateOutOfRange(_))
        ));
        assert!(matches!(
            base.with_exploration_rate(-0.1).validate(),
            Err(ConfigError::ExplorationRateOutOfRange(_))
        ));
        assert!(matches!(
            base.with_z_score_clamp(0.0).validate(),
            Err(ConfigError::ZScoreClampOutOfRange(_))
        ));
        assert!(matches!(
            base.with_weights(-1.0, 1.0).validate(),
            Err(ConfigError::WeightPickRateOutOfRange(_))
        ));
        assert!(matches!(
            base.with_weights(1.0, -1.0).validate(),
            Err(ConfigError::WeightPostRateOutOfRange(_))
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let base = BanditConfig::default();
        assert!(base.with_exploration_rate(f64::NAN).validate().is_err());
        assert!(base.with_z_score_clamp(f64::INFINITY).validate().is_err());
        assert!(base.with_weights(f64::NAN, 1.0).validate().is_err());
        assert!(base.with_weights(1.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn range_endpoints_are_accepted() {
        let base = BanditConfig::default();
        assert!(base.with_exploration_rate(0.0).validate().is_ok());
        assert!(base.with_exploration_rate(1.0).validate().is_ok());
        assert!(base.with_weights(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn missing_fields_win_over_range_errors() {
        let update = BanditConfigUpdate {
            exploration_rate: Some(7.0),
            z_score_clamp: None,
            ..full()
        };
        assert_eq!(update.validate(), Err(ConfigError::MissingZScoreClamp));
    }

    #[test]
    fn k_factor_rejects_non_positive_and_non_finite() {
        assert!(KFactor::new(32.0).is_ok());
        assert_eq!(KFactor::new(0.0), Err(ConfigError::InvalidKFactor(0.0)));
        assert!(KFactor::new(-4.0).is_err());
        assert!(KFactor::new(f64::NAN).is_err());
        assert!(KFactor::new(f64::INFINITY).is_err());
        assert_eq!(KFactor::default().get(), DEFAULT_K_FACTOR);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_a_config_validates_it() {
        let ok: BanditConfig = serde_json::from_str(
            r#"{"exploration_rate":0.2,"z_score_clamp":2.5,"weight_pick_rate":1,"weight_post_rate":0.5}"#,
        )
        .unwrap();
        assert_eq!(ok.z_score_clamp, 2.5);

        let missing = serde_json::from_str::<BanditConfig>(
            r#"{"exploration_rate":0.2,"weight_pick_rate":1,"weight_post_rate":0.5}"#,
        );
        let msg = missing.unwrap_err().to_string();
        assert!(msg.contains("z_score_clamp is required"), "{msg}");

        let out_of_range = serde_json::from_str::<BanditConfig>(
            r#"{"exploration_rate":3,"z_score_clamp":2.5,"weight_pick_rate":1,"weight_post_rate":0.5}"#,
        );
        assert!(out_of_range.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn k_factor_serializes_as_a_bare_number() {
        let k = KFactor::new(24.0).unwrap();
        assert_eq!(serde_json::to_string(&k).unwrap(), "24.0");
        assert!(serde_json::from_str::<KFactor>("-1").is_err());
    }
}
