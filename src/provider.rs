//! Runtime-tunable configuration, validated before it can reach the core.
//!
//! Callers read one snapshot per call (`BanditConfig` and `KFactor` are
//! `Copy`) and pass it in explicitly. A rejected update leaves the previous
//! value in effect.

use std::sync::{PoisonError, RwLock};

use crate::config::{BanditConfig, BanditConfigUpdate, KFactor};
use crate::error::ConfigError;

/// Source of the current selection and rating configuration.
pub trait ConfigProvider {
    /// Current bandit configuration (always valid).
    fn bandit_config(&self) -> BanditConfig;

    /// Validate and install a new bandit configuration.
    ///
    /// All four fields are required; the returned value is what was installed.
    fn set_bandit_config(&self, update: BanditConfigUpdate) -> Result<BanditConfig, ConfigError>;

    /// Current K-factor.
    fn k_factor(&self) -> KFactor;

    /// Validate and install a new K-factor.
    fn set_k_factor(&self, k: f64) -> Result<KFactor, ConfigError>;
}

#[derive(Debug, Clone, Copy, Default)]
struct Settings {
    bandit: BanditConfig,
    k_factor: KFactor,
}

/// Process-wide [`ConfigProvider`] backed by a lock.
///
/// Share it behind an `Arc` between the admin surface and the request paths.
#[derive(Debug, Default)]
pub struct SharedConfig {
    inner: RwLock<Settings>,
}

impl SharedConfig {
    /// Start from already-validated values.
    pub fn new(bandit: BanditConfig, k_factor: KFactor) -> Result<Self, ConfigError> {
        bandit.validate()?;
        Ok(Self {
            inner: RwLock::new(Settings { bandit, k_factor }),
        })
    }

    fn read(&self) -> Settings {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigProvider for SharedConfig {
    fn bandit_config(&self) -> BanditConfig {
        self.read().bandit
    }

    fn set_bandit_config(&self, update: BanditConfigUpdate) -> Result<BanditConfig, ConfigError> {
        let cfg = update.validate().inspect_err(|e| {
            tracing::warn!(field = e.field(), error = %e, "rejected bandit config update");
        })?;
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .bandit = cfg;
        tracing::info!(
            exploration_rate = cfg.exploration_rate,
            z_score_clamp = cfg.z_score_clamp,
            weight_pick_rate = cfg.weight_pick_rate,
            weight_post_rate = cfg.weight_post_rate,
            "bandit config updated"
        );
        Ok(cfg)
    }

    fn k_factor(&self) -> KFactor {
        self.read().k_factor
    }

    fn set_k_factor(&self, k: f64) -> Result<KFactor, ConfigError> {
        let k = KFactor::new(k).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected k-factor update");
        })?;
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .k_factor = k;
        tracing::info!(k_factor = k.get(), "k-factor updated");
        Ok(k)
    }
}
