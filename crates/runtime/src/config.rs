//! Runtime configuration structures and loaders.
use std::env;
use std::time::Duration;

use stattrak_core::StatLedger;

use crate::error::{Result, RuntimeError};

/// Display names of the tracked statistics.
///
/// Names are matched as substrings of lore lines, so each must not occur in
/// unrelated lore or in another statistic's name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatNames {
    pub kills: String,
    pub blocks_mined: String,
    pub damage_taken: String,
}

impl StatNames {
    pub const DEFAULT_KILLS: &'static str = "StatTrak™ Kills";
    pub const DEFAULT_BLOCKS_MINED: &'static str = "StatTrak™ Blocks Mined";
    pub const DEFAULT_DAMAGE_TAKEN: &'static str = "StatTrak™ Damage Taken";
}

impl Default for StatNames {
    fn default() -> Self {
        Self {
            kills: Self::DEFAULT_KILLS.to_owned(),
            blocks_mined: Self::DEFAULT_BLOCKS_MINED.to_owned(),
            damage_taken: Self::DEFAULT_DAMAGE_TAKEN.to_owned(),
        }
    }
}

/// Router configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// How long a claimed occurrence key stays in the dedup window.
    pub release_delay: Duration,
    /// Prefix written before every statistic line.
    pub lore_marker: String,
    pub names: StatNames,
}

impl RuntimeConfig {
    /// One host scheduler tick.
    pub const DEFAULT_RELEASE_DELAY_MS: u64 = 50;

    pub const ENV_RELEASE_DELAY_MS: &'static str = "STATTRAK_RELEASE_DELAY_MS";
    pub const ENV_LORE_MARKER: &'static str = "STATTRAK_LORE_MARKER";
    pub const ENV_KILLS_NAME: &'static str = "STATTRAK_KILLS_NAME";
    pub const ENV_BLOCKS_MINED_NAME: &'static str = "STATTRAK_BLOCKS_MINED_NAME";
    pub const ENV_DAMAGE_TAKEN_NAME: &'static str = "STATTRAK_DAMAGE_TAKEN_NAME";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STATTRAK_RELEASE_DELAY_MS` - Dedup window release delay (default: 50)
    /// - `STATTRAK_LORE_MARKER` - Prefix of statistic lines (default: `§d`)
    /// - `STATTRAK_KILLS_NAME` - Kills statistic name
    /// - `STATTRAK_BLOCKS_MINED_NAME` - Blocks mined statistic name
    /// - `STATTRAK_DAMAGE_TAKEN_NAME` - Damage taken statistic name
    ///
    /// Unparsable values are ignored and the default kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but rejects unparsable values.
    pub fn from_env_strict() -> Result<Self> {
        Self::from_lookup_strict(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup, ignoring bad values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(delay) = lookup(Self::ENV_RELEASE_DELAY_MS).and_then(|v| v.parse().ok()) {
            config.release_delay = Duration::from_millis(delay);
        }
        config.apply_strings(&lookup);

        config
    }

    /// Builds configuration from an arbitrary key lookup, failing on bad values.
    pub fn from_lookup_strict(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::ENV_RELEASE_DELAY_MS) {
            let delay = value
                .trim()
                .parse::<u64>()
                .map_err(|_| RuntimeError::InvalidConfig {
                    key: Self::ENV_RELEASE_DELAY_MS,
                    value: value.clone(),
                })?;
            config.release_delay = Duration::from_millis(delay);
        }

        for key in [
            Self::ENV_LORE_MARKER,
            Self::ENV_KILLS_NAME,
            Self::ENV_BLOCKS_MINED_NAME,
            Self::ENV_DAMAGE_TAKEN_NAME,
        ] {
            if let Some(value) = lookup(key)
                && value.trim().is_empty()
            {
                return Err(RuntimeError::InvalidConfig { key, value });
            }
        }
        config.apply_strings(&lookup);

        Ok(config)
    }

    /// Ledger writing lines with the configured marker.
    pub fn ledger(&self) -> StatLedger {
        StatLedger::new(self.lore_marker.clone())
    }

    fn apply_strings(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(marker) = read(Self::ENV_LORE_MARKER) {
            self.lore_marker = marker;
        }
        if let Some(name) = read(Self::ENV_KILLS_NAME) {
            self.names.kills = name;
        }
        if let Some(name) = read(Self::ENV_BLOCKS_MINED_NAME) {
            self.names.blocks_mined = name;
        }
        if let Some(name) = read(Self::ENV_DAMAGE_TAKEN_NAME) {
            self.names.damage_taken = name;
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            release_delay: Duration::from_millis(Self::DEFAULT_RELEASE_DELAY_MS),
            lore_marker: StatLedger::DEFAULT_MARKER.to_owned(),
            names: StatNames::default(),
        }
    }
}
