use anyhow::{Context, Result};
use serde::Deserialize;

/// Animator settings, usually part of a renderer's TOML configuration.
///
/// ```toml
/// clock = "virtual"
/// animation-duration = 3000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AnimatorConfig {
    pub clock: ClockKind,
    /// Document level animation duration in milliseconds.
    pub animation_duration: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Real time, for interactive rendering.
    #[default]
    Wall,
    /// Time only moves when advanced, for still frames and exports.
    Virtual,
}

impl AnimatorConfig {
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Failed to parse animator configuration")
    }
}
