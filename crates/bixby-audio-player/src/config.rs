//! Configuration loading and pipeline assembly.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::audio_player::AudioPlayerPlugin;
use crate::pipeline::Pipeline;

/// Top-level pipeline configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfig {
    /// Audio player plugin settings.
    pub audio_player: Option<AudioPlayerConfig>,
}

/// `[audio_player]` section.
#[derive(Debug, Default, Deserialize)]
pub struct AudioPlayerConfig {
    /// Install the audio player plugin (default: true).
    pub enabled: Option<bool>,
}

impl PipelineConfig {
    /// Load configuration from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        Self::parse(&raw).with_context(|| format!("parse config {:?}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str::<PipelineConfig>(raw)?)
    }
}

/// Whether the audio player plugin should be installed.
pub fn audio_player_enabled_from_config(cfg: &PipelineConfig) -> bool {
    cfg.audio_player
        .as_ref()
        .and_then(|section| section.enabled)
        .unwrap_or(true)
}

/// Build a pipeline with the plugins enabled in `cfg`.
pub fn build_pipeline(cfg: &PipelineConfig) -> Pipeline {
    let mut pipeline = Pipeline::new();
    if audio_player_enabled_from_config(cfg) {
        pipeline.install(&AudioPlayerPlugin::new());
    } else {
        tracing::info!("audio player plugin disabled by config");
    }
    pipeline
}
