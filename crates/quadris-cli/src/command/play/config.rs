use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use quadris_engine::{EngineConfig, PieceSeed};
use serde::{Deserialize, Serialize};

use crate::util;

/// Settings for a terminal game, as read from a `--config` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayConfig {
    pub(crate) engine: EngineConfig,
    /// Ticks (and frames) per second.
    pub(crate) fps: u32,
    /// Piece seed; a random one is chosen when absent.
    pub(crate) seed: Option<PieceSeed>,
    /// Draw the drop preview.
    pub(crate) show_ghost: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            fps: 60,
            seed: None,
            show_ghost: true,
        }
    }
}

impl PlayConfig {
    pub(crate) const MAX_FPS: u32 = 240;

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        self.engine
            .validate()
            .context("invalid engine configuration")?;
        ensure!(
            (1..=Self::MAX_FPS).contains(&self.fps),
            "fps must be between 1 and {}, got {}",
            Self::MAX_FPS,
            self.fps
        );
        Ok(())
    }
}

/// Command-line options that build a [`PlayConfig`].
///
/// Flags override the values read from `--config`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Path to a JSON play configuration file
    #[clap(long)]
    config: Option<PathBuf>,
    /// Ticks per second
    #[clap(long)]
    fps: Option<u32>,
    /// Piece seed as 32 hex digits, for a reproducible game
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Number of grid columns
    #[clap(long)]
    columns: Option<usize>,
    /// Number of grid rows
    #[clap(long)]
    rows: Option<usize>,
    /// Do not draw the drop preview
    #[clap(long)]
    no_ghost: bool,
}

impl ConfigArgs {
    /// Reads the configuration file, if any, applies the flags, and validates the result.
    pub(crate) fn resolve(&self) -> anyhow::Result<PlayConfig> {
        let base = match &self.config {
            Some(path) => util::read_json_file(path)?,
            None => PlayConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, mut config: PlayConfig) -> PlayConfig {
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(columns) = self.columns {
            config.engine.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.engine.rows = rows;
        }
        if self.no_ghost {
            config.show_ghost = false;
        }
        config
    }
}
