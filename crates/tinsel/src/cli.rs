//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tinsel_config::Config;
use tinsel_core::{SceneKind, Theme};

/// Animated celebration scenes in your terminal.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Args {
    /// Scene to start with.
    #[arg(long, value_enum)]
    pub scene: Option<SceneArg>,

    /// Theme to start with.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Seed for the random scene layout.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the photos.
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Write the effective config to the config path and exit.
    #[arg(long)]
    pub write_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneArg {
    Drift,
    Orbit,
}

impl From<SceneArg> for SceneKind {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Drift => SceneKind::Drift,
            SceneArg::Orbit => SceneKind::Orbit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

impl Args {
    /// Override config values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(scene) = self.scene {
            config.scene = scene.into();
        }
        if let Some(theme) = self.theme {
            config.theme = theme.into();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(dir) = &self.assets {
            config.photos.directory = dir.clone();
        }
    }
}
