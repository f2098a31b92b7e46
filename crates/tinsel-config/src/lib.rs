//! Configuration file handling for tinsel.
//!
//! The config lives at `<config_dir>/tinsel/config.toml`. Every field has a
//! default, so a missing file (or a file that sets only a few keys) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tinsel_core::{Rgb, SceneKind, Theme};

/// Name of the config file inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Placeholder replaced by the 1-based photo number in patterns and messages.
const NUMBER_PLACEHOLDER: &str = "{n}";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: SceneKind,
    /// Theme used at startup.
    pub theme: Theme,
    /// Fixed RNG seed; random per run when absent.
    pub seed: Option<u64>,
    /// Target frames per second.
    pub frame_rate: u32,
    /// How long a photo message stays visible.
    pub message_duration_ms: u64,
    /// Scene pixels covered by one terminal cell.
    pub cell: CellSize,
    pub drift: DriftConfig,
    pub orbit: OrbitConfig,
    pub caption: CaptionConfig,
    pub photos: PhotoConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            theme: Theme::default(),
            seed: None,
            frame_rate: 60,
            message_duration_ms: 4000,
            cell: CellSize::default(),
            drift: DriftConfig::default(),
            orbit: OrbitConfig::default(),
            caption: CaptionConfig::default(),
            photos: PhotoConfig::default(),
        }
    }
}

/// Size of one terminal cell in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

/// Settings for the rising-particle scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Number of floating particles.
    pub particles: usize,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self { particles: 160 }
    }
}

/// Settings for the 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Number of twinkling background stars.
    pub stars: usize,
    /// Number of sprite slots, each becoming a photo with `photo_chance`.
    pub sprite_slots: usize,
    /// Probability that a sprite slot holds a photo.
    pub photo_chance: f64,
    /// Number of caption sprites.
    pub captions: usize,
    /// Distance from the eye to the projection plane.
    pub center_z: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            stars: 150,
            sprite_slots: 50,
            photo_chance: 0.6,
            captions: 25,
            center_z: 1000.0,
        }
    }
}

/// Caption text shown by the 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Caption text; `\n` separates lines.
    pub text: String,
    /// Colours picked at random per caption.
    pub colors: Vec<Rgb>,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            text: "Thành công nhé!\n♥ 2025 ♥".to_string(),
            // hotpink, deepskyblue
            colors: vec![Rgb(255, 105, 180), Rgb(0, 191, 255)],
        }
    }
}

/// Photo assets and their messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Directory the photo files are resolved against.
    pub directory: PathBuf,
    /// File name pattern with a `{n}` placeholder.
    pub pattern: String,
    /// Number of photos generated from the pattern.
    pub count: usize,
    /// Message template for the drift scene.
    pub drift_message: String,
    /// Message template for the orbit scene.
    pub orbit_message: String,
    /// Explicit photo list; overrides `pattern` and `count` when non-empty.
    pub list: Vec<PhotoEntry>,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("image"),
            pattern: "ban{n}.jpg".to_string(),
            count: 19,
            drift_message: "Chúc mừng bạn {n}! Mong bạn luôn thành công và hạnh phúc!".to_string(),
            orbit_message: "Bạn {n} - Chúc bạn luôn hạnh phúc!".to_string(),
            list: Vec::new(),
        }
    }
}

/// One photo file with the message shown when it is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub file: PathBuf,
    pub message: String,
}

impl PhotoConfig {
    /// Resolve the photo list for a scene.
    ///
    /// Relative file names are joined onto `directory`.
    pub fn entries(&self, scene: SceneKind) -> Vec<PhotoEntry> {
        let resolve = |file: &Path| {
            if file.is_absolute() {
                file.to_path_buf()
            } else {
                self.directory.join(file)
            }
        };

        if !self.list.is_empty() {
            return self
                .list
                .iter()
                .map(|entry| PhotoEntry {
                    file: resolve(&entry.file),
                    message: entry.message.clone(),
                })
                .collect();
        }

        let template = match scene {
            SceneKind::Drift => &self.drift_message,
            SceneKind::Orbit => &self.orbit_message,
        };

        (1..=self.count)
            .map(|n| {
                let number = n.to_string();
                let file = self.pattern.replace(NUMBER_PLACEHOLDER, &number);
                PhotoEntry {
                    file: resolve(Path::new(&file)),
                    message: template.replace(NUMBER_PLACEHOLDER, &number),
                }
            })
            .collect()
    }
}

impl Config {
    /// Default config file path for this platform, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config from `path`, or from [`Config::default_path`].
    ///
    /// A missing file yields the defaults. A malformed file is an error.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => {
                    log::warn!("no config directory available, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            log::info!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(contents: &str) -> color_eyre::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)
            .wrap_err_with(|| format!("failed to write config file {}", path.display()))?;
        log::info!("wrote config to {}", path.display());
        Ok(())
    }

    /// Reject values the scenes cannot work with.
    pub fn validate(&self) -> color_eyre::Result<()> {
        if self.frame_rate == 0 {
            bail!("frame_rate must be at least 1");
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.cell.width) || !positive(self.cell.height) {
            bail!("cell width and height must be positive and finite");
        }
        if !(0.0..=1.0).contains(&self.orbit.photo_chance) {
            bail!("orbit.photo_chance must be within 0.0..=1.0");
        }
        if !positive(self.orbit.center_z) {
            bail!("orbit.center_z must be positive and finite");
        }
        if self.caption.colors.is_empty() {
            bail!("caption.colors must name at least one colour");
        }
        Ok(())
    }
}

/// Directory for the log file, if one can be determined.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tinsel")
}
