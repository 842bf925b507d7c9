//! Game configuration.
//!
//! Defaults are compiled in; an optional INI file overrides any subset of
//! them:
//!
//! ```ini
//! [level]
//! chickens = 5
//! small_chickens = 4
//! coins = 10
//! bottles = 15
//! clouds = 6
//! end_x = 8000
//!
//! [display]
//! target_fps = 30
//!
//! [audio]
//! muted = false
//! ```
//!
//! A missing file is not an error.  A present key with an unparsable or
//! out-of-range value is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use configparser::ini::Ini;
use log::info;

use crate::error::ConfigError;
use crate::level::LevelSpec;

pub const DEFAULT_CONFIG_PATH: &str = "pollo_loco.ini";
pub const DEFAULT_TARGET_FPS: u32 = 30;
pub const MAX_TARGET_FPS: u64 = 240;
/// Upper bound on every `[level]` count.
pub const MAX_COUNT: u64 = 1_000;
/// Furthest level end the background can be tiled to.
pub const MAX_END_X: f64 = 100_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub level: LevelSpec,
    pub target_fps: u32,
    pub muted: bool,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            level: LevelSpec::default(),
            target_fps: DEFAULT_TARGET_FPS,
            muted: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load `config_path` over the current values.  Keys absent from the
    /// file keep their current value.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        if !self.config_path.exists() {
            info!("no config at {:?}, using defaults", self.config_path);
            return Ok(());
        }
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|reason| ConfigError::Read {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&ini)?;
        info!("loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Same as [`load_from_file`](Self::load_from_file) for INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(|reason| ConfigError::Read {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [level]
        if let Some(n) = get_count(ini, "level", "chickens")? {
            self.level.chickens = n;
        }
        if let Some(n) = get_count(ini, "level", "small_chickens")? {
            self.level.small_chickens = n;
        }
        if let Some(n) = get_count(ini, "level", "coins")? {
            self.level.coins = n;
        }
        if let Some(n) = get_count(ini, "level", "bottles")? {
            self.level.bottles = n;
        }
        if let Some(n) = get_count(ini, "level", "clouds")? {
            self.level.clouds = n;
        }
        if let Some(end_x) = ini
            .getfloat("level", "end_x")
            .map_err(parse_error("level", "end_x"))?
        {
            if !end_x.is_finite() || end_x <= 0.0 || end_x > MAX_END_X {
                return Err(invalid("level", "end_x", end_x));
            }
            self.level.end_x = end_x;
        }

        // [display]
        if let Some(fps) = ini
            .getuint("display", "target_fps")
            .map_err(parse_error("display", "target_fps"))?
        {
            if fps == 0 || fps > MAX_TARGET_FPS {
                return Err(invalid("display", "target_fps", fps));
            }
            self.target_fps = fps as u32;
        }

        // [audio]
        if let Some(muted) = ini.getbool("audio", "muted").map_err(parse_error("audio", "muted"))? {
            self.muted = muted;
        }

        info!(
            "config: {} chickens, {} small chickens, {} coins, {} bottles, \
             end_x={}, fps={}, muted={}",
            self.level.chickens,
            self.level.small_chickens,
            self.level.coins,
            self.level.bottles,
            self.level.end_x,
            self.target_fps,
            self.muted
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.target_fps.max(1)))
    }
}

fn get_count(ini: &Ini, section: &str, key: &str) -> Result<Option<usize>, ConfigError> {
    match ini.getuint(section, key).map_err(parse_error(section, key))? {
        Some(n) if n > MAX_COUNT => Err(invalid(section, key, n)),
        value => Ok(value.map(|n| n as usize)),
    }
}

fn parse_error<'a>(section: &'a str, key: &'a str) -> impl Fn(String) -> ConfigError + 'a {
    move |reason| ConfigError::Parse {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn invalid(section: &str, key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}
