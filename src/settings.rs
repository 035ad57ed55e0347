use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

use crate::log_warn;

const ENABLE_LOGS: bool = true;

pub const DATA_DIR_ENV: &str = "SHUNYA_DATA_DIR";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSettings {
    pub enabled: bool,
    pub base_frequency: f32,
    /// Right ear plays `base_frequency + beat_frequency`. 7 Hz sits in the theta band.
    pub beat_frequency: f32,
    pub volume: f32,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_frequency: 110.0,
            beat_frequency: 7.0,
            volume: 0.15,
            fade_in_ms: 3_000,
            fade_out_ms: 2_000,
        }
    }
}

impl AudioSettings {
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub tick_interval_ms: u64,
    pub return_to_menu_secs: u64,
    pub heartbeat_every_ticks: u32,
    pub vertex_count: usize,
    pub audio: AudioSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Json,
            tick_interval_ms: 1_000,
            return_to_menu_secs: 5,
            heartbeat_every_ticks: 10,
            vertex_count: 12,
            audio: AudioSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn return_to_menu_delay(&self) -> Duration {
        Duration::from_secs(self.return_to_menu_secs)
    }
}

/// `--data-dir`, then `SHUNYA_DATA_DIR`, then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("shunya"))
        .ok_or_else(|| anyhow!("no data directory available; pass --data-dir"))
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<AppConfig>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring malformed settings {}: {}", path.display(), err);
                AppConfig::default()
            })
        } else {
            AppConfig::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> AppConfig {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, config: AppConfig) -> Result<()> {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = config;
        self.persist(&guard)
    }

    fn persist(&self, data: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
