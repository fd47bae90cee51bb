use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ahorro_core::time::DEFAULT_TIMEZONE;
use ahorro_refresh::BankSources;
use ahorro_refresh::proxy::{DEFAULT_RELAYS, DEFAULT_TIMEOUT};
use ahorro_refresh::pipeline::{BERSA_URL, BNA_URL};

use crate::state::ensure_ahorro_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeSection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSection {
    /// Relay prefixes, tried in order. The escaped page URL is appended.
    pub relays: Vec<String>,
    pub timeout_secs: u64,
    pub bna_url: String,
    pub bersa_url: String,
    /// IANA zone used for "today" (lastUpdated, --today).
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSection {
    /// Directory for the stored catalog (default: ~/.appahorro)
    pub data_dir: Option<PathBuf>,
}

impl Default for ScrapeSection {
    fn default() -> Self {
        Self {
            relays: DEFAULT_RELAYS.iter().map(|r| r.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            bna_url: BNA_URL.to_string(),
            bersa_url: BERSA_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl ScrapeSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sources(&self) -> BankSources {
        BankSources {
            bna_url: self.bna_url.clone(),
            bersa_url: self.bersa_url.clone(),
        }
    }
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => ensure_ahorro_home(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_ahorro_home()?.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
