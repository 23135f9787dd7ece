use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use twenty48_engine::engine::Direction;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// RNG seed; a random one is drawn (and logged) when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset, e.g. "info", "twenty48_engine=trace".
    #[serde(default = "defaults::log")]
    pub log: String,

    #[serde(default)]
    pub display: Display,

    /// Extra key bindings, checked before the built-in key names:
    /// `[keys]` then `k = "Up"`.
    #[serde(default)]
    pub keys: HashMap<String, Direction>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Display {
    #[serde(default = "defaults::show_score")]
    pub show_score: bool,
    /// Print the grid again after input that did not change it.
    #[serde(default)]
    pub redraw_unchanged: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            log: defaults::log(),
            display: Display::default(),
            keys: HashMap::new(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self { show_score: defaults::show_score(), redraw_unchanged: false }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn log() -> String { "info".to_string() }
    pub fn show_score() -> bool { true }
}
