use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use arcade_core::Difficulty;
use serde::Deserialize;

/// Records file used when neither the flags nor the config name one.
pub const DEFAULT_RECORDS: &str = "arcade-records.jsonl";

/// Optional settings file, every key may be left out.
///
/// ```toml
/// difficulty = "hard"
/// records = "/home/me/.arcade.jsonl"
/// seed = 42
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Option<Difficulty>,
    pub records: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Values given on the command line win over the file.
    pub fn merge(self, overrides: Settings) -> Self {
        Self {
            difficulty: overrides.difficulty.or(self.difficulty),
            records: overrides.records.or(self.records),
            seed: overrides.seed.or(self.seed),
        }
    }

    pub fn records_path(&self) -> PathBuf {
        self.records
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS))
    }
}
