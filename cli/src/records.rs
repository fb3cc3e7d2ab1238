//! Where finished games go: a trait seam plus a JSON-lines file store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use arcade_core::{Badge, GameOutcome, PlayerStats};
use smallvec::SmallVec;

pub trait OutcomeRecorder {
    /// Stores `outcome` and returns the badges it unlocked.
    fn record(&mut self, outcome: &GameOutcome) -> anyhow::Result<SmallVec<[Badge; 3]>>;

    fn stats(&self) -> &PlayerStats;
}

/// Appends one JSON object per finished game and keeps running totals
/// rebuilt from the existing lines on open.
#[derive(Debug)]
pub struct JsonLinesRecorder {
    path: PathBuf,
    stats: PlayerStats,
}

impl JsonLinesRecorder {
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let mut stats = PlayerStats::default();

        match File::open(&path) {
            Ok(file) => {
                for (number, line) in BufReader::new(file).lines().enumerate() {
                    let line = line.with_context(|| format!("reading {}", path.display()))?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<GameOutcome>(&line) {
                        Ok(outcome) => {
                            stats.apply(&outcome);
                        }
                        Err(err) => log::warn!(
                            "skipping line {} of {}: {}",
                            number + 1,
                            path.display(),
                            err
                        ),
                    }
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no records at {} yet", path.display());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("opening {}", path.display()));
            }
        }

        Ok(Self { path, stats })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeRecorder for JsonLinesRecorder {
    fn record(&mut self, outcome: &GameOutcome) -> anyhow::Result<SmallVec<[Badge; 3]>> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(outcome)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("writing {}", self.path.display()))?;

        log::info!("recorded {} game, {} points", outcome.game, outcome.points);
        Ok(self.stats.apply(outcome))
    }

    fn stats(&self) -> &PlayerStats {
        &self.stats
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;

    /// Keeps outcomes in memory, optionally failing every save.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryRecorder {
        pub(crate) outcomes: Vec<GameOutcome>,
        pub(crate) stats: PlayerStats,
        pub(crate) fail: bool,
    }

    impl OutcomeRecorder for MemoryRecorder {
        fn record(&mut self, outcome: &GameOutcome) -> anyhow::Result<SmallVec<[Badge; 3]>> {
            if self.fail {
                anyhow::bail!("store unavailable");
            }
            self.outcomes.push(outcome.clone());
            Ok(self.stats.apply(outcome))
        }

        fn stats(&self) -> &PlayerStats {
            &self.stats
        }
    }
}
