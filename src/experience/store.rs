//! Keyed experience table.

use std::io::{BufRead, Write};

use log::{error, info, warn};
use rustc_hash::FxHashMap;

use super::record::{Record, DEFAULT_ALPHA};
use crate::core::Outcome;
use crate::error::{Error, Result};

/// Lines accepted and rejected by a load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Map from position key to `Record`.
///
/// One store belongs to one strategy instance; nothing here is shared.
#[derive(Clone, Debug)]
pub struct ExperienceStore {
    records: FxHashMap<String, Record>,
    alpha: f64,
}

impl Default for ExperienceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_alpha(DEFAULT_ALPHA)
    }

    #[must_use]
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            records: FxHashMap::default(),
            alpha,
        }
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for `key`, created with the initial score if absent.
    pub fn get(&mut self, key: &str) -> Record {
        *self.records.entry(key.to_string()).or_default()
    }

    /// Record for `key` without creating one.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, record: Record) {
        self.records.insert(key.into(), record);
    }

    /// Count `outcome` against `key` and blend the score.
    ///
    /// The update is always applied. A score that lands outside `[0, 1]` is
    /// logged and reported as `ScoreOutOfRange`.
    pub fn update(&mut self, key: &str, outcome: Outcome) -> Result<()> {
        let alpha = self.alpha;
        let record = self.records.entry(key.to_string()).or_default();
        record.update(outcome, alpha);
        if record.is_valid() {
            return Ok(());
        }
        error!("experience record '{}' left [0, 1]: {}", key, record.score);
        Err(Error::ScoreOutOfRange {
            key: key.to_string(),
            score: record.score,
        })
    }

    /// Keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.records.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Merge `key#wins-losses-ties#score` lines into the table.
    ///
    /// Malformed lines are logged and skipped; blank lines are ignored.
    /// Read failures abort the load.
    pub fn load_from_text<R: BufRead>(&mut self, reader: R) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io("read experience line", e))?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            match Record::parse_line(line) {
                Some((key, record)) => {
                    self.records.insert(key.to_string(), record);
                    report.loaded += 1;
                }
                None => {
                    let err = Error::ExperienceFormat {
                        line_number: index + 1,
                        line: line.to_string(),
                    };
                    warn!("skipping {}", err);
                    report.skipped += 1;
                }
            }
        }
        info!(
            "loaded {} experience records ({} skipped)",
            report.loaded, report.skipped
        );
        Ok(report)
    }

    /// Write every record, one per line, sorted by key.
    pub fn save_to_text<W: Write>(&self, mut writer: W) -> Result<()> {
        for key in self.keys() {
            let record = &self.records[key];
            writeln!(writer, "{}", record.to_line(key)).map_err(|e| Error::io("write experience line", e))?;
        }
        writer.flush().map_err(|e| Error::io("flush experience records", e))?;
        info!("saved {} experience records", self.records.len());
        Ok(())
    }
}
