//! Output artifacts
//!
//! JSON files named `<run stamp>-<kind>.json` inside the output directory.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where and under which stamp one run writes its files
#[derive(Debug, Clone)]
pub struct OutputSet {
    dir: PathBuf,
    stamp: String,
}

impl OutputSet {
    pub fn new(dir: impl Into<PathBuf>, started: DateTime<Utc>) -> Self {
        Self {
            dir: dir.into(),
            stamp: started.format("%Y%m%d-%H%M").to_string(),
        }
    }

    pub fn path(&self, kind: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.json", self.stamp, kind))
    }

    pub fn write<T: Serialize>(&self, kind: &str, value: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output directory {:?}", self.dir))?;

        let path = self.path(kind);
        write_json(&path, value)?;
        info!("Wrote {:?}", path);
        Ok(path)
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamped_names() {
        let started = Utc.with_ymd_and_hms(2018, 8, 15, 9, 5, 0).unwrap();
        let output = OutputSet::new("out", started);

        assert_eq!(output.path("grid"), PathBuf::from("out/20180815-0905-grid.json"));
    }

    #[test]
    fn test_write_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let output = OutputSet::new(tmp.path().join("nested"), Utc::now());

        let path = output.write("info", &serde_json::json!({"rows": 3})).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("\"rows\": 3"));
    }
}
