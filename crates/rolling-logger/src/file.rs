//! Daily log files
//!
//! One file per calendar day, `<app>-YYYY-MM-DD.log`, with old days pruned.

use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub fn log_file_name(app_name: &str, date: NaiveDate) -> String {
    format!("{}-{}.log", app_name, date.format("%Y-%m-%d"))
}

/// Append-only file for the current day; reopens when the day changes
#[derive(Debug)]
pub struct DailyFile {
    dir: PathBuf,
    app_name: String,
    date: NaiveDate,
    file: File,
}

impl DailyFile {
    pub fn open(dir: &Path, app_name: &str, date: NaiveDate) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let file = open_append(&dir.join(log_file_name(app_name, date)))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            date,
            file,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(log_file_name(&self.app_name, self.date))
    }

    /// Write `buf` into the file for `today`, rolling over first if needed
    pub fn write_on(&mut self, today: NaiveDate, buf: &[u8]) -> io::Result<()> {
        if today != self.date {
            self.file.flush()?;
            self.file = open_append(&self.dir.join(log_file_name(&self.app_name, today)))?;
            self.date = today;
        }
        self.file.write_all(buf)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Delete all but the newest `keep` log files of `app_name`. Returns how many were removed.
pub fn prune_old_logs(dir: &Path, app_name: &str, keep: usize) -> io::Result<usize> {
    let prefix = format!("{}-", app_name);
    let mut logs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    // Date-stamped names sort chronologically
    logs.sort();
    let excess = logs.len().saturating_sub(keep);
    for path in &logs[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}
