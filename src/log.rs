//! Persistent activity log (`~/.labelscrape/activity.log`).

use crate::error::{Result, ScrapeError};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const INFO_MARKER: &str = "🟢";
const ERROR_MARKER: &str = "🔴";

/// `~/.labelscrape`, if a home directory can be determined.
pub fn app_dir() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().join(".labelscrape"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct LogEntry {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    subject: Option<String>,
    event: String,
    details: Option<String>,
}

pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> Result<Self> {
        let dir = app_dir().ok_or_else(|| {
            ScrapeError::Config("could not determine home directory".into())
        })?;
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join("activity.log")))
    }

    /// Logger writing to an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(
        &self,
        level: LogLevel,
        subject: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            subject: subject.map(|s| s.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let marker = match entry.level {
            LogLevel::Info => INFO_MARKER,
            LogLevel::Error => ERROR_MARKER,
        };

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            marker,
            entry.event,
            entry.subject.as_deref().unwrap_or("*"),
            entry.details.as_deref().unwrap_or("")
        )?;

        Ok(())
    }

    /// Matching lines, most recent first.
    pub fn read_logs(&self, errors_only: bool) -> Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(fs::File::open(&self.log_path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if errors_only && !line.contains(ERROR_MARKER) {
                continue;
            }
            lines.push(line);
        }

        lines.reverse();
        Ok(lines)
    }

    pub fn info(&self, subject: Option<&str>, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Info, subject, event, details)
    }

    pub fn error(&self, subject: Option<&str>, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Error, subject, event, details)
    }
}
