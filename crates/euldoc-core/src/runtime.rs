/*
 * runtime.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The system services the passes need from their environment.
 */

use chrono::NaiveDate;
use std::fs::File;
use std::io;
use std::path::Path;

/// Access to the host system for the passes that look outside the document.
///
/// The image pass probes the filesystem and the date pass reads the calendar.
/// Both go through this trait so tests can substitute a fixed date and a
/// fake filesystem.
pub trait SystemRuntime: Send + Sync {
    /// Succeeds when `path` names a file that can be opened for reading.
    fn probe_file(&self, path: &Path) -> io::Result<()>;

    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// The runtime backed by the real filesystem and clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl SystemRuntime for NativeRuntime {
    fn probe_file(&self, path: &Path) -> io::Result<()> {
        File::open(path).map(|_| ())
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A runtime with a fixed date and an in-memory set of existing files.
#[cfg(test)]
pub(crate) struct FixedRuntime {
    pub today: NaiveDate,
    pub files: Vec<std::path::PathBuf>,
}

#[cfg(test)]
impl FixedRuntime {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            today: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.files.push(path.into());
        self
    }
}

#[cfg(test)]
impl SystemRuntime for FixedRuntime {
    fn probe_file(&self, path: &Path) -> io::Result<()> {
        if self.files.iter().any(|f| f == path) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_probe_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.svg");
        fs::write(&path, "<svg/>").unwrap();
        assert!(NativeRuntime::new().probe_file(&path).is_ok());
    }

    #[test]
    fn test_probe_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NativeRuntime::new()
            .probe_file(&dir.path().join("missing.svg"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
