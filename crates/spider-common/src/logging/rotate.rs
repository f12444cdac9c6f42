//! Local-day rolling file writer.
//!
//! Closes the current segment and opens the next one when the local date
//! changes, so the rotation boundary is local midnight. Segments are named
//! `<prefix>.<YYYY-MM-DD>` with the local date.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

pub(crate) struct LocalDailyWriter {
    directory: PathBuf,
    prefix: String,
    date: NaiveDate,
    file: File,
}

impl LocalDailyWriter {
    pub(crate) fn new(directory: &Path, prefix: &str) -> io::Result<Self> {
        Self::for_date(directory, prefix, Local::now().date_naive())
    }

    fn for_date(directory: &Path, prefix: &str, date: NaiveDate) -> io::Result<Self> {
        let file = open_segment(directory, prefix, date)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
            date,
            file,
        })
    }

    fn roll_if_needed(&mut self) -> io::Result<()> {
        let today = Local::now().date_naive();
        if today != self.date {
            self.file = open_segment(&self.directory, &self.prefix, today)?;
            self.date = today;
        }
        Ok(())
    }
}

impl io::Write for LocalDailyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.roll_if_needed()?;
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_segment(directory: &Path, prefix: &str, date: NaiveDate) -> io::Result<File> {
    let name = format!("{}.{}", prefix, date.format("%Y-%m-%d"));
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(directory.join(name))
}
