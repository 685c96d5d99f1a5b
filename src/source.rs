//! Line-oriented timestamp sources.

use crate::{time::parse_rfc3339, Error, Timestamp};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
};

/// Unit of integer timestamps in the input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Unit {
    /// Seconds since the epoch
    #[default]
    Seconds,

    /// Milliseconds since the epoch
    Millis,
}

impl Unit {
    fn to_millis(self, n: i64) -> Option<Timestamp> {
        match self {
            Self::Seconds => n.checked_mul(1_000),
            Self::Millis => Some(n),
        }
    }
}

/// How a line is turned into a timestamp.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// One integer per line
    Integer(Unit),

    /// One RFC3339 date per line, e.g. `2024-05-01T12:00:00Z`
    Rfc3339,
}

impl Default for Format {
    fn default() -> Self {
        Self::Integer(Unit::default())
    }
}

impl Format {
    fn parse_line(self, line: &str) -> Result<Timestamp, String> {
        match self {
            Self::Integer(unit) => {
                let n = line.parse::<i64>().map_err(|e| format!("{line:?}: {e}"))?;
                unit.to_millis(n)
                    .ok_or_else(|| format!("{line:?}: timestamp out of range"))
            }
            Self::Rfc3339 => parse_rfc3339(line).map_err(|e| format!("{line:?}: {e}")),
        }
    }
}

/// What to do with lines that are empty after trimming.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BlankLines {
    /// A blank line is a parse error, like any other line that is not a timestamp
    #[default]
    Reject,

    /// Blank lines are ignored (they still count towards line numbers)
    Skip,
}

/// Reads one timestamp per line.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`Error::Parse`] with the 1-based line number of the first line
/// that is not a timestamp, or [`Error::Io`] if reading fails.
pub fn read_timestamps<R: BufRead>(
    reader: R,
    format: Format,
    blank: BlankLines,
) -> crate::Result<Vec<Timestamp>> {
    let mut timestamps = vec![];

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;

        let line = line.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => Error::Parse {
                line: line_no,
                reason: "line is not valid UTF-8".into(),
            },
            _ => Error::Io(e),
        })?;

        let line = line.trim();
        if line.is_empty() {
            match blank {
                BlankLines::Skip => continue,
                BlankLines::Reject => {
                    return Err(Error::Parse {
                        line: line_no,
                        reason: "empty line".into(),
                    })
                }
            }
        }

        let ts = format.parse_line(line).map_err(|reason| Error::Parse {
            line: line_no,
            reason,
        })?;

        timestamps.push(ts);
    }

    log::trace!("read {} timestamps", timestamps.len());

    Ok(timestamps)
}

/// Where a series' timestamps come from.
///
/// Sources are read again on every request.
#[derive(Clone, Debug)]
pub enum Source {
    /// Bytes captured once at startup (standard input)
    Captured(Arc<[u8]>),

    /// A file, opened anew on every read
    File(PathBuf),
}

impl Source {
    /// Display label of the series: `count` for captured input, otherwise the
    /// file path without its extension.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Captured(_) => "count".into(),
            Self::File(path) => path.with_extension("").display().to_string(),
        }
    }

    /// Reads and parses all timestamps of this source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read, or
    /// [`Error::Parse`] if a line is not a timestamp.
    pub fn read(&self, format: Format, blank: BlankLines) -> crate::Result<Vec<Timestamp>> {
        match self {
            Self::Captured(bytes) => read_timestamps(&bytes[..], format, blank),
            Self::File(path) => read_timestamps(BufReader::new(open(path)?), format, blank),
        }
    }
}

fn open(path: &Path) -> crate::Result<File> {
    File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}
