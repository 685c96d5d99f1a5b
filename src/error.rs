/// Error type
#[derive(Debug)]
pub enum Error {
    /// A source could not be opened or read.
    Io(std::io::Error),

    /// A line could not be parsed as a timestamp.
    Parse {
        /// 1-based line number
        line: usize,

        /// What went wrong
        reason: String,
    },

    /// No timestamps were available after parsing.
    EmptyDataset,

    /// A bucket width was zero, negative or not a valid duration.
    InvalidWidth(String),

    /// Charts need one or two sources.
    SourceCount(usize),

    /// Every timestamp must add at least 1 to its bucket.
    InvalidMultiplier,
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => {
                write!(f, "{e}")
            }
            Self::Parse { line, reason } => {
                write!(f, "error on line {line}: {reason}")
            }
            Self::EmptyDataset => {
                write!(f, "no data to display")
            }
            Self::InvalidWidth(s) => {
                write!(f, "invalid sample width: {s}")
            }
            Self::SourceCount(n) => {
                write!(f, "expected 1 or 2 sources, got {n}")
            }
            Self::InvalidMultiplier => {
                write!(f, "multiplier must be at least 1")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
