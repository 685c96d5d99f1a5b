pub(crate) mod axis;
pub(crate) mod builder;
pub(crate) mod stream;
pub(crate) mod width;

use crate::Timestamp;

/// A fixed-width time window and the number of events counted in it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bucket {
    /// Timestamp that opened this bucket (inclusive lower bound)
    pub start: Timestamp,

    /// Events counted in `[start, start + width)`, or the running total in cumulative mode
    pub count: u64,
}

/// How counts carry over from one bucket to the next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Accumulation {
    /// Every bucket starts counting from zero.
    #[default]
    Delta,

    /// Every bucket starts from the running total of all previous buckets.
    Cumulative,
}

impl Accumulation {
    /// Count a fresh bucket starts with, given the count of the bucket it follows.
    #[must_use]
    pub(crate) fn carry(self, previous: u64) -> u64 {
        match self {
            Self::Delta => 0,
            Self::Cumulative => previous,
        }
    }
}

impl From<bool> for Accumulation {
    fn from(cumulative: bool) -> Self {
        if cumulative {
            Self::Cumulative
        } else {
            Self::Delta
        }
    }
}
