mod parser;
mod span;

pub use parser::{parse_width, parse_width_strict};

/// Helpers for calculating bucket widths
///
/// All widths are expressed in milliseconds, the resolution of [`crate::Timestamp`].
///
/// ```
/// use tsgraph::{resample, Duration};
///
/// let buckets = resample(vec![0, 10_000, 400_000, 900_000], Duration::minutes(5), false)?;
///
/// assert_eq!(2, buckets.len());
/// assert_eq!(0, buckets[0].start);
/// assert_eq!(2, buckets[0].count);
///
/// # Ok::<(), tsgraph::Error>(())
/// ```
pub struct Duration;

impl Duration {
    /// Formats N weeks as millisecond time frame.
    #[must_use]
    pub const fn weeks(n: u64) -> u64 {
        Self::days(n) * 7
    }

    /// Formats N days as millisecond time frame.
    #[must_use]
    pub const fn days(n: u64) -> u64 {
        Self::hours(n) * 24
    }

    /// Formats N hours as millisecond time frame.
    #[must_use]
    pub const fn hours(n: u64) -> u64 {
        Self::minutes(n) * 60
    }

    /// Formats N minutes as millisecond time frame.
    #[must_use]
    pub const fn minutes(n: u64) -> u64 {
        Self::seconds(n) * 60
    }

    /// Formats N seconds as millisecond time frame.
    #[must_use]
    pub const fn seconds(n: u64) -> u64 {
        Self::millis(n) * 1_000
    }

    /// Formats N milliseconds as millisecond time frame.
    #[must_use]
    pub const fn millis(n: u64) -> u64 {
        n
    }
}
