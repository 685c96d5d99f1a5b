use super::{stream::Aggregator, Accumulation, Bucket};
use crate::{Error, Timestamp};

/// Folds timestamps into fixed-width count buckets.
///
/// ```
/// use tsgraph::{Duration, Resampler};
///
/// let buckets = Resampler::new(Duration::seconds(1))?
///     .cumulative(true)
///     .run(vec![2_500, 0, 100, 1_200]);
///
/// // 2_500 opens the trailing bucket, which is not emitted
/// assert_eq!(2, buckets.len());
/// assert_eq!((0, 2), (buckets[0].start, buckets[0].count));
/// assert_eq!((1_200, 3), (buckets[1].start, buckets[1].count));
///
/// # Ok::<(), tsgraph::Error>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resampler {
    /// Bucket "width" in milliseconds
    width: u64,

    /// Whether counts reset or carry over between buckets
    accumulation: Accumulation,

    /// Amount every timestamp adds to its bucket
    multiplier: u64,

    /// Emit the trailing bucket even if other buckets were emitted before it
    keep_partial: bool,
}

impl Resampler {
    /// Creates a delta-mode resampler with the given bucket width in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWidth`] if the width is zero.
    pub fn new(width: u64) -> crate::Result<Self> {
        if width == 0 {
            return Err(Error::InvalidWidth("width must be positive".into()));
        }

        Ok(Self {
            width,
            accumulation: Accumulation::Delta,
            multiplier: 1,
            keep_partial: false,
        })
    }

    /// If `true`, every bucket includes the counts of all previous buckets.
    #[must_use]
    pub fn cumulative(mut self, enabled: bool) -> Self {
        self.accumulation = enabled.into();
        self
    }

    /// Sets the amount every timestamp adds to its bucket.
    ///
    /// Default = 1, 0 is treated as 1
    #[must_use]
    pub fn multiplier(mut self, n: u64) -> Self {
        self.multiplier = n.max(1);
        self
    }

    /// If `true`, the trailing in-progress bucket is emitted as well.
    ///
    /// By default it is dropped, unless it is the only bucket.
    #[must_use]
    pub fn keep_partial(mut self, enabled: bool) -> Self {
        self.keep_partial = enabled;
        self
    }

    /// Bucket width in milliseconds
    #[must_use]
    pub fn width(&self) -> u64 {
        self.width
    }

    #[must_use]
    pub(crate) fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    #[must_use]
    pub(crate) fn get_multiplier(&self) -> u64 {
        self.multiplier
    }

    #[must_use]
    pub(crate) fn is_keep_partial(&self) -> bool {
        self.keep_partial
    }

    /// Resamples timestamps that are already sorted in ascending order.
    ///
    /// Unsorted input does not panic, but produces meaningless buckets; use
    /// [`Resampler::run`] instead.
    pub fn stream<I: IntoIterator<Item = Timestamp>>(self, sorted: I) -> Aggregator<I::IntoIter> {
        Aggregator::new(self, sorted.into_iter())
    }

    /// Sorts the timestamps and resamples them into buckets.
    #[must_use]
    pub fn run(self, mut timestamps: Vec<Timestamp>) -> Vec<Bucket> {
        timestamps.sort_unstable();

        log::trace!(
            "resampling {} timestamps into {}ms buckets ({:?}, multiplier={})",
            timestamps.len(),
            self.width,
            self.accumulation,
            self.multiplier,
        );

        self.stream(timestamps).collect()
    }
}

/// Sorts the timestamps and resamples them into buckets of `width` milliseconds.
///
/// # Errors
///
/// Returns [`Error::InvalidWidth`] if the width is zero.
pub fn resample(
    timestamps: Vec<Timestamp>,
    width: u64,
    cumulative: bool,
) -> crate::Result<Vec<Bucket>> {
    Ok(Resampler::new(width)?.cumulative(cumulative).run(timestamps))
}
