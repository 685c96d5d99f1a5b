use crate::{time::span, Duration, Timestamp};

/// Breakpoints for picking a bucket width from the span of the data.
///
/// Spans below `medium_from` use `fine`, spans below `coarse_from` use
/// `medium`, and everything longer uses `coarse`. Lower bounds are inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WidthTiers {
    /// Shortest span that gets `medium` buckets
    pub medium_from: u64,

    /// Shortest span that gets `coarse` buckets
    pub coarse_from: u64,

    /// Width for short spans
    pub fine: u64,

    /// Width for medium spans
    pub medium: u64,

    /// Width for long spans
    pub coarse: u64,
}

impl Default for WidthTiers {
    fn default() -> Self {
        Self {
            medium_from: Duration::hours(1),
            coarse_from: Duration::hours(168),
            fine: Duration::seconds(1),
            medium: Duration::minutes(5),
            coarse: Duration::hours(24),
        }
    }
}

impl WidthTiers {
    /// Picks the bucket width for a span given in milliseconds.
    #[must_use]
    pub fn width_for_span(&self, span: u64) -> u64 {
        if span < self.medium_from {
            self.fine
        } else if span < self.coarse_from {
            self.medium
        } else {
            self.coarse
        }
    }

    /// Picks the bucket width for the span between the smallest and largest timestamp.
    #[must_use]
    pub fn infer(&self, timestamps: &[Timestamp]) -> u64 {
        let min = timestamps.iter().min().copied().unwrap_or_default();
        let max = timestamps.iter().max().copied().unwrap_or_default();

        let width = self.width_for_span(span(min, max));
        log::debug!("inferred {width}ms bucket width for {min}..={max}");

        width
    }
}

/// Picks a bucket width for the timestamps using the default [`WidthTiers`].
///
/// The input does not need to be sorted.
#[must_use]
pub fn infer_width(timestamps: &[Timestamp]) -> u64 {
    WidthTiers::default().infer(timestamps)
}
