use super::{builder::Resampler, Bucket};
use crate::Timestamp;

/// A streaming resampler
///
/// Takes in an ascending stream of timestamps, and emits count buckets.
/// A timestamp before the current bucket start is counted into that bucket.
///
/// The last in-progress bucket is held back, because more timestamps could
/// still fall into it. It is only emitted at the end of the stream if it is the
/// only bucket, or if [`Resampler::keep_partial`] is set.
pub struct Aggregator<I: Iterator<Item = Timestamp>> {
    config: Resampler,
    bucket: Option<Bucket>,
    has_emitted: bool,
    reader: I,
}

impl<I: Iterator<Item = Timestamp>> Aggregator<I> {
    pub(crate) fn new(config: Resampler, reader: I) -> Self {
        Self {
            config,
            bucket: None,
            has_emitted: false,
            reader,
        }
    }
}

impl<I: Iterator<Item = Timestamp>> Iterator for Aggregator<I> {
    type Item = Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        let width = i128::from(self.config.width());
        let multiplier = self.config.get_multiplier();

        for ts in self.reader.by_ref() {
            let Some(bucket) = self.bucket.as_mut() else {
                // NOTE: Initialize bucket
                self.bucket = Some(Bucket {
                    start: ts,
                    count: multiplier,
                });
                continue;
            };

            if i128::from(ts) < i128::from(bucket.start) + width {
                // NOTE: Add to bucket
                bucket.count = bucket.count.saturating_add(multiplier);
            } else {
                // NOTE: Return bucket, and open the next one at this timestamp
                let finished = *bucket;

                bucket.start = ts;
                bucket.count = self
                    .config
                    .accumulation()
                    .carry(finished.count)
                    .saturating_add(multiplier);

                self.has_emitted = true;
                return Some(finished);
            }
        }

        let bucket = self.bucket.take()?;

        if self.config.is_keep_partial() || !self.has_emitted {
            self.has_emitted = true;
            Some(bucket)
        } else {
            log::trace!(
                "dropping trailing partial bucket at {} ({} counted)",
                bucket.start,
                bucket.count,
            );
            None
        }
    }
}
