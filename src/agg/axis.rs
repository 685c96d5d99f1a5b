use super::Bucket;

/// Two series whose p95 magnitudes differ by more than this factor get separate Y axes.
pub const TWO_AXES_THRESHOLD: u64 = 5;

/// Returns the count that 5% of the buckets reach or exceed.
///
/// This is the count at index `len / 20` after sorting descending, so series
/// shorter than 20 buckets yield their maximum. Empty series yield 0.
#[must_use]
pub fn percentile95(buckets: &[Bucket]) -> u64 {
    let mut counts = buckets.iter().map(|b| b.count).collect::<Vec<_>>();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts.get(counts.len() / 20).copied().unwrap_or_default()
}

/// Returns `true` if plotting both series on one Y axis would flatten one of them.
///
/// The p95 ratio is compared exactly, not with truncating integer division:
/// 29 against 5 is a ratio of 5.8 and gets two axes, where `29 / 5 == 5` would
/// keep one.
///
/// A series that is all zeros next to a non-zero one needs its own axis; two
/// all-zero series do not.
#[must_use]
pub fn needs_two_axes(a: &[Bucket], b: &[Bucket]) -> bool {
    let p95_a = percentile95(a);
    let p95_b = percentile95(b);

    // NOTE: Compare p95_a / p95_b > T without dividing
    let threshold = u128::from(TWO_AXES_THRESHOLD);
    let (wide_a, wide_b) = (u128::from(p95_a), u128::from(p95_b));
    let two_axes = wide_a > wide_b * threshold || wide_b > wide_a * threshold;

    log::debug!("p95 magnitudes {p95_a} vs {p95_b}, two axes: {two_axes}");

    two_axes
}
