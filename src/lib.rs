//! Resample event timestamps into count buckets and chart them in the browser.
//!
//! Timestamps (one per line, integers or RFC3339 dates) are sorted and folded
//! into fixed-width buckets, either counting per bucket or as a running total.
//! Bucket starts are anchored on the data: a bucket opens at the first timestamp
//! that does not fit into the previous one.
//!
//! When no width is requested, one is inferred from the span of the data:
//!
//! - less than an hour: 1 second
//! - less than a week: 5 minutes
//! - otherwise: 1 day
//!
//! Two series are plotted on separate Y axes when their 95th percentile bucket
//! counts differ by more than a factor of 5.
//!
//! ```
//! use tsgraph::{infer_width, needs_two_axes, Duration, Resampler};
//!
//! let errors = vec![5_000, 1_000, 0, 1_500, 2_200, 9_000];
//! let requests = (0..10_000).step_by(10).collect::<Vec<_>>();
//!
//! let width = infer_width(&requests);
//! assert_eq!(Duration::seconds(1), width);
//!
//! let resampler = Resampler::new(width)?;
//! let errors = resampler.run(errors);
//! let requests = resampler.run(requests);
//!
//! // The last bucket of each series is still in progress and not emitted
//! assert_eq!(4, errors.len());
//! assert_eq!(9, requests.len());
//!
//! assert!(needs_two_axes(&errors, &requests));
//!
//! # Ok::<(), tsgraph::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod config;
mod duration;
mod error;
mod time;

pub mod chart;
pub mod handler;
pub mod server;
pub mod source;

/// Epoch timestamp in milliseconds
pub type Timestamp = i64;

pub use agg::{
    axis::{needs_two_axes, percentile95, TWO_AXES_THRESHOLD},
    builder::{resample, Resampler},
    stream::Aggregator,
    width::{infer_width, WidthTiers},
    Accumulation, Bucket,
};
pub use config::{Builder as ConfigBuilder, Config, WidthFallback};
pub use duration::{parse_width, parse_width_strict, Duration};
pub use error::{Error, Result};
pub use time::timestamp;
