//! Turns a chart request into a chart: read, resample, decide axes, render.

use crate::{
    chart::{render, Chart, Series},
    duration::parse_width,
    Config, Error, Resampler,
};
use serde::Deserialize;

/// Parameters of a chart request, as found in the query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Params {
    /// Bucket width, e.g. `5m`; empty means the configured fallback
    #[serde(default)]
    pub sample: String,

    /// Any non-empty value enables cumulative mode
    #[serde(default)]
    pub cumulative: String,

    /// Chart title
    #[serde(default)]
    pub title: String,
}

impl Params {
    /// Whether cumulative mode was requested.
    #[must_use]
    pub fn is_cumulative(&self) -> bool {
        !self.cumulative.is_empty()
    }
}

/// Builds the chart for a request, reading every source again.
///
/// # Errors
///
/// Returns [`Error::InvalidWidth`] if `sample` is negative or shorter than one
/// millisecond (anything that is not a duration falls back like an empty one),
/// [`Error::Io`] or [`Error::Parse`] if a source cannot be read, and
/// [`Error::EmptyDataset`] if a source contains no timestamps.
pub fn build_chart(config: &Config, params: &Params) -> crate::Result<Chart> {
    let requested_width = parse_width(&params.sample)?;
    let cumulative = params.is_cumulative();

    let mut inputs = Vec::with_capacity(config.sources.len());

    for source in &config.sources {
        let timestamps = source.read(config.format, config.blank_lines)?;

        if timestamps.is_empty() {
            return Err(Error::EmptyDataset);
        }

        inputs.push((source.label(), timestamps));
    }

    let width = match (requested_width, inputs.first()) {
        (Some(width), _) => width,
        (None, Some((_, timestamps))) => config.fallback.width(timestamps),
        (None, None) => return Err(Error::SourceCount(0)),
    };

    log::debug!(
        "charting {} source(s) with {width}ms buckets (cumulative={cumulative})",
        inputs.len(),
    );

    let resampler = Resampler::new(width)?
        .cumulative(cumulative)
        .multiplier(config.multiplier)
        .keep_partial(config.keep_partial);

    let mut series = inputs
        .into_iter()
        .map(|(label, timestamps)| Series::new(label, resampler.run(timestamps)));

    let chart = match (series.next(), series.next()) {
        (Some(first), None) => Chart::single(params.title.as_str(), first),
        (Some(first), Some(second)) => Chart::double(params.title.as_str(), first, second),
        (None, _) => return Err(Error::SourceCount(0)),
    };

    Ok(chart.with_params(params.sample.as_str(), cumulative))
}

/// Builds and renders the chart page for a request.
///
/// # Errors
///
/// See [`build_chart`].
pub fn render_page(config: &Config, params: &Params) -> crate::Result<String> {
    build_chart(config, params).map(|chart| render(&chart))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::{
        chart::Plot,
        source::{BlankLines, Format, Source, Unit},
        Bucket, Duration, WidthFallback,
    };
    use std::sync::Arc;
    use test_log::test;

    fn captured(input: &str) -> Source {
        Source::Captured(Arc::from(input.as_bytes()))
    }

    fn config(sources: &[&str]) -> Config {
        sources
            .iter()
            .fold(Config::builder(), |builder, input| {
                builder.source(captured(input))
            })
            .format(Format::Integer(Unit::Millis))
            .build()
            .unwrap()
    }

    fn params(sample: &str, cumulative: bool) -> Params {
        Params {
            sample: sample.into(),
            cumulative: if cumulative { "1".into() } else { String::new() },
            title: "test".into(),
        }
    }

    fn single_buckets(chart: &Chart) -> &[Bucket] {
        match &chart.plot {
            Plot::Single(series) => &series.buckets,
            Plot::Double { .. } => panic!("expected a single series"),
        }
    }

    #[test]
    fn explicit_width() {
        let config = config(&["0\n1\n1000\n1001\n5000\n"]);
        let chart = build_chart(&config, &params("1s", false)).unwrap();

        assert_eq!(
            [
                Bucket { start: 0, count: 2 },
                Bucket {
                    start: 1_000,
                    count: 2
                }
            ],
            single_buckets(&chart)
        );
        assert_eq!("test", chart.title);
        assert_eq!("1s", chart.sample);
        assert!(!chart.cumulative);
    }

    #[test]
    fn inferred_width() {
        // Span below one hour: 1s buckets
        let config = config(&["0\n500\n1500\n2500\n"]);
        let chart = build_chart(&config, &params("", false)).unwrap();

        assert_eq!(
            [
                Bucket { start: 0, count: 2 },
                Bucket {
                    start: 1_500,
                    count: 1
                }
            ],
            single_buckets(&chart)
        );
    }

    #[test]
    fn fixed_fallback_width() {
        let config = Config::builder()
            .source(captured("0\n500\n1500\n2500\n"))
            .format(Format::Integer(Unit::Millis))
            .fallback(WidthFallback::Fixed(Duration::seconds(2)))
            .build()
            .unwrap();

        let chart = build_chart(&config, &params("", false)).unwrap();
        assert_eq!([Bucket { start: 0, count: 3 }], single_buckets(&chart));
    }

    #[test]
    fn cumulative_request() {
        let config = config(&["0\n1\n1000\n1001\n5000\n"]);
        let chart = build_chart(&config, &params("1s", true)).unwrap();

        assert_eq!(
            [
                Bucket { start: 0, count: 2 },
                Bucket {
                    start: 1_000,
                    count: 4
                }
            ],
            single_buckets(&chart)
        );
        assert!(chart.cumulative);
    }

    #[test]
    fn two_sources() {
        let big = (0..300)
            .map(|i| (i * 10).to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let config = config(&[big.as_str(), "0\n1500\n2500\n"]);

        let chart = build_chart(&config, &params("1s", false)).unwrap();

        let Plot::Double {
            first,
            second,
            two_axes,
        } = &chart.plot
        else {
            panic!("expected two series");
        };

        assert_eq!("count", first.label);
        assert_eq!(2, first.buckets.len());
        assert_eq!(100, first.buckets[0].count);
        assert_eq!(1, second.buckets[0].count);
        assert!(*two_axes);
    }

    #[test]
    fn empty_source() {
        let config = config(&[""]);
        let err = build_chart(&config, &params("", false)).unwrap_err();

        assert!(matches!(err, Error::EmptyDataset));
        assert_eq!("no data to display", err.to_string());
    }

    #[test]
    fn blank_lines() {
        let config = config(&["0\n\n1\n"]);
        let err = build_chart(&config, &params("", false)).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err:?}");

        let config = Config::builder()
            .source(captured("\n\n"))
            .format(Format::Integer(Unit::Millis))
            .blank_lines(BlankLines::Skip)
            .build()
            .unwrap();
        let err = build_chart(&config, &params("", false)).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset), "{err:?}");

        let config = Config::builder()
            .source(captured("0\n\n1\n"))
            .format(Format::Integer(Unit::Millis))
            .blank_lines(BlankLines::Skip)
            .build()
            .unwrap();
        let chart = build_chart(&config, &params("", false)).unwrap();
        assert_eq!([Bucket { start: 0, count: 2 }], single_buckets(&chart));
    }

    #[test]
    fn second_source_empty() {
        let config = config(&["1\n2\n", ""]);
        let err = build_chart(&config, &params("", false)).unwrap_err();

        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn parse_error() {
        let config = config(&["1\n2\nnope\n"]);
        let err = build_chart(&config, &params("", false)).unwrap_err();

        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn invalid_width() {
        let config = config(&["1\n2\n"]);

        for sample in ["-5m", "10us"] {
            let err = build_chart(&config, &params(sample, false)).unwrap_err();
            assert!(matches!(err, Error::InvalidWidth(_)), "{sample}: {err:?}");
        }
    }

    #[test]
    fn unparsable_width_is_inferred() {
        // Span below one hour: 1s buckets, same as an empty sample
        let config = config(&["0\n500\n1500\n2500\n"]);

        for sample in ["soon", "5x", "1h 30m"] {
            let chart = build_chart(&config, &params(sample, false)).unwrap();

            assert_eq!(
                [
                    Bucket { start: 0, count: 2 },
                    Bucket {
                        start: 1_500,
                        count: 1
                    }
                ],
                single_buckets(&chart),
                "{sample}"
            );
        }
    }

    #[test]
    fn render_page_contains_rows() {
        let config = config(&["0\n1\n1000\n1001\n5000\n"]);
        let page = render_page(&config, &params("1s", false)).unwrap();

        assert!(page.contains("[new Date(0), 2],"));
        assert!(page.contains("[new Date(1000), 2],"));
        assert!(!page.contains("new Date(5000)"));
    }
}
