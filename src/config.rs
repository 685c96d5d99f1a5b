use crate::{
    source::{BlankLines, Format, Source},
    Error, Timestamp, WidthTiers,
};

/// How the bucket width is picked when a request does not specify one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidthFallback {
    /// Infer the width from the span of the first series
    Infer(WidthTiers),

    /// Always use this width, in milliseconds
    Fixed(u64),
}

impl Default for WidthFallback {
    fn default() -> Self {
        Self::Infer(WidthTiers::default())
    }
}

impl WidthFallback {
    pub(crate) fn width(&self, timestamps: &[Timestamp]) -> u64 {
        match self {
            Self::Infer(tiers) => tiers.infer(timestamps),
            Self::Fixed(width) => *width,
        }
    }
}

/// Everything needed to answer a chart request, fixed at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) sources: Vec<Source>,
    pub(crate) format: Format,
    pub(crate) blank_lines: BlankLines,
    pub(crate) multiplier: u64,
    pub(crate) keep_partial: bool,
    pub(crate) fallback: WidthFallback,
}

impl Config {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The configured sources, in plotting order.
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug)]
pub struct Builder {
    sources: Vec<Source>,
    format: Format,
    blank_lines: BlankLines,
    multiplier: u64,
    keep_partial: bool,
    fallback: WidthFallback,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            sources: Vec::with_capacity(2),
            format: Format::default(),
            blank_lines: BlankLines::default(),
            multiplier: 1,
            keep_partial: false,
            fallback: WidthFallback::default(),
        }
    }

    /// Adds a source. The first source is plotted on the left axis.
    #[must_use]
    pub fn source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Sets how lines are parsed.
    ///
    /// Default = integer seconds
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets whether blank lines are skipped or rejected.
    ///
    /// Default = rejected
    #[must_use]
    pub fn blank_lines(mut self, blank: BlankLines) -> Self {
        self.blank_lines = blank;
        self
    }

    /// Sets the amount every timestamp adds to its bucket, at least 1.
    ///
    /// Default = 1
    #[must_use]
    pub fn multiplier(mut self, n: u64) -> Self {
        self.multiplier = n;
        self
    }

    /// If `true`, the trailing in-progress bucket is charted as well.
    #[must_use]
    pub fn keep_partial(mut self, enabled: bool) -> Self {
        self.keep_partial = enabled;
        self
    }

    /// Sets how the width is picked for requests without one.
    ///
    /// Default = inferred from the data span
    #[must_use]
    pub fn fallback(mut self, fallback: WidthFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceCount`] unless there are one or two sources,
    /// [`Error::InvalidMultiplier`] if the multiplier is zero, and
    /// [`Error::InvalidWidth`] if a fixed fallback width is zero.
    pub fn build(self) -> crate::Result<Config> {
        if !(1..=2).contains(&self.sources.len()) {
            return Err(Error::SourceCount(self.sources.len()));
        }

        if self.multiplier == 0 {
            return Err(Error::InvalidMultiplier);
        }

        if self.fallback == WidthFallback::Fixed(0) {
            return Err(Error::InvalidWidth("default width must be positive".into()));
        }

        Ok(Config {
            sources: self.sources,
            format: self.format,
            blank_lines: self.blank_lines,
            multiplier: self.multiplier,
            keep_partial: self.keep_partial,
            fallback: self.fallback,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Duration;
    use std::path::PathBuf;
    use test_log::test;

    fn file(name: &str) -> Source {
        Source::File(PathBuf::from(name))
    }

    #[test]
    fn build_requires_sources() {
        assert!(matches!(
            Config::builder().build(),
            Err(Error::SourceCount(0))
        ));
    }

    #[test]
    fn build_rejects_three_sources() {
        let result = Config::builder()
            .source(file("a"))
            .source(file("b"))
            .source(file("c"))
            .build();

        assert!(matches!(result, Err(Error::SourceCount(3))));
    }

    #[test]
    fn build_rejects_zero_fallback() {
        let result = Config::builder()
            .source(file("a"))
            .fallback(WidthFallback::Fixed(0))
            .build();

        assert!(matches!(result, Err(Error::InvalidWidth(_))));
    }

    #[test]
    fn build_rejects_zero_multiplier() {
        let result = Config::builder().source(file("a")).multiplier(0).build();

        assert!(matches!(result, Err(Error::InvalidMultiplier)));
    }

    #[test]
    fn build_keeps_multiplier() {
        let config = Config::builder()
            .source(file("a"))
            .multiplier(3)
            .build()
            .unwrap();

        assert_eq!(3, config.multiplier);
    }

    #[test]
    fn fallback_width() {
        let week = [0, Duration::weeks(1).try_into().unwrap()];

        assert_eq!(Duration::hours(24), WidthFallback::default().width(&week));
        assert_eq!(
            Duration::minutes(1),
            WidthFallback::Fixed(Duration::minutes(1)).width(&week)
        );
    }
}
