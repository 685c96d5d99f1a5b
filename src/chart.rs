//! Renders resampled series as a self-contained HTML page.
//!
//! The page draws an area chart with Google Charts and carries a small form to
//! re-request the same chart with a different bucket width or accumulation mode.

use crate::{agg::axis::needs_two_axes, Bucket};
use std::fmt::{self, Write};

/// Resampled buckets plus their display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Series {
    /// Label shown in the legend
    pub label: String,

    /// Buckets in ascending order
    pub buckets: Vec<Bucket>,
}

impl Series {
    /// Creates a series.
    pub fn new<S: Into<String>>(label: S, buckets: Vec<Bucket>) -> Self {
        Self {
            label: label.into(),
            buckets,
        }
    }
}

/// What is plotted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plot {
    /// A single series
    Single(Series),

    /// Two series joined on time, optionally on separate Y axes
    Double {
        /// Series on the left axis
        first: Series,

        /// Series on the right axis if `two_axes` is set
        second: Series,

        /// Whether the series get independent Y axes
        two_axes: bool,
    },
}

/// A chart page: one or two series plus the parameters that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chart {
    /// Chart title
    pub title: String,

    /// Bucket width as requested, used to pre-fill the resample form
    pub sample: String,

    /// Whether buckets are cumulative, used to pre-fill the resample form
    pub cumulative: bool,

    /// The series
    pub plot: Plot,
}

impl Chart {
    /// Creates a chart of a single series.
    pub fn single<S: Into<String>>(title: S, series: Series) -> Self {
        Self {
            title: title.into(),
            sample: String::new(),
            cumulative: false,
            plot: Plot::Single(series),
        }
    }

    /// Creates a chart of two series, deciding whether they need separate Y axes.
    pub fn double<S: Into<String>>(title: S, first: Series, second: Series) -> Self {
        let two_axes = needs_two_axes(&first.buckets, &second.buckets);

        Self {
            title: title.into(),
            sample: String::new(),
            cumulative: false,
            plot: Plot::Double {
                first,
                second,
                two_axes,
            },
        }
    }

    /// Sets the request parameters shown in the resample form.
    #[must_use]
    pub fn with_params<S: Into<String>>(mut self, sample: S, cumulative: bool) -> Self {
        self.sample = sample.into();
        self.cumulative = cumulative;
        self
    }

    /// Whether the chart uses two Y axes.
    #[must_use]
    pub fn two_axes(&self) -> bool {
        matches!(self.plot, Plot::Double { two_axes: true, .. })
    }
}

/// Renders the chart as an HTML document.
#[must_use]
pub fn render(chart: &Chart) -> String {
    chart.to_string()
}

/// Encodes a string as a JavaScript string literal that is safe inside `<script>`.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s)
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Escapes a string for use in an HTML attribute value.
fn html_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }

    out
}

fn write_rows(f: &mut impl Write, buckets: &[Bucket]) -> fmt::Result {
    for bucket in buckets {
        writeln!(
            f,
            "          [new Date({}), {}],",
            bucket.start, bucket.count
        )?;
    }
    Ok(())
}

const HEAD: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <script type="text/javascript" src="https://www.gstatic.com/charts/loader.js"></script>
    <script type="text/javascript">
      google.charts.load('current', {'packages':['corechart']});
      google.charts.setOnLoadCallback(drawChart);

      function drawChart() {
"#;

const EXPLORER: &str = r"          explorer: {
            actions: ['dragToZoom', 'rightClickToReset'],
            axis: 'horizontal',
            keepInBounds: true,
            maxZoomIn: 4.0
          },
";

const PRESETS: [(&str, &str); 5] = [
    ("auto", ""),
    ("5m", "5m"),
    ("1h", "1h"),
    ("1d", "24h"),
    ("1w", "168h"),
];

impl Chart {
    fn write_data(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plot {
            Plot::Single(series) => {
                writeln!(f, "        var data = google.visualization.arrayToDataTable([")?;
                writeln!(f, "          ['Time', {}],", js_string(&series.label))?;
                write_rows(f, &series.buckets)?;
                writeln!(f, "        ]);")
            }
            Plot::Double { first, second, .. } => {
                for (name, series) in [("data1", first), ("data2", second)] {
                    writeln!(f, "        var {name} = new google.visualization.DataTable();")?;
                    writeln!(f, "        {name}.addColumn('date', 'Time');")?;
                    writeln!(
                        f,
                        "        {name}.addColumn('number', {});",
                        js_string(&series.label)
                    )?;
                    writeln!(f, "        {name}.addRows([")?;
                    write_rows(f, &series.buckets)?;
                    writeln!(f, "        ]);")?;
                }
                writeln!(
                    f,
                    "        var data = google.visualization.data.join(data1, data2, 'full', [[0, 0]], [1], [1]);"
                )
            }
        }
    }

    fn write_options(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        var options = {{")?;
        writeln!(f, "          title: {},", js_string(&self.title))?;
        writeln!(
            f,
            "          hAxis: {{ title: 'Time', titleTextStyle: {{color: '#333'}} }},"
        )?;

        if self.two_axes() {
            writeln!(f, "          series: {{ 1: {{ targetAxisIndex: 1 }} }},")?;
        }

        f.write_str(EXPLORER)?;

        if matches!(self.plot, Plot::Double { .. }) {
            writeln!(f, "          interpolateNulls: true")?;
        }

        writeln!(f, "        }};")
    }

    fn write_form(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    <section>")?;
        writeln!(f, "    <form>")?;
        writeln!(
            f,
            r#"      <input type="hidden" name="title" value="{}">"#,
            html_attr(&self.title)
        )?;
        writeln!(f, r#"      <label for="sample">Resample</label>"#)?;
        writeln!(
            f,
            r#"      <input type="text" placeholder="5m" name="sample" id="sample" value="{}">"#,
            html_attr(&self.sample)
        )?;

        for (caption, value) in PRESETS {
            writeln!(
                f,
                r#"      <button onClick="sample.value='{value}'; this.form.submit()" type="button">{caption}</button>"#
            )?;
        }

        writeln!(
            f,
            r#"      <label><input type="checkbox" name="cumulative" value="1" onChange="this.form.submit()"{}> cumulative</label>"#,
            if self.cumulative { " checked" } else { "" }
        )?;
        writeln!(f, r#"      <button type="submit">Apply</button>"#)?;
        writeln!(f, "    </form>")?;
        writeln!(f, "    </section>")
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEAD)?;
        self.write_data(f)?;
        writeln!(f)?;
        self.write_options(f)?;
        writeln!(f)?;
        writeln!(
            f,
            "        var chart = new google.visualization.AreaChart(document.getElementById('chart_div'));"
        )?;
        writeln!(f, "        chart.draw(data, options);")?;
        writeln!(f, "      }}")?;
        writeln!(f, "    </script>")?;
        writeln!(f, "  </head>")?;
        writeln!(f, "  <body>")?;
        writeln!(
            f,
            r#"    <div id="chart_div" style="width: 100%; height: 500px;"></div>"#
        )?;
        self.write_form(f)?;
        writeln!(f, "  </body>")?;
        writeln!(f, "</html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn buckets(pairs: &[(i64, u64)]) -> Vec<Bucket> {
        pairs
            .iter()
            .map(|&(start, count)| Bucket { start, count })
            .collect()
    }

    #[test]
    fn render_single() {
        let chart = Chart::single(
            "requests",
            Series::new("count", buckets(&[(1_000, 3), (2_000, 5)])),
        );

        let page = render(&chart);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("['Time', \"count\"],"));
        assert!(page.contains("[new Date(1000), 3],"));
        assert!(page.contains("[new Date(2000), 5],"));
        assert!(page.contains("title: \"requests\","));
        assert!(!page.contains("targetAxisIndex"));
        assert!(!page.contains("join(data1, data2"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn render_double_two_axes() {
        let chart = Chart::double(
            "",
            Series::new("big", buckets(&[(0, 100), (1_000, 120), (2_000, 90)])),
            Series::new("small", buckets(&[(0, 5), (1_000, 4), (2_000, 6)])),
        );

        assert!(chart.two_axes());

        let page = render(&chart);
        assert!(page.contains("data1.addColumn('number', \"big\");"));
        assert!(page.contains("data2.addColumn('number', \"small\");"));
        assert!(page.contains("join(data1, data2, 'full', [[0, 0]], [1], [1])"));
        assert!(page.contains("targetAxisIndex: 1"));
        assert!(page.contains("interpolateNulls: true"));
    }

    #[test]
    fn render_double_shared_axis() {
        let chart = Chart::double(
            "",
            Series::new("a", buckets(&[(0, 10), (1_000, 12), (2_000, 9)])),
            Series::new("b", buckets(&[(0, 8), (1_000, 9), (2_000, 11)])),
        );

        assert!(!chart.two_axes());
        assert!(!render(&chart).contains("targetAxisIndex"));
    }

    #[test]
    fn render_escapes_title_and_labels() {
        let chart = Chart::single(
            "</script><script>alert('x')</script>",
            Series::new("a\"b", vec![]),
        )
        .with_params("\"><b>", false);

        let page = render(&chart);

        assert!(!page.contains("</script><script>"));
        assert!(page.contains("\\u003c/script\\u003e"));
        assert!(page.contains("['Time', \"a\\\"b\"],"));
        assert!(page.contains(r#"value="&lt;/script&gt;&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;""#));
        assert!(page.contains(r#"value="&quot;&gt;&lt;b&gt;""#));
    }

    #[test]
    fn render_form_keeps_params() {
        let chart = Chart::single("t", Series::new("count", vec![])).with_params("1h", true);
        let page = render(&chart);

        assert!(page.contains(r#"name="sample" id="sample" value="1h""#));
        assert!(page.contains(r#"onChange="this.form.submit()" checked>"#));
        assert!(page.contains(r#"<input type="hidden" name="title" value="t">"#));
        assert!(page.contains("sample.value='168h'"));
    }
}
