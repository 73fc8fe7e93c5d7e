use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;

use super::traits::{ChartRenderer, HoverHandler};
use crate::errors::CoreError;
use crate::models::chart::{format_thousands, ChartSpec};

const DEFAULT_WIDTH: usize = 72;
const DEFAULT_HEIGHT: usize = 16;

/// Plain-text line chart written to any `Write` sink (usually stdout).
///
/// Hovering is driven by [`TextChartRenderer::run_interactive`]: every
/// input line is a cursor position on the time axis.
pub struct TextChartRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
    handler: Option<HoverHandler>,
}

impl<W: Write> TextChartRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_size(out, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Plot area size in characters (at least 2×2).
    pub fn with_size(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width: width.max(2),
            height: height.max(2),
            handler: None,
        }
    }

    /// Run the hover handler for one cursor position.
    pub fn hover(&self, cursor: NaiveDateTime) -> Option<String> {
        self.handler.as_ref().and_then(|h| h(cursor))
    }

    /// Read cursor positions line by line until EOF or `q`/`quit`,
    /// printing the tooltip for each. Lookup misses print nothing;
    /// unparsable lines are skipped with a warning.
    ///
    /// Returns the number of tooltips shown.
    pub fn run_interactive<R: BufRead>(&mut self, input: R) -> Result<usize, CoreError> {
        let mut shown = 0;
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                break;
            }

            let Some(cursor) = parse_cursor(line) else {
                warn!("Ignoring unrecognized cursor position '{line}' (expected YYYY-MM-DD [HH:MM[:SS]])");
                continue;
            };

            if let Some(text) = self.hover(cursor) {
                writeln!(self.out, "{text}\n")?;
                shown += 1;
            }
        }
        self.out.flush()?;
        Ok(shown)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChartRenderer<W> {
    fn plot_series(&mut self, chart: &ChartSpec) -> Result<(), CoreError> {
        writeln!(self.out, "{}", chart.title)?;
        writeln!(self.out, "{}", chart.y_label)?;

        let points = &chart.points;
        if points.is_empty() {
            writeln!(self.out, "(no data)")?;
            return Ok(());
        }

        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
                (lo.min(*v), hi.max(*v))
            });
        let span = if max > min { max - min } else { 1.0 };

        let cols = self.width.min(points.len());
        let mut grid = vec![vec![' '; cols]; self.height];
        for col in 0..cols {
            let idx = if cols == 1 {
                0
            } else {
                col * (points.len() - 1) / (cols - 1)
            };
            let value = points[idx].1;
            let row = ((max - value) / span * (self.height - 1) as f64).round() as usize;
            grid[row.min(self.height - 1)][col] = '*';
        }

        let max_label = format_thousands(max, 2);
        let min_label = format_thousands(min, 2);
        let label_width = max_label.len().max(min_label.len());

        for (r, row) in grid.iter().enumerate() {
            let label = if r == 0 {
                max_label.as_str()
            } else if r == self.height - 1 {
                min_label.as_str()
            } else {
                ""
            };
            let line: String = row.iter().collect();
            writeln!(self.out, "{label:>label_width$} |{}", line.trim_end())?;
        }
        writeln!(self.out, "{:>label_width$} +{}", "", "-".repeat(cols))?;

        let first = format_date(points[0].0);
        let last = format_date(points[points.len() - 1].0);
        let gap = cols.saturating_sub(first.len() + last.len()).max(1);
        writeln!(self.out, "{:>label_width$}  {first}{}{last}", "", " ".repeat(gap))?;
        writeln!(self.out, "{} / {}", chart.x_label, chart.legend)?;
        Ok(())
    }

    fn register_hover_handler(&mut self, handler: HoverHandler) {
        self.handler = Some(handler);
    }

    fn show(&mut self) -> Result<(), CoreError> {
        self.out.flush()?;
        Ok(())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DD HH:MM:SS` (or with `T`).
pub fn parse_cursor(input: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    let input = input.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
