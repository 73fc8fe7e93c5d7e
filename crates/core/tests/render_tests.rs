// ═══════════════════════════════════════════════════════════════════
// Render Tests — TextChartRenderer, cursor parsing, hover loop
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;

use pbr_chart_core::models::chart::ChartSpec;
use pbr_chart_core::render::text::{parse_cursor, TextChartRenderer};
use pbr_chart_core::render::traits::{ChartRenderer, HoverHandler};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn spec(points: Vec<(NaiveDate, f64)>) -> ChartSpec {
    ChartSpec {
        title: "Meta Platforms, Inc. (META) 株価 & PBR".into(),
        x_label: "日付".into(),
        y_label: "終値 (USD)".into(),
        legend: "終値 (USD)".into(),
        points,
    }
}

fn output(renderer: TextChartRenderer<Vec<u8>>) -> String {
    String::from_utf8(renderer.into_inner()).unwrap()
}

/// Echoes the cursor date back, misses anything before 2024.
fn echo_handler() -> HoverHandler {
    Box::new(|cursor: NaiveDateTime| {
        (cursor.date() >= d("2024-01-01")).then(|| format!("hover {}", cursor.format("%Y-%m-%d %H:%M")))
    })
}

// ═══════════════════════════════════════════════════════════════════
// Cursor parsing
// ═══════════════════════════════════════════════════════════════════

mod cursor {
    use super::*;

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(parse_cursor("2024-03-10"), Some(dt("2024-03-10 00:00:00")));
    }

    #[test]
    fn date_and_time() {
        assert_eq!(parse_cursor("2024-03-10 13:45"), Some(dt("2024-03-10 13:45:00")));
        assert_eq!(parse_cursor("2024-03-10T13:45"), Some(dt("2024-03-10 13:45:00")));
        assert_eq!(parse_cursor("2024-03-10 13:45:30"), Some(dt("2024-03-10 13:45:30")));
        assert_eq!(parse_cursor("2024-03-10T13:45:30"), Some(dt("2024-03-10 13:45:30")));
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(parse_cursor("  2024-03-10  "), Some(dt("2024-03-10 00:00:00")));
    }

    #[test]
    fn garbage_rejected() {
        assert_eq!(parse_cursor("yesterday"), None);
        assert_eq!(parse_cursor("2024-13-01"), None);
        assert_eq!(parse_cursor(""), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Plotting
// ═══════════════════════════════════════════════════════════════════

mod plot {
    use super::*;

    #[test]
    fn writes_title_labels_and_range() {
        let mut renderer = TextChartRenderer::with_size(Vec::new(), 20, 5);
        renderer
            .plot_series(&spec(vec![
                (d("2024-03-08"), 100.0),
                (d("2024-03-12"), 1234.5),
                (d("2024-03-13"), 500.0),
            ]))
            .unwrap();
        renderer.show().unwrap();
        let text = output(renderer);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Meta Platforms, Inc. (META) 株価 & PBR"));
        assert_eq!(lines.next(), Some("終値 (USD)"));
        assert!(text.contains("1,234.50 |"));
        assert!(text.contains("100.00 |"));
        assert!(text.contains("2024-03-08"));
        assert!(text.contains("2024-03-13"));
        assert!(text.ends_with("日付 / 終値 (USD)\n"));
    }

    #[test]
    fn one_mark_per_column() {
        let points: Vec<_> = (0..10)
            .map(|i| (d("2024-01-01") + chrono::Duration::days(i), i as f64))
            .collect();
        let mut renderer = TextChartRenderer::with_size(Vec::new(), 10, 4);
        renderer.plot_series(&spec(points)).unwrap();
        let text = output(renderer);
        assert_eq!(text.matches('*').count(), 10);
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let mut renderer = TextChartRenderer::with_size(Vec::new(), 8, 4);
        renderer
            .plot_series(&spec(vec![(d("2024-03-08"), 5.0), (d("2024-03-11"), 5.0)]))
            .unwrap();
        let text = output(renderer);
        assert_eq!(text.matches('*').count(), 2);
    }

    #[test]
    fn single_point() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.plot_series(&spec(vec![(d("2024-03-08"), 42.0)])).unwrap();
        let text = output(renderer);
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn empty_series_says_no_data() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.plot_series(&spec(vec![])).unwrap();
        let text = output(renderer);
        assert!(text.contains("(no data)"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn tiny_sizes_are_clamped() {
        let mut renderer = TextChartRenderer::with_size(Vec::new(), 0, 0);
        renderer
            .plot_series(&spec(vec![(d("2024-03-08"), 1.0), (d("2024-03-11"), 2.0)]))
            .unwrap();
        assert_eq!(output(renderer).matches('*').count(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Hover loop
// ═══════════════════════════════════════════════════════════════════

mod hover {
    use super::*;

    #[test]
    fn no_handler_no_tooltip() {
        let renderer = TextChartRenderer::new(Vec::new());
        assert_eq!(renderer.hover(dt("2024-03-10 00:00:00")), None);
    }

    #[test]
    fn registered_handler_is_used() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.register_hover_handler(echo_handler());
        assert_eq!(
            renderer.hover(dt("2024-03-10 12:30:00")),
            Some("hover 2024-03-10 12:30".to_string())
        );
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.register_hover_handler(echo_handler());
        renderer.register_hover_handler(Box::new(|_| Some("second".to_string())));
        assert_eq!(renderer.hover(dt("2024-03-10 00:00:00")), Some("second".into()));
    }

    #[test]
    fn interactive_prints_hits_and_counts_them() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.register_hover_handler(echo_handler());

        let input = Cursor::new("2024-03-10\n\nnot a date\n1999-01-01\n2024-03-11 09:15\n");
        let shown = renderer.run_interactive(input).unwrap();
        assert_eq!(shown, 2);

        let text = output(renderer);
        assert_eq!(text, "hover 2024-03-10 00:00\n\nhover 2024-03-11 09:15\n\n");
    }

    #[test]
    fn quit_stops_reading() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.register_hover_handler(echo_handler());

        let input = Cursor::new("2024-03-10\nQ\n2024-03-11\n");
        assert_eq!(renderer.run_interactive(input).unwrap(), 1);

        let input = Cursor::new("quit\n2024-03-11\n");
        assert_eq!(renderer.run_interactive(input).unwrap(), 0);
    }

    #[test]
    fn empty_input() {
        let mut renderer = TextChartRenderer::new(Vec::new());
        renderer.register_hover_handler(echo_handler());
        assert_eq!(renderer.run_interactive(Cursor::new("")).unwrap(), 0);
    }
}
