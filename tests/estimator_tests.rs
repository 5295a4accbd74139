//! Width estimation tests
//!
//! Tests for the sampling bounds, the margin/floor policy, measurement
//! caching, and font changes.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{build, vp, FakeMeasurer, TableValues};
use gridfit::{EstimatorConfig, ResizeStrategy};
use test_case::test_case;

fn lazy_config() -> EstimatorConfig {
    EstimatorConfig {
        initial_visible_row_sample_count: 20,
        minimum_column_width: 40.0,
        cell_spacing_margin: 10.0,
        ..EstimatorConfig::default()
    }
}

fn full_config(total: u32) -> EstimatorConfig {
    EstimatorConfig {
        resize_strategy: ResizeStrategy::Full,
        total_row_count: Some(total),
        minimum_column_width: 40.0,
        cell_spacing_margin: 10.0,
        ..EstimatorConfig::default()
    }
}

#[test]
fn test_widest_value_plus_margin() {
    let measurer = FakeMeasurer::with_widths(&[("a", 12.0), ("bb", 45.0), ("c", 8.0)]);
    let values = TableValues::single_column(&[Some("a"), Some("bb"), Some("c")]);
    let gw = build(lazy_config(), measurer, values);

    assert_eq!(gw.column_width(0), 55.0, "45 + margin 10");
}

#[test]
fn test_fractional_widths_round_up_before_margin() {
    let measurer = FakeMeasurer::with_widths(&[("x", 45.3)]);
    let values = TableValues::single_column(&[Some("x")]);
    let gw = build(lazy_config(), measurer, values);

    assert_eq!(gw.column_width(0), 56.0, "ceil(45.3) + 10");
}

#[test]
fn test_never_below_minimum_width() {
    let measurer = FakeMeasurer::with_widths(&[("a", 3.0)]);
    let values = TableValues::single_column(&[Some("a")]);
    let gw = build(lazy_config(), measurer, values);

    assert_eq!(gw.column_width(0), 40.0, "3 + 10 stays under the floor");
}

#[test]
fn test_all_null_column_returns_exactly_the_minimum() {
    let values = TableValues::single_column(&[None, None, None]);
    let gw = build(lazy_config(), FakeMeasurer::new(), values);

    assert_eq!(gw.column_width(0), 40.0);
}

#[test]
fn test_missing_column_returns_exactly_the_minimum() {
    let values = TableValues::single_column(&[Some("wide wide wide")]);
    let gw = build(lazy_config(), FakeMeasurer::new(), values);

    // Column 7 has no values at all
    assert_eq!(gw.column_width(7), 40.0);
}

#[test]
fn test_empty_sample_range_returns_the_minimum() {
    let measurer = FakeMeasurer::with_widths(&[("x", 500.0)]);
    let values = TableValues::single_column(&[Some("x"), Some("x")]);
    let mut gw = build(lazy_config(), measurer, values);

    // row_start 25 is at the sampling bound max(25, 20) = 25: nothing sampled
    gw.on_viewport_change(0.0, vp(25, 25, 0, 3));
    assert_eq!(gw.column_width(0), 40.0);
}

#[test]
fn test_zero_width_values_still_count() {
    let config = EstimatorConfig {
        minimum_column_width: 5.0,
        cell_spacing_margin: 10.0,
        ..EstimatorConfig::default()
    };
    // "" measures to 0; the margin alone beats the 5px floor
    let values = TableValues::single_column(&[Some("")]);
    let gw = build(config, FakeMeasurer::new(), values);

    assert_eq!(gw.column_width(0), 10.0);
}

#[test]
fn test_lazy_bound_is_the_larger_of_stop_and_sample_count() {
    let config = EstimatorConfig {
        initial_visible_row_sample_count: 5,
        minimum_column_width: 40.0,
        ..EstimatorConfig::default()
    };
    let measurer = FakeMeasurer::with_widths(&[("in", 100.0), ("out", 500.0)]);
    // Rows 0..=3 visible, rows 4 and 5 past the viewport
    let values = TableValues::single_column(&[
        Some("a"),
        Some("a"),
        Some("a"),
        Some("a"),
        Some("in"),
        Some("out"),
    ]);
    let mut gw = build(config, measurer, values);

    gw.on_viewport_change(0.0, vp(0, 4, 0, 3));
    // Bound is max(4, 5) = 5: row 4 sampled, row 5 not
    assert_eq!(gw.column_width(0), 110.0);
}

#[test]
fn test_rows_before_viewport_start_are_not_sampled() {
    let measurer = FakeMeasurer::with_widths(&[("skipped", 500.0)]);
    let values = TableValues::single_column(&[Some("skipped"), Some("ab"), Some("ab")]);
    let mut gw = build(lazy_config(), measurer, values);

    gw.on_viewport_change(0.0, vp(1, 3, 0, 3));
    assert_eq!(gw.column_width(0), 40.0, "only 6px-per-char rows remain");
}

#[test]
fn test_full_strategy_samples_past_the_viewport() {
    let mut rows: Vec<Option<&str>> = vec![None; 50];
    rows[40] = Some("deep");
    let measurer = FakeMeasurer::with_widths(&[("deep", 200.0)]);
    let gw = build(full_config(50), measurer, TableValues::single_column(&rows));

    assert_eq!(gw.column_width(0), 210.0, "row 40 is past any viewport");
}

#[test]
fn test_full_strategy_stops_at_total_row_count() {
    let mut rows: Vec<Option<&str>> = vec![None; 60];
    rows[55] = Some("beyond");
    let measurer = FakeMeasurer::with_widths(&[("beyond", 500.0)]);
    let gw = build(full_config(50), measurer, TableValues::single_column(&rows));

    assert_eq!(gw.column_width(0), 40.0, "row 55 is past totalRowCount");
}

#[test]
fn test_unavailable_surface_degrades_to_the_minimum() {
    let measurer = FakeMeasurer::with_widths(&[("x", 500.0)]);
    let availability = measurer.availability_handle();
    let values = TableValues::single_column(&[Some("x")]);
    let gw = build(lazy_config(), measurer, values);

    availability.set(false);
    assert_eq!(gw.column_width(0), 40.0);

    // Surface comes back: the skipped sample was not cached as zero
    availability.set(true);
    assert_eq!(gw.column_width(0), 510.0);
}

#[test]
fn test_repeated_queries_reuse_cached_measurements() {
    let measurer = FakeMeasurer::new();
    let calls = measurer.calls_handle();
    let values = TableValues::single_column(&[Some("a"), Some("bb"), Some("ccc")]);
    let gw = build(lazy_config(), measurer, values);

    let first = gw.column_width(0);
    let measured = calls.get();
    assert_eq!(measured, 3, "one surface call per sampled value");

    assert_eq!(gw.column_width(0), first);
    assert_eq!(calls.get(), measured, "second query is all cache hits");
    assert_eq!(gw.measure_cache_len(), 3);
}

#[test]
fn test_font_change_affects_subsequent_queries() {
    let measurer = FakeMeasurer::with_widths(&[("x", 45.0)]).scaled("16px serif", 2.0);
    let values = TableValues::single_column(&[Some("x")]);
    let gw = build(lazy_config(), measurer, values);

    assert_eq!(gw.column_width(0), 55.0);
    gw.set_font("16px serif");
    assert_eq!(gw.column_width(0), 100.0, "90 + margin under the new font");
}

#[test]
fn test_font_change_does_not_touch_the_cached_viewport() {
    let mut gw = build(
        lazy_config(),
        FakeMeasurer::new(),
        TableValues::empty(),
    );
    gw.on_viewport_change(0.0, vp(3, 9, 1, 4));
    gw.set_font("16px serif");
    assert_eq!(gw.viewport(), vp(3, 9, 1, 4));
}

#[test_case(&[Some("ab")], 22.0 ; "two chars at six px plus margin")]
#[test_case(&[Some("abcdefgh")], 58.0 ; "eight chars at six px plus margin")]
#[test_case(&[Some("ab"), None, Some("abcd")], 34.0 ; "null rows are skipped")]
fn test_per_char_widths(rows: &[Option<&str>], expected: f64) {
    let config = EstimatorConfig {
        minimum_column_width: 20.0,
        cell_spacing_margin: 10.0,
        ..EstimatorConfig::default()
    };
    let gw = build(
        config,
        FakeMeasurer::new(),
        TableValues::single_column(rows),
    );
    assert_eq!(gw.column_width(0), expected);
}
