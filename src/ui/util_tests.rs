#![allow(clippy::unwrap_used)]

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_simple() {
    assert_eq!(format_amount(4.5), "$4.50");
}

#[test]
fn test_format_zero() {
    assert_eq!(format_amount(0.0), "$0.00");
}

#[test]
fn test_format_negative() {
    assert_eq!(format_amount(-1.5), "-$1.50");
}

#[test]
fn test_format_thousands() {
    assert_eq!(format_amount(1234567.89), "$1,234,567.89");
}

#[test]
fn test_format_rounding() {
    assert_eq!(format_amount(2.005), "$2.00");
    assert_eq!(format_amount(2.999), "$3.00");
}

#[test]
fn test_format_nan_renders_literally() {
    assert_eq!(format_amount(f64::NAN), "NaN");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 1);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_down_at_end_is_noop() {
    let (mut index, mut scroll) = (9, 5);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_down_advances_page() {
    let (mut index, mut scroll) = (4, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 5);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_up_clamps_at_zero() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!(index, 9);
    assert_eq!(scroll, 6);
}

#[test]
fn test_scroll_to_top() {
    let (mut index, mut scroll) = (7, 4);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}
