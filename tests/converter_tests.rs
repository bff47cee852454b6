//! Range converter integration tests

use konversi_nilai::core::{convert, convert_text, join_values, parse_number, split_input};
use konversi_nilai::error::KonversiError;
use konversi_nilai::types::ConversionRange;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// LINEAR MAPPING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_extremes_map_to_bounds() {
    let range = ConversionRange::new(85, 95);
    let conversion = convert_text("40, 55, 70, 100", range).unwrap();
    let values = conversion.values();

    assert_eq!(values.first(), Some(&85));
    assert_eq!(values.last(), Some(&95));
    assert!(values.iter().all(|v| (range.min..=range.max).contains(v)));
}

#[test]
fn test_interior_values_are_rounded() {
    let conversion = convert_text("0, 1, 3", ConversionRange::new(0, 10)).unwrap();
    // 1/3 * 10 = 3.33
    assert_eq!(conversion.values(), vec![0, 3, 10]);
}

#[test]
fn test_order_follows_input_not_magnitude() {
    let conversion = convert_text("100, 0, 50", ConversionRange::new(0, 100)).unwrap();
    assert_eq!(conversion.values(), vec![100, 0, 50]);
}

#[test]
fn test_monotonic_for_sorted_input() {
    let entries: Vec<String> = (0..25).map(|i| (i * i).to_string()).collect();
    let conversion = convert(&entries, ConversionRange::new(85, 95)).unwrap();
    let values = conversion.values();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_negative_and_fractional_inputs() {
    let conversion = convert_text("-10, -5.5, 0", ConversionRange::new(-20, 20)).unwrap();
    // -5.5 sits at 45% of the span: -20 + 0.45 * 40 = -2
    assert_eq!(conversion.values(), vec![-20, -2, 20]);
}

#[test]
fn test_all_equal_inputs_map_to_min() {
    let conversion = convert_text("7, 7, 7", ConversionRange::new(85, 95)).unwrap();
    assert_eq!(conversion.values(), vec![85, 85, 85]);

    let single = convert_text("42", ConversionRange::new(1, 2)).unwrap();
    assert_eq!(single.values(), vec![1]);
}

// ═══════════════════════════════════════════════════════════════════════════
// PARSING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_non_numeric_entries_are_skipped_by_position() {
    let conversion = convert_text("10, abc, 20, , 30", ConversionRange::new(0, 100)).unwrap();
    assert_eq!(conversion.values(), vec![0, 50, 100]);
    assert_eq!(conversion.skipped(), vec![1, 3]);
    assert_eq!(conversion.len(), 5);
}

#[test]
fn test_split_keeps_entry_whitespace() {
    assert_eq!(split_input("1, 2 ,3"), vec!["1", " 2 ", "3"]);
    assert!(split_input("").is_empty());
}

#[test]
fn test_parse_number_rejects_non_finite() {
    assert_eq!(parse_number(" 3.5 "), Some(3.5));
    assert_eq!(parse_number("NaN"), None);
    assert_eq!(parse_number("inf"), None);
    assert_eq!(parse_number("Infinity"), None);
}

#[test]
fn test_trailing_text_after_number_is_ignored() {
    assert_eq!(parse_number("12a"), Some(12.0));
    let conversion = convert_text("70 poin, 80, 90", ConversionRange::new(0, 100)).unwrap();
    assert_eq!(conversion.values(), vec![0, 50, 100]);
    assert!(conversion.skipped().is_empty());
}

#[test]
fn test_largest_maps_to_max_for_extreme_inputs() {
    let huge = convert(&["-1e308", "1e308"], ConversionRange::new(0, 100)).unwrap();
    assert_eq!(huge.values(), vec![0, 100]);

    let max = (1_i64 << 60) + 1;
    let wide = convert(&["1", "2"], ConversionRange::new(0, max)).unwrap();
    assert_eq!(wide.values(), vec![0, max]);
}

// ═══════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_no_numbers_is_invalid_input() {
    for text in ["", "   ", "a, b, c", ", ,"] {
        assert!(
            matches!(
                convert_text(text, ConversionRange::new(0, 100)),
                Err(KonversiError::InvalidInput)
            ),
            "expected InvalidInput for {:?}",
            text
        );
    }
}

#[test]
fn test_min_not_below_max_is_invalid_range() {
    assert!(matches!(
        convert_text("1, 2", ConversionRange::new(95, 95)),
        Err(KonversiError::InvalidRange { min: 95, max: 95 })
    ));
    assert!(matches!(
        convert_text("1, 2", ConversionRange::new(95, 85)),
        Err(KonversiError::InvalidRange { .. })
    ));
}

#[test]
fn test_invalid_input_reported_before_invalid_range() {
    assert!(matches!(
        convert_text("x", ConversionRange::new(10, 0)),
        Err(KonversiError::InvalidInput)
    ));
}

#[test]
fn test_join_values_display() {
    assert_eq!(join_values(&[85, 90, 95]), "85, 90, 95");
    assert_eq!(join_values(&[]), "");
}
