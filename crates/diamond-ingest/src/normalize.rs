// Field normalization: raw spreadsheet strings to numbers.
//
// The exports are maintained by hand and use several placeholder
// conventions, so every conversion here is total: anything that is not a
// number becomes zero.

/// Placeholder strings the exports use for "no value".
const SENTINELS: &[&str] = &["-", "N/A"];

/// Convert a raw field to a float.
///
/// Blank, `"-"` and `"N/A"` give 0. Otherwise the longest leading numeric
/// prefix is parsed (`"85.71%"` gives 85.71, `"0-0"` gives 0); no prefix or
/// a non-finite value gives 0.
pub fn normalize_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || SENTINELS.contains(&trimmed) {
        return 0.0;
    }
    match numeric_prefix(trimmed).parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Convert a raw field to a counting stat.
///
/// Only the leading `[+-]digits` prefix counts, as an integer parse reads
/// it: `"7.9"` gives 7 and `"1e20"` gives 1. Negatives clamp to 0 and
/// oversized values saturate at `u32::MAX`.
pub fn normalize_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || SENTINELS.contains(&trimmed) {
        return 0;
    }
    let prefix = integer_prefix(trimmed);
    if prefix.starts_with('-') {
        return 0;
    }
    let digits = prefix.trim_start_matches('+');
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// The longest prefix of `s` shaped like `[+-]digits`, or `""`.
fn integer_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        ""
    } else {
        &s[..start + digits]
    }
}

/// The longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
/// Returns `""` when `s` does not start with a number.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let frac_digits = j - (end + 1);
        if digits + frac_digits > 0 {
            digits += frac_digits;
            end = j;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_normalize_to_zero() {
        for raw in ["", "   ", "-", "N/A", " N/A ", "abc", "--", ".", "e5", "#DIV/0!"] {
            assert_eq!(normalize_number(raw), 0.0, "raw value {raw:?}");
            assert_eq!(normalize_count(raw), 0, "raw value {raw:?}");
        }
    }

    #[test]
    fn plain_numbers_parse() {
        assert!((normalize_number("0.300") - 0.300).abs() < f64::EPSILON);
        assert!((normalize_number(" 7.1 ") - 7.1).abs() < f64::EPSILON);
        assert!((normalize_number(".913") - 0.913).abs() < f64::EPSILON);
        assert!((normalize_number("-2.5") + 2.5).abs() < f64::EPSILON);
        assert_eq!(normalize_number("1.5e2"), 150.0);
        assert_eq!(normalize_count("24"), 24);
    }

    #[test]
    fn numeric_prefix_is_used_for_trailing_garbage() {
        assert!((normalize_number("85.71%") - 85.71).abs() < 1e-9);
        assert_eq!(normalize_number("0-0"), 0.0);
        assert_eq!(normalize_number("3-1"), 3.0);
        assert_eq!(normalize_number("12abc"), 12.0);
        // An exponent marker with no digits is not part of the number
        assert_eq!(normalize_number("4e"), 4.0);
    }

    #[test]
    fn non_finite_values_normalize_to_zero() {
        assert_eq!(normalize_number("NaN"), 0.0);
        assert_eq!(normalize_number("inf"), 0.0);
        assert_eq!(normalize_number("Infinity"), 0.0);
        assert_eq!(normalize_number("1e999"), 0.0);
    }

    #[test]
    fn counts_truncate_and_clamp() {
        assert_eq!(normalize_count("7.9"), 7);
        assert_eq!(normalize_count("-3"), 0);
        assert_eq!(normalize_count("-0"), 0);
        assert_eq!(normalize_count("+12"), 12);
        assert_eq!(normalize_count("99999999999"), u32::MAX);
    }

    #[test]
    fn counts_ignore_fraction_and_exponent() {
        assert_eq!(normalize_count("1e20"), 1);
        assert_eq!(normalize_count("2.5e3"), 2);
        assert_eq!(normalize_count(".9"), 0);
        assert_eq!(normalize_count("12 runs"), 12);
        // The float reading of the same text is unaffected
        assert_eq!(normalize_number("1e20"), 1e20);
    }
}
