//! Currency text normalization and discount math.

/// Reduce raw price text such as `"$ 1.299.900"` to its digits.
///
/// Empty input (or input without digits) becomes `"0"`.
pub fn normalize_price(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        "0".to_string()
    } else {
        digits
    }
}

/// Percentage saved going from `original` to `current`, formatted `"N%"`.
///
/// Returns an empty string when both normalized strings are equal, when either
/// is not a number, or when the original price is zero.
pub fn compute_discount(original: &str, current: &str) -> String {
    if original == current {
        return String::new();
    }

    let (Ok(original), Ok(current)) = (original.parse::<f64>(), current.parse::<f64>()) else {
        return String::new();
    };
    if original == 0.0 {
        return String::new();
    }

    let percent = ((original - current) / original * 100.0).round_ties_even();
    if !percent.is_finite() {
        return String::new();
    }
    format!("{}%", percent as i64)
}
