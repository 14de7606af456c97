//! Conversions between numbers and display text.
//!
//! The display always holds a string that parses back into the value it
//! shows, so results are rendered without separators. Shells that want
//! thousands separators apply [`group_digits`] on top.

/// Magnitude below which results switch to exponent notation.
const SMALL_MAGNITUDE: f64 = 1e-4;

/// Render a number as display text.
///
/// Integral values below 1e15 render without a fractional part. Values
/// below 1e-4 in magnitude use the shortest exponent form that reads back
/// to the same `f64`, other values keep up to 10 fractional digits with
/// trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        // Also folds -0 into "0".
        return "0".to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    if value.abs() >= 1e15 {
        return format!("{value}");
    }
    if value.abs() < SMALL_MAGNITUDE {
        return format!("{value:e}");
    }

    let formatted = format!("{value:.10}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Read the display as a number.
///
/// Partial entries such as `"12."` are valid. Text that is not a number
/// reads as zero.
pub fn parse_display(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

/// Insert thousands separators into the integer part of a display string.
///
/// Text that is not a plain decimal (NaN, exponent notation, the error
/// sentinel) is returned unchanged.
pub fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    if int_part.is_empty()
        || !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().skip(1).all(|c| c.is_ascii_digit())
    {
        return text.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}{frac_part}")
}
