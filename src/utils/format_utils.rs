//! Number formatting utilities
//!
//! Values shown to users are printed the way a form field displays them:
//! six significant digits, trailing zeros dropped, switching to exponent
//! notation for very large or very small magnitudes.

/// Significant digits shown for floating point values
const DISPLAY_PRECISION: i32 = 6;

/// Format a number with six significant digits, like C's `%g`
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Exponent after rounding to the displayed precision
    let scientific = format!("{:.*e}", (DISPLAY_PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= DISPLAY_PRECISION {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (DISPLAY_PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Format a value pair as "a x b"
pub fn format_pair(a: f64, b: f64) -> String {
    format!("{} x {}", format_number(a), format_number(b))
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
