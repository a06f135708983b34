//! Rupiah formatting and lenient parsing of user-entered amounts.

use serde::{Deserialize, Deserializer};

/// Formats a rupiah amount rounded to whole units with `.` thousands separators.
///
/// # Examples
///
/// ```
/// use kost_sim::currency::format_idr;
///
/// assert_eq!(format_idr(3_500_000.4), "3.500.000");
/// assert_eq!(format_idr(-1_250.0), "-1.250");
/// assert_eq!(format_idr(f64::NAN), "0");
/// ```
pub fn format_idr(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parses a user-entered rupiah amount.
///
/// Accepts plain digits with `.` thousands separators (`"3.500.000"`), a `,`
/// decimal separator (`"3,5jt"`), and the suffixes `jt`/`m` (million) and `b`
/// (billion). With a suffix and no comma, a single `.` is read as the decimal
/// point (`"2.5jt"`). Anything unparsable yields 0.
///
/// # Examples
///
/// ```
/// use kost_sim::currency::parse_idr;
///
/// assert_eq!(parse_idr("3.500.000"), 3_500_000.0);
/// assert_eq!(parse_idr("3,5jt"), 3_500_000.0);
/// assert_eq!(parse_idr("1b"), 1_000_000_000.0);
/// assert_eq!(parse_idr("abc"), 0.0);
/// ```
pub fn parse_idr(input: &str) -> f64 {
    let clean = input.trim().to_lowercase();
    let (body, multiplier) = if let Some(rest) = clean.strip_suffix("jt") {
        (rest, 1_000_000.0)
    } else if let Some(rest) = clean.strip_suffix('m') {
        (rest, 1_000_000.0)
    } else if let Some(rest) = clean.strip_suffix('b') {
        (rest, 1_000_000_000.0)
    } else {
        (clean.as_str(), 1.0)
    };

    let has_suffix = multiplier > 1.0;
    let normalized: String = if body.contains(',') {
        body.replace('.', "").replace(',', ".")
    } else if has_suffix && body.matches('.').count() == 1 {
        body.to_string()
    } else {
        body.replace('.', "")
    };
    let numeric: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match numeric.parse::<f64>() {
        Ok(n) if n.is_finite() => {
            if has_suffix {
                (n * multiplier).round()
            } else {
                n
            }
        }
        _ => 0.0,
    }
}

/// Deserializes an amount given either as a number or as text for [`parse_idr`].
///
/// # Errors
///
/// Fails only when the value is neither a number nor a string.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Number(n) => n,
        Amount::Text(s) => parse_idr(&s),
    })
}
