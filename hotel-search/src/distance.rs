//! Parsing of localized numbers: decimal comma, trailing unit word.

/// Parses a user- or API-supplied decimal, accepting `,` as the decimal separator. Rejects NaN and infinities.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

/// Normalizes a landmark distance such as `"1,3 км"` or `"0,8 km"` to kilometres.
pub fn parse_distance_km(text: &str) -> Option<f64> {
    let number = text.split_whitespace().next()?;
    let number = number.trim_end_matches(|c: char| c.is_alphabetic() || c == '.');
    parse_decimal(number)
}
