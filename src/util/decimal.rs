use rust_decimal::Decimal;

/// Parses a statement-formatted number into an exact Decimal.
///
/// Accepts thousands separators ("1,23,456.78" or "1,234.50"), a leading
/// minus, and accounting-style parentheses for negatives ("(500.00)").
/// A dangling close paren is also tolerated.
///
/// Never goes through f64.
pub fn parse_cas_decimal(s: &str) -> Result<Decimal, String> {
    let trimmed = s.trim();
    let (negative, body) = if let Some(inner) = trimmed.strip_prefix('(') {
        (true, inner.strip_suffix(')').unwrap_or(inner))
    } else if let Some(inner) = trimmed.strip_prefix('-') {
        (true, inner)
    } else {
        (false, trimmed.strip_suffix(')').unwrap_or(trimmed))
    };

    let digits: String = body.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Err(format!("Invalid decimal: \"{}\" has no digits", s));
    }
    if digits.starts_with('-') || digits.starts_with('+') {
        return Err(format!("Invalid decimal: misplaced sign in \"{}\"", s));
    }

    let magnitude = Decimal::from_str_exact(&digits).map_err(|e| e.to_string())?;
    Ok(if negative { -magnitude } else { magnitude })
}

pub fn dollar_precision_str(d: &Decimal) -> String {
    format!("{:.2}", d)
}
