//! Currency strings shared with the UI: "$" + rounded value with en-US grouping.
//!
//! The summary sums revenue by parsing these strings back, so `parse_currency`
//! must invert `format_currency` for every rounded value. Values stay `f64`
//! end to end; integer types would saturate on large traffic figures.

/// Round half toward positive infinity (`Math.round` semantics).
pub fn js_round(value: f64) -> f64 {
  let floor = value.floor();
  if value - floor >= 0.5 {
    floor + 1.0
  } else {
    floor
  }
}

/// Round to one decimal place, half toward positive infinity.
pub fn round1(value: f64) -> f64 {
  js_round(value * 10.0) / 10.0
}

/// Round to two decimal places, half toward positive infinity.
pub fn round2(value: f64) -> f64 {
  js_round(value * 100.0) / 100.0
}

/// Format as `"$1,234"`. Non-finite values format as `"$0"`.
pub fn format_currency(value: f64) -> String {
  let rounded = if value.is_finite() { js_round(value) } else { 0.0 };
  format!("${}", group_thousands(rounded))
}

/// `Display` for f64 never uses exponent notation, so an integral value
/// prints as its full digit string.
fn group_thousands(n: f64) -> String {
  let digits = format!("{}", n.abs());
  let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  if n < 0.0 {
    out.push('-');
  }
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

/// Parse a formatted currency string back to a whole number.
///
/// Strips `$` and `,`, then reads a leading optional sign and digits the way
/// `parseInt` does. Anything unparsable counts as 0.
pub fn parse_currency(s: &str) -> f64 {
  let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
  let trimmed = cleaned.trim_start();

  let (negative, rest) = match trimmed.as_bytes().first() {
    Some(b'-') => (true, &trimmed[1..]),
    Some(b'+') => (false, &trimmed[1..]),
    _ => (false, trimmed),
  };

  let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
  let magnitude = match digits.parse::<f64>() {
    Ok(v) => v,
    Err(_) => return 0.0,
  };
  if negative {
    -magnitude
  } else {
    magnitude
  }
}
