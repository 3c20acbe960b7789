//! Permissive numeric coercion for raw form text
//!
//! Form fields arrive as free text. Instead of rejecting bad input, every
//! numeric field is coerced: the longest leading decimal literal is read and
//! trailing text ignored ("180cm" reads as 180). Empty, unparseable and zero
//! values all fall back to the caller's default, so a calculation always has
//! a number to work with. The calorie engine then treats zeros as
//! "insufficient input" rather than raising an error.

/// Parse `raw` as a number, returning `default` when nothing usable is found.
///
/// A literal zero also yields `default`: a multiplier of "0" becomes the
/// sedentary 1.2, a weight of "0" stays 0.
pub fn parse_number_or(raw: &str, default: f64) -> f64 {
  match leading_number(raw) {
    Some(value) if value != 0.0 && value.is_finite() => value,
    _ => default,
  }
}

/// Parse `raw` as a number, defaulting to 0.
pub fn parse_number(raw: &str) -> f64 {
  parse_number_or(raw, 0.0)
}

/// Read the longest decimal literal at the start of `raw`
/// (optional sign, digits, fraction, exponent).
fn leading_number(raw: &str) -> Option<f64> {
  let s = raw.trim_start();
  let bytes = s.as_bytes();

  let mut end = 0;
  if matches!(bytes.first(), Some(b'+' | b'-')) {
    end = 1;
  }

  let int_start = end;
  end = skip_digits(bytes, end);
  let mut digits = end - int_start;

  if bytes.get(end) == Some(&b'.') {
    let frac_start = end + 1;
    let frac_end = skip_digits(bytes, frac_start);
    digits += frac_end - frac_start;
    end = frac_end;
  }

  if digits == 0 {
    return None;
  }

  // Exponent only counts when at least one digit follows it
  if matches!(bytes.get(end), Some(b'e' | b'E')) {
    let mut exp_end = end + 1;
    if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
      exp_end += 1;
    }
    let exp_digits_end = skip_digits(bytes, exp_end);
    if exp_digits_end > exp_end {
      end = exp_digits_end;
    }
  }

  s[..end].parse::<f64>().ok()
}

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
  while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
    idx += 1;
  }
  idx
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_numbers() {
    assert_eq!(parse_number("65"), 65.0);
    assert_eq!(parse_number("1.55"), 1.55);
    assert_eq!(parse_number("  180 "), 180.0);
    assert_eq!(parse_number("-5"), -5.0);
    assert_eq!(parse_number(".5"), 0.5);
    assert_eq!(parse_number("5."), 5.0);
  }

  #[test]
  fn test_trailing_text_is_ignored() {
    assert_eq!(parse_number("180cm"), 180.0);
    assert_eq!(parse_number("65.5 kg"), 65.5);
    assert_eq!(parse_number("2e3x"), 2000.0);
    // Dangling exponent marker is not part of the literal
    assert_eq!(parse_number("12e"), 12.0);
  }

  #[test]
  fn test_unparseable_falls_back_to_default() {
    assert_eq!(parse_number(""), 0.0);
    assert_eq!(parse_number("abc"), 0.0);
    assert_eq!(parse_number("."), 0.0);
    assert_eq!(parse_number("-"), 0.0);
    assert_eq!(parse_number_or("fast", 1.2), 1.2);
  }

  #[test]
  fn test_zero_falls_back_to_default() {
    assert_eq!(parse_number_or("0", 1.2), 1.2);
    assert_eq!(parse_number_or("-0.0", 1.2), 1.2);
    assert_eq!(parse_number_or("1.9", 1.2), 1.9);
  }
}
