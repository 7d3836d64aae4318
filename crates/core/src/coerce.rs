// Permissive numeric parsing for pair values
//
// Mirrors the C `atol` / `atof` contract: skip leading whitespace, consume the
// longest valid numeric prefix, and yield zero when there is none.

/// Whitespace as recognised by C `isspace` in the "C" locale.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| is_c_space(b)).count()
}

/// Parse the leading decimal integer of `s`.
///
/// Overflow saturates at the `i64` bounds instead of wrapping.
pub fn parse_long(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let mut i = skip_space(bytes);

    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let mut acc: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }

    acc
}

/// Parse the leading floating-point number of `s` (decimal or exponential,
/// plus `inf`, `infinity` and `nan` in any case).
pub fn parse_double(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let start = skip_space(bytes);
    let mut end = start;

    let negative = match bytes.get(end) {
        Some(b'-') => {
            end += 1;
            true
        }
        Some(b'+') => {
            end += 1;
            false
        }
        _ => false,
    };

    let rest = &s[end..];
    if starts_with_ignore_case(rest, "inf") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    if starts_with_ignore_case(rest, "nan") {
        return f64::NAN;
    }

    let digits_before = count_digits(&bytes[end..]);
    end += digits_before;
    let mut digits = digits_before;

    if bytes.get(end) == Some(&b'.') {
        let frac = count_digits(&bytes[end + 1..]);
        if frac > 0 || digits > 0 {
            end += 1 + frac;
            digits += frac;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent is only consumed when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            end = j + exp_digits;
        }
    }

    s[start..end].parse::<f64>().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Render a float the way C `printf("%f")` does: six fixed decimals.
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{:.6}", value)
    }
}
