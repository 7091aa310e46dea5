//! Measurement formatting and parsing.
//!
//! Woodworkers read sixteenths, not decimals: lengths display as reduced
//! fractional inches (`10 1/2"`) and input accepts feet/inch/fraction
//! combinations (`2' 3 1/4"`, `3 1/4"`, `1/2"`) as well as plain decimals.
//!
//! `parse_measurement(format_inches(x))` recovers `x` within 1/16".

const SIXTEENTHS: i64 = 16;

/// Formats a length in inches as the nearest-1/16" fraction string.
///
/// The fraction is reduced (`10 1/2"` rather than `10 8/16"`). Values
/// below 1/64" format as `0"`.
pub fn format_inches(value: f64) -> String {
    if value.abs() < 1.0 / 64.0 {
        return "0\"".to_string();
    }

    let total = (value * SIXTEENTHS as f64).round() as i64;
    if total == 0 {
        return "0\"".to_string();
    }

    let whole = total / SIXTEENTHS;
    let rem = (total % SIXTEENTHS).abs();

    if rem == 0 {
        return format!("{}\"", whole);
    }

    let g = gcd(rem, SIXTEENTHS);
    let num = rem / g;
    let den = SIXTEENTHS / g;

    if whole == 0 {
        if total < 0 {
            format!("-{}/{}\"", num, den)
        } else {
            format!("{}/{}\"", num, den)
        }
    } else {
        format!("{} {}/{}\"", whole, num, den)
    }
}

/// Parses a measurement string to inches.
///
/// Accepted forms:
/// - `feet' inches num/den"` (e.g. `2' 3 1/4"`)
/// - `inches num/den"` (e.g. `3 1/4"`)
/// - `num/den"` (e.g. `1/2"`)
/// - plain decimal (e.g. `3.25`)
///
/// Returns `None` when the text matches none of these; callers leave
/// prior state unchanged on `None`.
pub fn parse_measurement(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut total = 0.0;

    // Split off a feet component if present.
    let rest = match input.find('\'') {
        Some(idx) => {
            let feet: f64 = input[..idx].trim().parse().ok()?;
            total += feet * 12.0;
            &input[idx + 1..]
        }
        None => input,
    };

    let rest = rest.trim().trim_end_matches('"').trim();
    if rest.is_empty() {
        // Bare feet (`2'`) is valid; bare quotes or whitespace is not.
        return if input.contains('\'') { Some(total) } else { None };
    }

    for part in rest.split_whitespace() {
        if part.contains('/') {
            let frac: Vec<&str> = part.split('/').collect();
            if frac.len() != 2 {
                return None;
            }
            let num: f64 = frac[0].parse().ok()?;
            let den: f64 = frac[1].parse().ok()?;
            if den == 0.0 {
                return None;
            }
            total += num / den;
        } else {
            total += part.parse::<f64>().ok()?;
        }
    }

    Some(total)
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}
