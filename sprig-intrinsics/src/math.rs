/// Euler's number as the `log` intrinsic recognizes it.
const NATURAL_BASE: f64 = 2.718282;

/// Arctangent of `y / x`; `x == 1` takes the single-argument path
pub fn atan(y: f64, x: f64) -> f64 {
    if x == 1.0 {
        y.atan()
    } else {
        y.atan2(x)
    }
}

/// Logarithm of `x` in the given base. A base within 1e-6 of e is the natural log.
pub fn log(x: f64, base: f64) -> f64 {
    if (base - NATURAL_BASE).abs() < 0.000001 {
        x.ln()
    } else {
        x.ln() / base.ln()
    }
}

/// Rounds half away from zero to `decimal_places` digits; negative places
/// round to tens, hundreds and so on
pub fn round(value: f64, decimal_places: i32) -> f64 {
    if decimal_places == 0 {
        return value.round();
    }
    let factor = 10f64.powi(decimal_places);
    (value * factor).round() / factor
}

/// Returns -1, 0 or 1
pub fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else if value > 0.0 {
        1.0
    } else {
        0.0
    }
}

fn split_sign(value: f64) -> (bool, u64) {
    (value.is_sign_negative(), value.abs() as u64)
}

fn combine(value: u64, negative: bool) -> f64 {
    let magnitude = value as f64;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Bitwise AND of the magnitudes; the result is negative only if both inputs are
pub fn bit_and(i: f64, j: f64) -> f64 {
    let (i_neg, i_bits) = split_sign(i);
    let (j_neg, j_bits) = split_sign(j);
    combine(i_bits & j_bits, i_neg & j_neg)
}

/// Bitwise OR of the magnitudes; negative if either input is
pub fn bit_or(i: f64, j: f64) -> f64 {
    let (i_neg, i_bits) = split_sign(i);
    let (j_neg, j_bits) = split_sign(j);
    combine(i_bits | j_bits, i_neg | j_neg)
}

/// Bitwise XOR of the magnitudes; negative if exactly one input is
pub fn bit_xor(i: f64, j: f64) -> f64 {
    let (i_neg, i_bits) = split_sign(i);
    let (j_neg, j_bits) = split_sign(j);
    combine(i_bits ^ j_bits, i_neg ^ j_neg)
}

/// Formats a number the way script code sees it printed.
///
/// Whole numbers print without a fraction, very large or very small magnitudes
/// use exponent form with six digits, and everything else prints with up to
/// six decimal places and trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value % 1.0 == 0.0 {
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{value:.0}");
    }
    if !(-1e10..=1e10).contains(&value) || (value < 1e-6 && value > -1e-6) {
        return format_exponent(value);
    }
    let mut text = format!("{value:.6}");
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

fn format_exponent(value: f64) -> String {
    let raw = format!("{value:.6E}");
    match raw.split_once('E') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}E{sign}{digits:0>2}")
        }
        None => raw,
    }
}
