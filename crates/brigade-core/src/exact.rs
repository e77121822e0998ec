//! Exact rational arithmetic.
//!
//! # Design
//!
//! Positions, speeds and times are arbitrary-precision rationals.  Collisions
//! are detected by exact equality of positions, and a run chains thousands of
//! event times together, so any rounding would eventually let two robots pass
//! through each other or miss a pebble.  Floats appear only at the display
//! boundary via [`to_f64`].
//!
//! Callers may hand in decimal strings, fractions, machine floats or integers;
//! everything goes through [`IntoExact`] and is normalised once on entry.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use crate::{CoreError, CoreResult};

/// An exact arbitrary-precision rational number.
pub type Rational = BigRational;

/// Largest decimal exponent accepted by [`parse_exact`].
const MAX_EXPONENT: u32 = 4_096;

// ── IntoExact ─────────────────────────────────────────────────────────────────

/// Conversion of any numeric input form into an exact [`Rational`].
pub trait IntoExact {
    fn into_exact(self) -> CoreResult<Rational>;
}

impl IntoExact for Rational {
    #[inline]
    fn into_exact(self) -> CoreResult<Rational> {
        Ok(self)
    }
}

impl IntoExact for &Rational {
    #[inline]
    fn into_exact(self) -> CoreResult<Rational> {
        Ok(self.clone())
    }
}

impl IntoExact for &str {
    fn into_exact(self) -> CoreResult<Rational> {
        parse_exact(self)
    }
}

impl IntoExact for &String {
    fn into_exact(self) -> CoreResult<Rational> {
        parse_exact(self)
    }
}

impl IntoExact for String {
    fn into_exact(self) -> CoreResult<Rational> {
        parse_exact(&self)
    }
}

impl IntoExact for f64 {
    /// Uses the exact binary value of the float: `0.1` becomes
    /// `3602879701896397/36028797018963968`, not `1/10`.
    fn into_exact(self) -> CoreResult<Rational> {
        Rational::from_float(self).ok_or_else(|| CoreError::NotFinite(self.to_string()))
    }
}

impl IntoExact for f32 {
    fn into_exact(self) -> CoreResult<Rational> {
        Rational::from_float(self).ok_or_else(|| CoreError::NotFinite(self.to_string()))
    }
}

macro_rules! into_exact_int {
    ($($t:ty),*) => {$(
        impl IntoExact for $t {
            #[inline]
            fn into_exact(self) -> CoreResult<Rational> {
                Ok(Rational::from_integer(BigInt::from(self)))
            }
        }
    )*};
}

into_exact_int!(i32, i64, u32, u64);

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse an integer, decimal (`"0.25"`, `"-.5"`), scientific (`"1e-3"`) or
/// fraction (`"3/4"`, `"0.5/3"`) literal into an exact rational.
pub fn parse_exact(input: &str) -> CoreResult<Rational> {
    let s = input.trim();
    let fail = |reason| CoreError::Parse { input: input.to_owned(), reason };

    if s.is_empty() {
        return Err(fail("empty input"));
    }

    match s.split_once('/') {
        Some((numer, denom)) => {
            let numer = parse_decimal(numer.trim()).ok_or_else(|| fail("malformed numerator"))?;
            let denom = parse_decimal(denom.trim()).ok_or_else(|| fail("malformed denominator"))?;
            if denom.is_zero() {
                return Err(fail("zero denominator"));
            }
            Ok(numer / denom)
        }
        None => parse_decimal(s).ok_or_else(|| fail("not a decimal number")),
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, at least one digit in the mantissa.
fn parse_decimal(s: &str) -> Option<Rational> {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], s[i + 1..].parse::<i64>().ok()?),
        None    => (s, 0),
    };

    let (negative, digits) = match mantissa.as_bytes().first().copied()? {
        b'-' => (true, &mantissa[1..]),
        b'+' => (false, &mantissa[1..]),
        _    => (false, mantissa),
    };

    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut numer: BigInt = format!("{int_part}{frac_part}").parse().ok()?;
    if negative {
        numer = -numer;
    }

    let scale = exponent.checked_sub(i64::try_from(frac_part.len()).ok()?)?;
    if scale.unsigned_abs() > u64::from(MAX_EXPONENT) {
        return None;
    }
    let power = BigInt::from(10u32).pow(scale.unsigned_abs() as u32);

    Some(if scale >= 0 {
        Rational::from_integer(numer * power)
    } else {
        Rational::new(numer, power)
    })
}

// ── Display helpers ───────────────────────────────────────────────────────────

/// Lossy conversion for plotting and logs.  Never feed the result back into
/// event computation.
pub fn to_f64(value: &Rational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
