//! Exact fixed-point money handling.
//!
//! Stake amounts are carried as integer cents, so everything downstream of
//! parsing is exact integer arithmetic. Parsing accepts arbitrary decimal
//! strings and quantizes to two fractional digits with half-up rounding
//! (ties away from zero), matching the server's ingestion behavior.

use std::fmt;

/// Cents per whole currency unit. One cent is one lottery ticket.
pub const CENTS_PER_UNIT: u64 = 100;

/// Why a raw amount string was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountError {
    /// Not parseable as a decimal number, or beyond representable range.
    NotANumber,
    /// Quantized to zero or negative.
    NotPositive,
}

/// A monetary amount in integer cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Parse a decimal string into a positive amount of cents.
    ///
    /// Half-up quantization to two fractional digits happens here, so
    /// `"1.005"` parses to 101 cents (not 100) and `"0.004"` quantizes to
    /// zero and is rejected as non-positive.
    pub fn parse(raw: &str) -> Result<Amount, AmountError> {
        let cents = parse_cents_half_up(raw).ok_or(AmountError::NotANumber)?;
        if cents <= 0 {
            return Err(AmountError::NotPositive);
        }
        u64::try_from(cents)
            .map(Amount)
            .map_err(|_| AmountError::NotANumber)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT)
    }
}

/// Parse a decimal string (optional sign, fraction, exponent) into signed
/// cents, rounding half away from zero at the second fractional digit.
///
/// Returns `None` when the string is not a number or its digits overflow
/// `i128`. Never goes through floating point.
fn parse_cents_half_up(raw: &str) -> Option<i128> {
    let s = raw.trim();
    let (negative, s) = match s.as_bytes().first()? {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], s[i + 1..].parse::<i32>().ok()?),
        None => (s, 0),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut digits: i128 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
        digits = digits
            .checked_mul(10)?
            .checked_add(i128::from(b - b'0'))?;
    }

    // value = digits * 10^(-scale); rescale to exactly two fractional digits
    let scale = frac_part.len() as i64 - i64::from(exponent);
    let cents = if scale <= 2 {
        let shift = u32::try_from(2 - scale).ok()?;
        digits.checked_mul(10i128.checked_pow(shift)?)?
    } else if scale - 2 > 38 {
        // divisor exceeds any representable digit count; rounds to zero
        0
    } else {
        let divisor = 10i128.pow((scale - 2) as u32);
        let (q, r) = (digits / divisor, digits % divisor);
        if r >= divisor - r {
            q + 1
        } else {
            q
        }
    };

    Some(if negative { -cents } else { cents })
}
