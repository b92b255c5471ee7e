pub mod decoration;
pub mod reading;

use crate::error::ConversionError;
use log::trace;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// Digit symbols, indexed by digit value.
const DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// A supported positional number system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub const ALL: [Radix; 4] = [
        Radix::Binary,
        Radix::Octal,
        Radix::Decimal,
        Radix::Hexadecimal,
    ];

    pub fn base(&self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// Every other supported radix, in ascending order.
    pub fn others(self) -> impl Iterator<Item = Radix> {
        Radix::ALL.into_iter().filter(move |radix| *radix != self)
    }

    /// The symbol for `value`, if it is a digit of this radix.
    pub fn digit_symbol(&self, value: u32) -> Option<char> {
        if value < self.base() {
            Some(DIGITS[value as usize])
        } else {
            None
        }
    }

    /// The value of `symbol` in this radix. Letters are case-insensitive.
    pub fn digit_value(&self, symbol: char) -> Result<u32, ConversionError> {
        match symbol.to_digit(16) {
            Some(value) if value < self.base() => Ok(value),
            _ => Err(ConversionError::InvalidDigit {
                digit: symbol,
                base: self.base(),
            }),
        }
    }
}

impl TryFrom<u32> for Radix {
    type Error = ConversionError;

    fn try_from(base: u32) -> Result<Self, Self::Error> {
        match base {
            2 => Ok(Radix::Binary),
            8 => Ok(Radix::Octal),
            10 => Ok(Radix::Decimal),
            16 => Ok(Radix::Hexadecimal),
            other => Err(ConversionError::UnsupportedBase(other)),
        }
    }
}

impl str::FromStr for Radix {
    type Err = ConversionError;

    fn from_str(input: &str) -> Result<Radix, Self::Err> {
        let base = input
            .trim()
            .parse::<u32>()
            .map_err(|_| ConversionError::Malformed(input.to_string()))?;
        Radix::try_from(base)
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}

/// Writes `value` in the given base with at most `precision` fractional digits.
///
/// Fractional digits are truncated, never rounded, and stop early once the remainder is
/// exactly zero.
///
/// # Arguments
///
/// * `value`: A finite number.
/// * `base`: One of 2, 8, 10 or 16.
/// * `precision`: The largest number of digits after the separator.
///
/// returns: The digits of `value`, with a leading `-` when it is negative.
///
/// # Examples
///
/// ```
/// use radix_calculator::radix::to_base;
/// # use radix_calculator::error::ConversionError;
///
/// # fn main() -> Result<(), ConversionError> {
/// assert_eq!(to_base(10.625, 2, 10)?, "1010.101");
/// assert_eq!(to_base(-255.0, 16, 10)?, "-FF");
/// # Ok(()) }
/// ```
pub fn to_base(value: f64, base: u32, precision: usize) -> Result<String, ConversionError> {
    let radix = Radix::try_from(base)?;
    if !value.is_finite() {
        return Err(ConversionError::NonFinite(value));
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }

    let magnitude = value.abs();
    let whole = magnitude.trunc();
    if whole >= 2f64.powi(128) {
        return Err(ConversionError::OutOfRange(value));
    }

    let mut digits = integer_digits(whole as u128, radix);
    let fraction = fraction_digits(magnitude - whole, radix, precision);
    if !fraction.is_empty() {
        digits.push('.');
        digits.push_str(&fraction);
    }
    if value < 0.0 {
        digits.insert(0, '-');
    }

    trace!("{} in base {} is {}", value, radix, digits);
    Ok(digits)
}

fn integer_digits(mut whole: u128, radix: Radix) -> String {
    if whole == 0 {
        return "0".to_string();
    }
    let base = u128::from(radix.base());
    let mut reversed = Vec::new();
    while whole > 0 {
        reversed.push(DIGITS[(whole % base) as usize]);
        whole /= base;
    }
    reversed.iter().rev().collect()
}

fn fraction_digits(mut fraction: f64, radix: Radix, precision: usize) -> String {
    let base = f64::from(radix.base());
    let mut digits = String::with_capacity(precision);
    let mut count = 0;
    while fraction > 0.0 && count < precision {
        fraction *= base;
        let digit = fraction.trunc();
        digits.push(DIGITS[digit as usize]);
        fraction -= digit;
        count += 1;
    }
    digits
}

/// Reads a number written in the given base.
///
/// # Arguments
///
/// * `text`: Digits with an optional leading `-` and at most one `.` separator.
/// * `base`: One of 2, 8, 10 or 16.
///
/// returns: The value of the digits.
///
/// # Examples
///
/// ```
/// use radix_calculator::radix::from_base;
/// use radix_calculator::error::ConversionError;
///
/// assert_eq!(from_base("FF", 16), Ok(255.0));
/// assert_eq!(from_base("0.1", 2), Ok(0.5));
/// assert_eq!(
///     from_base("1G", 16),
///     Err(ConversionError::InvalidDigit { digit: 'G', base: 16 })
/// );
/// ```
pub fn from_base(text: &str, base: u32) -> Result<f64, ConversionError> {
    let radix = Radix::try_from(base)?;
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, text),
    };

    let mut parts = unsigned.split('.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() || (integer.is_empty() && fraction.is_empty()) {
        return Err(ConversionError::Malformed(text.to_string()));
    }

    let base = f64::from(radix.base());
    let mut value = 0.0;
    for symbol in integer.chars() {
        value = value * base + f64::from(radix.digit_value(symbol)?);
    }

    let mut fraction_value = 0.0;
    let mut weight = base;
    for symbol in fraction.chars() {
        fraction_value += f64::from(radix.digit_value(symbol)?) / weight;
        weight *= base;
    }
    value += fraction_value;

    Ok(if negative { -value } else { value })
}
