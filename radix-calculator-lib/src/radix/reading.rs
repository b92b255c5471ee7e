use crate::error::{ConversionError, EvaluationError};
use crate::interpreter::{evaluate_with, Capabilities};
use crate::radix::decoration::decorate;
use crate::radix::{from_base, to_base, Radix};
use thiserror::Error;

/// Input to the radix tool was neither a valid expression nor valid digits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Reads the value of `input` written in the `origin` radix.
///
/// Decimal input, and anything that is not a plain run of hexadecimal digits with an
/// optional fraction, is evaluated as an expression. Everything else is read as digits of
/// the origin radix.
///
/// # Examples
///
/// ```
/// use radix_calculator::interpreter::Capabilities;
/// use radix_calculator::radix::reading::read_value;
/// use radix_calculator::radix::Radix;
///
/// let capabilities = Capabilities::radix_converter();
/// assert_eq!(read_value("101", Radix::Binary, capabilities), Ok(5.0));
/// assert_eq!(read_value("101", Radix::Decimal, capabilities), Ok(101.0));
/// assert_eq!(read_value("2^4", Radix::Octal, capabilities), Ok(16.0));
/// ```
pub fn read_value(input: &str, origin: Radix, capabilities: Capabilities) -> Result<f64, ReadError> {
    let input = input.trim();
    if origin == Radix::Decimal || !is_plain_digits(input) {
        Ok(evaluate_with(input, capabilities)?)
    } else {
        Ok(from_base(input, origin.base())?)
    }
}

fn is_plain_digits(text: &str) -> bool {
    let is_run = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_hexdigit());
    match text.split_once('.') {
        Some((integer, fraction)) => is_run(integer) && is_run(fraction),
        None => is_run(text),
    }
}

/// Decorated renderings of `value`: first in the origin radix, then in every other radix
/// in ascending order.
///
/// # Examples
///
/// ```
/// use radix_calculator::radix::reading::conversion_row;
/// use radix_calculator::radix::Radix;
///
/// let row = conversion_row(10.5, Radix::Decimal, 10).unwrap();
/// assert_eq!(row, ["(10.5)₁₀", "(1010.1)₂", "(12.4)₈", "(A.8)₁₆"]);
/// ```
pub fn conversion_row(
    value: f64,
    origin: Radix,
    precision: usize,
) -> Result<Vec<String>, ConversionError> {
    std::iter::once(origin)
        .chain(origin.others())
        .map(|radix| {
            to_base(value, radix.base(), precision).map(|digits| decorate(&digits, radix.base()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use parameterized_macro::parameterized;

    #[parameterized(
    input = {"FF", "ff.8", "777", "1010", "12", "1E"},
    origin = {Radix::Hexadecimal, Radix::Hexadecimal, Radix::Octal, Radix::Binary, Radix::Decimal, Radix::Hexadecimal},
    expected = {255.0, 255.5, 511.0, 10.0, 12.0, 30.0}
    )]
    fn digits_are_read_in_origin_radix(input: &str, origin: Radix, expected: f64) {
        let value = read_value(input, origin, Capabilities::radix_converter()).unwrap();
        assert_eq!(value, expected)
    }

    #[test]
    fn expression_in_other_radix_is_evaluated_as_decimal() {
        let value = read_value("3*4", Radix::Binary, Capabilities::radix_converter()).unwrap();
        assert_eq!(value, 12.0)
    }

    #[test]
    fn digit_outside_origin_radix_is_rejected() {
        let error = read_value("129", Radix::Octal, Capabilities::radix_converter()).unwrap_err();
        assert_eq!(
            error,
            ReadError::Conversion(ConversionError::InvalidDigit { digit: '9', base: 8 })
        )
    }

    #[test]
    fn malformed_expression_is_an_evaluation_error() {
        let error = read_value("2+", Radix::Binary, Capabilities::radix_converter()).unwrap_err();
        assert_eq!(
            error,
            ReadError::Evaluation(ParseError::UnexpectedEnd.into())
        )
    }

    #[test]
    fn plain_digits_need_digits_on_both_sides_of_separator() {
        assert!(is_plain_digits("A.F"));
        assert!(!is_plain_digits(".5"));
        assert!(!is_plain_digits("1."));
        assert!(!is_plain_digits("1.2.3"))
    }

    #[test]
    fn row_starts_with_origin_radix() {
        let row = conversion_row(255.0, Radix::Hexadecimal, 10).unwrap();
        assert_eq!(row, ["(FF)₁₆", "(11111111)₂", "(377)₈", "(255)₁₀"])
    }

    #[test]
    fn row_fails_for_non_finite_value() {
        assert!(conversion_row(f64::INFINITY, Radix::Binary, 10).is_err())
    }
}
