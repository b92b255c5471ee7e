use crate::error::{DomainError, EvaluationResult, ParseError};
use crate::interpreter::{evaluate_with, Capabilities};
use log::debug;

/// Retries input the grammar rejected as a mixed number, a parenthesized expression or a
/// bare fraction, in that order. Input that matches none of them keeps the grammar's error.
pub(super) fn evaluate_fallback(
    text: &str,
    capabilities: Capabilities,
    grammar_error: ParseError,
) -> EvaluationResult<f64> {
    debug!("grammar rejected {:?} ({}), trying fraction forms", text, grammar_error);

    if let Some(mixed_number) = MixedNumber::parse(text) {
        return mixed_number.value();
    }

    if let Some(inner) = text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        return evaluate_with(inner, capabilities);
    }

    if text.contains('/') {
        return evaluate_fraction(text, capabilities);
    }

    Err(grammar_error.into())
}

fn evaluate_fraction(text: &str, capabilities: Capabilities) -> EvaluationResult<f64> {
    let (numerator, denominator) = match text.split_once('/') {
        Some((_, denominator)) if denominator.contains('/') => {
            return Err(ParseError::TooManySlashes.into())
        }
        Some(parts) => parts,
        None => return Err(ParseError::UnexpectedEnd.into()),
    };
    let numerator = evaluate_with(numerator, capabilities)?;
    let denominator = evaluate_with(denominator, capabilities)?;
    if denominator == 0.0 {
        return Err(DomainError::ZeroDenominator.into());
    }
    Ok(numerator / denominator)
}

/// `-?whole numerator/denominator`, e.g. `2 1/3`.
#[derive(Debug, PartialEq)]
struct MixedNumber<'a> {
    negative: bool,
    whole: &'a str,
    numerator: &'a str,
    denominator: &'a str,
}

impl<'a> MixedNumber<'a> {
    fn parse(text: &'a str) -> Option<MixedNumber<'a>> {
        let mut parts = text.split_whitespace();
        let (whole, fraction) = (parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let (negative, whole) = match whole.strip_prefix('-') {
            Some(magnitude) => (true, magnitude),
            None => (false, whole),
        };
        let (numerator, denominator) = fraction.split_once('/')?;
        if [whole, numerator, denominator].iter().all(|part| is_digits(part)) {
            Some(MixedNumber {
                negative,
                whole,
                numerator,
                denominator,
            })
        } else {
            None
        }
    }

    fn value(&self) -> EvaluationResult<f64> {
        let parse = |digits: &str| {
            digits
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(digits.to_string()))
        };
        let denominator = parse(self.denominator)?;
        if denominator == 0.0 {
            return Err(DomainError::ZeroDenominator.into());
        }
        let magnitude = parse(self.whole)? + parse(self.numerator)? / denominator;
        Ok(if self.negative { -magnitude } else { magnitude })
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
