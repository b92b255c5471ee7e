pub mod function;
mod parser;
mod sugar;

use crate::error::{EvaluationError, EvaluationResult, ParseError};
use crate::interpreter::parser::Parser;

/// The optional parts of the expression language.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Accept `n!` after a factor.
    pub postfix_factorial: bool,
    /// Retry input the grammar rejects as a mixed number (`2 1/3`), a parenthesized
    /// expression or a bare fraction.
    pub fraction_sugar: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            postfix_factorial: true,
            fraction_sugar: true,
        }
    }
}

impl Capabilities {
    /// The language accepted by the decimal-to-binary tool.
    pub fn binary_converter() -> Self {
        Capabilities {
            postfix_factorial: true,
            fraction_sugar: true,
        }
    }

    /// The language accepted by the radix tool.
    pub fn radix_converter() -> Self {
        Capabilities {
            postfix_factorial: true,
            fraction_sugar: false,
        }
    }
}

/// Evaluates an arithmetic expression with every optional feature enabled.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use radix_calculator::interpreter::evaluate;
/// # use radix_calculator::error::EvaluationError;
///
/// # fn main() -> Result<(), EvaluationError> {
/// assert_eq!(evaluate("2(3+4)")?, 14.0);
/// assert_eq!(evaluate("5!")?, 120.0);
/// # Ok(()) }
/// ```
pub fn evaluate(expression: &str) -> EvaluationResult<f64> {
    evaluate_with(expression, Capabilities::default())
}

/// Evaluates an arithmetic expression using the given language features.
///
/// Only a syntax error from the grammar falls back to the fraction forms; domain errors
/// such as a division by zero, and input nested too deeply to parse, are returned as
/// they are.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
/// * `capabilities`: Which optional features to accept.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use radix_calculator::interpreter::{evaluate_with, Capabilities};
///
/// let mixed = evaluate_with("2 1/4", Capabilities::binary_converter());
/// assert_eq!(mixed, Ok(2.25));
///
/// let rejected = evaluate_with("2 1/4", Capabilities::radix_converter());
/// assert!(rejected.is_err());
/// ```
pub fn evaluate_with(expression: &str, capabilities: Capabilities) -> EvaluationResult<f64> {
    let text = expression.trim();
    match Parser::new(text, capabilities).parse() {
        Err(EvaluationError::Parse(error))
            if capabilities.fraction_sugar
                && !matches!(error, ParseError::NestingTooDeep { .. }) =>
        {
            sugar::evaluate_fallback(text, capabilities, error)
        }
        result => result,
    }
}
