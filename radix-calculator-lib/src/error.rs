use thiserror::Error;

/// The text is not a well-formed expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parenthesis opened at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("too many '/' characters")]
    TooManySlashes,

    #[error("expression is nested too deeply at position {position}")]
    NestingTooDeep { position: usize },
}

/// The expression is well-formed but its value is not a finite number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("factorial of negative number {0} is not defined")]
    NegativeFactorial(f64),

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("denominator cannot be zero")]
    ZeroDenominator,

    #[error("{function} is not defined for {argument}")]
    Undefined { function: String, argument: f64 },

    #[error("result is too large to represent")]
    Overflow,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Failure to move a value into or out of a positional number system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("unsupported base {0}, only 2, 8, 10 and 16 are allowed")]
    UnsupportedBase(u32),

    #[error("malformed number: '{0}'")]
    Malformed(String),

    #[error("{0} is not a finite number")]
    NonFinite(f64),

    #[error("{0} is too large to convert")]
    OutOfRange(f64),
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;
