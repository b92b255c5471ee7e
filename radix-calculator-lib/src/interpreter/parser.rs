use crate::error::{DomainError, EvaluationError, EvaluationResult, ParseError};
use crate::interpreter::function::{Identifier, UnaryFunction};
use crate::interpreter::Capabilities;

/// A recursive-descent evaluator over the characters of one expression.
///
/// Grammar, from lowest to highest precedence:
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/' | '%') factor)*
/// factor     := unary '!'? factor*
/// unary      := ('+' | '-') unary | atom ('^' factor)?
/// atom       := number | hex-number | '(' expression ')' | constant | function factor
/// ```
///
/// The trailing `factor*` is implicit multiplication and only applies when the
/// next factor starts right after the previous one, without whitespace.
pub(crate) struct Parser {
    characters: Vec<char>,
    position: usize,
    lookahead: Option<char>,
    capabilities: Capabilities,
    depth: usize,
}

/// How many factors and unary operands may be open at once.
const MAX_DEPTH: usize = 512;

impl Parser {
    pub(crate) fn new(text: &str, capabilities: Capabilities) -> Parser {
        let characters: Vec<char> = text.chars().collect();
        let lookahead = characters.first().copied();
        Parser {
            characters,
            position: 0,
            lookahead,
            capabilities,
            depth: 0,
        }
    }

    /// Evaluates the whole input. Anything left over after the expression is an error.
    pub(crate) fn parse(mut self) -> EvaluationResult<f64> {
        self.skip_whitespace();
        if self.lookahead.is_none() {
            return Err(ParseError::EmptyExpression.into());
        }
        let value = self.parse_expression()?;
        self.skip_whitespace();
        if self.lookahead.is_some() {
            return Err(self.unexpected());
        }
        Ok(value)
    }

    fn advance(&mut self) {
        self.position += 1;
        self.lookahead = self.characters.get(self.position).copied();
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.characters.get(self.position + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.lookahead, Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Consumes `expected` and any whitespace before it, or nothing at all.
    fn eat(&mut self, expected: char) -> bool {
        let mut offset = 0;
        while matches!(self.peek(offset), Some(c) if c.is_whitespace()) {
            offset += 1;
        }
        if self.peek(offset) != Some(expected) {
            return false;
        }
        for _ in 0..=offset {
            self.advance();
        }
        true
    }

    fn unexpected(&self) -> EvaluationError {
        match self.lookahead {
            Some(character) => ParseError::UnexpectedCharacter {
                character,
                position: self.position,
            }
            .into(),
            None => ParseError::UnexpectedEnd.into(),
        }
    }

    fn text_since(&self, start: usize) -> String {
        self.characters[start..self.position].iter().collect()
    }

    /// Runs one recursive step of the grammar, failing once the nesting gets too deep
    /// for the call stack.
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> EvaluationResult<f64>,
    ) -> EvaluationResult<f64> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: self.position,
            }
            .into());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_expression(&mut self) -> EvaluationResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            if self.eat('+') {
                value = finite(value + self.parse_term()?)?;
            } else if self.eat('-') {
                value = finite(value - self.parse_term()?)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_term(&mut self) -> EvaluationResult<f64> {
        let mut value = self.parse_factor()?;
        loop {
            if self.eat('*') {
                value = finite(value * self.parse_factor()?)?;
            } else if self.eat('/') {
                let divisor = self.parse_factor()?;
                if divisor == 0.0 {
                    return Err(DomainError::DivisionByZero.into());
                }
                value = finite(value / divisor)?;
            } else if self.eat('%') {
                let divisor = self.parse_factor()?;
                if divisor == 0.0 {
                    return Err(DomainError::ModuloByZero.into());
                }
                value %= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_factor(&mut self) -> EvaluationResult<f64> {
        self.nested(|parser| {
            let mut value = parser.parse_unary()?;
            if parser.capabilities.postfix_factorial && parser.eat('!') {
                value = factorial(value)?;
            }
            while parser.lookahead.map_or(false, starts_implicit_factor) {
                value = finite(value * parser.parse_factor()?)?;
            }
            Ok(value)
        })
    }

    fn parse_unary(&mut self) -> EvaluationResult<f64> {
        self.nested(|parser| {
            if parser.eat('+') {
                return parser.parse_unary();
            }
            if parser.eat('-') {
                return Ok(-parser.parse_unary()?);
            }
            let base = parser.parse_atom()?;
            if parser.eat('^') {
                let exponent = parser.parse_factor()?;
                return power(base, exponent);
            }
            Ok(base)
        })
    }

    fn parse_atom(&mut self) -> EvaluationResult<f64> {
        self.skip_whitespace();
        match self.lookahead {
            Some('(') => self.parse_parenthesized(),
            Some('0') if matches!(self.peek(1), Some('x' | 'X')) => self.parse_hexadecimal(),
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_decimal(),
            Some('√') => {
                self.advance();
                self.apply(UnaryFunction::SquareRoot)
            }
            Some(c) if c.is_alphabetic() => self.parse_identifier(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_parenthesized(&mut self) -> EvaluationResult<f64> {
        let opened_at = self.position;
        self.advance();
        let value = self.parse_expression()?;
        if self.eat(')') {
            return Ok(value);
        }
        self.skip_whitespace();
        match self.lookahead {
            None => Err(ParseError::UnbalancedParenthesis {
                position: opened_at,
            }
            .into()),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn parse_decimal(&mut self) -> EvaluationResult<f64> {
        let start = self.position;
        while let Some(c) = self.lookahead {
            if c.is_ascii_digit() || c == '.' {
                self.advance();
            } else if (c == 'e' || c == 'E') && self.exponent_follows() {
                self.advance();
                if matches!(self.lookahead, Some('+' | '-')) {
                    self.advance();
                }
            } else {
                break;
            }
        }
        let text = self.text_since(start);
        let value = text
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber(text.clone()))?;
        finite(value)
    }

    /// An `e` only belongs to the number when digits of an exponent follow it.
    fn exponent_follows(&self) -> bool {
        match self.peek(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => matches!(self.peek(2), Some(c) if c.is_ascii_digit()),
            _ => false,
        }
    }

    fn parse_hexadecimal(&mut self) -> EvaluationResult<f64> {
        // 0x
        self.advance();
        self.advance();
        let start = self.position;
        while matches!(self.lookahead, Some(c) if c.is_ascii_hexdigit()) {
            self.advance();
        }
        let digits = self.text_since(start);
        if digits.is_empty() {
            return Err(self.unexpected());
        }
        let value = u64::from_str_radix(&digits, 16)
            .map_err(|_| ParseError::InvalidNumber(format!("0x{}", digits)))?;
        Ok(value as f64)
    }

    fn parse_identifier(&mut self) -> EvaluationResult<f64> {
        let start = self.position;
        while matches!(self.lookahead, Some(c) if c.is_alphabetic()) {
            self.advance();
        }
        let name = self.text_since(start);
        match name.parse::<Identifier>() {
            Ok(Identifier::Constant(constant)) => Ok(constant.value()),
            Ok(Identifier::Function(function)) => self.apply(function),
            Err(_) => Err(ParseError::UnknownFunction(name).into()),
        }
    }

    /// The argument is a whole factor, powers and implicit products included:
    /// `log(100)^3` is `log(100^3)` and `sin 2pi` is `sin(2π)`.
    fn apply(&mut self, function: UnaryFunction) -> EvaluationResult<f64> {
        let argument = self.parse_factor()?;
        Ok(function.evaluate(argument)?)
    }
}

fn starts_implicit_factor(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '(' || c == '√' || c.is_alphabetic()
}

fn finite(value: f64) -> EvaluationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::Overflow.into())
    }
}

fn power(base: f64, exponent: f64) -> EvaluationResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(DomainError::DivisionByZero.into());
    }
    let result = base.powf(exponent);
    if result.is_nan() {
        return Err(DomainError::Undefined {
            function: "^".to_string(),
            argument: base,
        }
        .into());
    }
    finite(result)
}

/// Factorial by iterated 64-bit multiplication. Fractional operands are truncated and
/// large operands wrap around like native integers do.
fn factorial(value: f64) -> Result<f64, DomainError> {
    if value < 0.0 {
        return Err(DomainError::NegativeFactorial(value));
    }
    let n = value.trunc() as i64;
    let mut product: i64 = 1;
    for i in 2..=n {
        product = product.wrapping_mul(i);
        // Once the product has 64 factors of two it stays zero.
        if product == 0 {
            break;
        }
    }
    Ok(product as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    fn parse(text: &str) -> EvaluationResult<f64> {
        Parser::new(text, Capabilities::default()).parse()
    }

    #[parameterized(
    expression = {"2+3*4", "(2+3)*4", "2(3+4)", "10-4-3", "2^3^2", "-2^2", "7%4", "1.5e-3*2", "0xFF", "0X1f + 1"},
    expected = {14.0, 20.0, 14.0, 3.0, 512.0, -4.0, 3.0, 0.003, 255.0, 32.0}
    )]
    fn expression_evaluates_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(parse(expression).unwrap(), expected)
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        assert_eq!(parse("  2 *  ( 3 + 4 ) ").unwrap(), 14.0)
    }

    #[test]
    fn implicit_multiplication_requires_adjacent_factor() {
        let error = parse("2 3").unwrap_err();
        assert_eq!(
            error,
            ParseError::UnexpectedCharacter {
                character: '3',
                position: 2
            }
            .into()
        )
    }

    #[test]
    fn exponent_binds_before_implicit_multiplication() {
        assert_eq!(parse("2(3)^2").unwrap(), 18.0);
        assert_eq!(parse("2pi^2").unwrap(), 2.0 * std::f64::consts::PI.powf(2.0))
    }

    #[test]
    fn unknown_identifier_is_reported_by_name() {
        assert_eq!(
            parse("3x").unwrap_err(),
            ParseError::UnknownFunction("x".into()).into()
        )
    }

    #[test]
    fn trailing_e_without_digits_is_euler_constant() {
        assert_eq!(parse("2e").unwrap(), 2.0 * std::f64::consts::E)
    }

    #[test]
    fn function_argument_takes_following_implicit_factor() {
        assert_eq!(parse("sqrt(4)sqrt(9)").unwrap(), 12f64.sqrt());
        assert!(parse("sin 2pi").unwrap().abs() < 1e-12)
    }

    #[test]
    fn bare_function_argument_includes_power() {
        assert_eq!(parse("sqrt 4^2").unwrap(), 4.0)
    }

    #[test]
    fn power_after_parenthesized_argument_applies_to_argument() {
        assert_eq!(parse("log(100)^3").unwrap(), 6.0)
    }

    #[test]
    fn function_argument_ends_at_explicit_operator() {
        assert_eq!(parse("sqrt(16)*2").unwrap(), 8.0);
        assert_eq!(parse("sqrt 16 + 1").unwrap(), 5.0)
    }

    #[test]
    fn square_root_glyph_is_a_prefix_function() {
        assert_eq!(parse("√16").unwrap(), 4.0);
        assert_eq!(parse("2√9").unwrap(), 6.0)
    }

    #[test]
    fn missing_closing_parenthesis_is_unbalanced() {
        assert_eq!(
            parse("2*(3+4").unwrap_err(),
            ParseError::UnbalancedParenthesis { position: 2 }.into()
        )
    }

    #[test]
    fn stray_closing_parenthesis_is_unexpected() {
        assert_eq!(
            parse("3+4)").unwrap_err(),
            ParseError::UnexpectedCharacter {
                character: ')',
                position: 3
            }
            .into()
        )
    }

    #[test]
    fn dangling_operator_is_unexpected_end() {
        assert_eq!(parse("3+").unwrap_err(), ParseError::UnexpectedEnd.into())
    }

    #[test]
    fn blank_input_is_empty_expression() {
        assert_eq!(parse("   ").unwrap_err(), ParseError::EmptyExpression.into())
    }

    #[test]
    fn hex_prefix_without_digits_is_rejected() {
        assert_eq!(parse("0x").unwrap_err(), ParseError::UnexpectedEnd.into())
    }

    #[test]
    fn malformed_decimal_is_invalid_number() {
        assert_eq!(
            parse("1.2.3").unwrap_err(),
            ParseError::InvalidNumber("1.2.3".into()).into()
        )
    }

    #[test]
    fn division_by_zero_is_a_domain_error() {
        assert_eq!(parse("1/0").unwrap_err(), DomainError::DivisionByZero.into());
        assert_eq!(parse("1%(2-2)").unwrap_err(), DomainError::ModuloByZero.into())
    }

    #[test]
    fn overflow_is_a_domain_error() {
        assert_eq!(parse("10^400").unwrap_err(), DomainError::Overflow.into());
        assert_eq!(parse("1e999").unwrap_err(), DomainError::Overflow.into())
    }

    #[test]
    fn negative_power_of_zero_is_division_by_zero() {
        assert_eq!(parse("0^-1").unwrap_err(), DomainError::DivisionByZero.into())
    }

    #[test]
    fn nested_parentheses_within_limit_evaluate() {
        let text = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parse(&text).unwrap(), 7.0)
    }

    #[test]
    fn deep_nesting_is_rejected_instead_of_overflowing() {
        let parentheses = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        assert!(matches!(
            parse(&parentheses).unwrap_err(),
            EvaluationError::Parse(ParseError::NestingTooDeep { .. })
        ));

        let signs = format!("{}1", "-".repeat(20_000));
        assert!(matches!(
            parse(&signs).unwrap_err(),
            EvaluationError::Parse(ParseError::NestingTooDeep { .. })
        ));

        let products = "(1)".repeat(20_000);
        assert!(matches!(
            parse(&products).unwrap_err(),
            EvaluationError::Parse(ParseError::NestingTooDeep { .. })
        ))
    }

    #[test]
    fn fractional_power_of_negative_base_is_undefined() {
        assert!(matches!(
            parse("(-8)^0.5").unwrap_err(),
            EvaluationError::Domain(DomainError::Undefined { .. })
        ))
    }

    #[parameterized(
    expression = {"0!", "1!", "5!", "4.9!", "2^3!", "3!2"},
    expected = {1.0, 1.0, 120.0, 24.0, 64.0, 12.0}
    )]
    fn factorial_evaluates_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(parse(expression).unwrap(), expected)
    }

    #[test]
    fn factorial_of_negated_operand_is_a_domain_error() {
        assert_eq!(
            parse("-1!").unwrap_err(),
            DomainError::NegativeFactorial(-1.0).into()
        )
    }

    #[test]
    fn factorial_wraps_like_a_native_integer() {
        let expected = (2..=21i64).fold(1i64, |product, i| product.wrapping_mul(i)) as f64;
        assert_eq!(parse("21!").unwrap(), expected);
        assert_eq!(parse("100!").unwrap(), 0.0)
    }

    #[test]
    fn factorial_is_rejected_when_disabled() {
        let capabilities = Capabilities {
            postfix_factorial: false,
            ..Capabilities::default()
        };
        let error = Parser::new("5!", capabilities).parse().unwrap_err();
        assert_eq!(
            error,
            ParseError::UnexpectedCharacter {
                character: '!',
                position: 1
            }
            .into()
        )
    }
}
