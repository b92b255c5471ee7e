use crate::error::DomainError;
use std::f64::consts::{E, PI};
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A named value that takes no argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    Euler,
    Random,
}

/// A mathematical function of a single argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    SquareRoot,
    CubeRoot,
    Sine,
    Cosine,
    Tangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
    HyperbolicSine,
    HyperbolicCosine,
    HyperbolicTangent,
    NaturalLogarithm,
    CommonLogarithm,
    AbsoluteValue,
    Exponential,
}

/// Anything an identifier in an expression can name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Constant(Constant),
    Function(UnaryFunction),
}

impl Constant {
    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::Euler => "e",
            Constant::Random => "rand",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => PI,
            Constant::Euler => E,
            Constant::Random => rand::random::<f64>(),
        }
    }
}

impl UnaryFunction {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunction::SquareRoot => "sqrt",
            UnaryFunction::CubeRoot => "cbrt",
            UnaryFunction::Sine => "sin",
            UnaryFunction::Cosine => "cos",
            UnaryFunction::Tangent => "tan",
            UnaryFunction::ArcSine => "asin",
            UnaryFunction::ArcCosine => "acos",
            UnaryFunction::ArcTangent => "atan",
            UnaryFunction::HyperbolicSine => "sinh",
            UnaryFunction::HyperbolicCosine => "cosh",
            UnaryFunction::HyperbolicTangent => "tanh",
            UnaryFunction::NaturalLogarithm => "ln",
            UnaryFunction::CommonLogarithm => "log",
            UnaryFunction::AbsoluteValue => "abs",
            UnaryFunction::Exponential => "exp",
        }
    }

    /// Applies the function, rejecting any argument for which the result is not finite.
    pub fn evaluate(&self, x: f64) -> Result<f64, DomainError> {
        let result = match self {
            UnaryFunction::SquareRoot => x.sqrt(),
            UnaryFunction::CubeRoot => x.cbrt(),
            UnaryFunction::Sine => x.sin(),
            UnaryFunction::Cosine => x.cos(),
            UnaryFunction::Tangent => x.tan(),
            UnaryFunction::ArcSine => x.asin(),
            UnaryFunction::ArcCosine => x.acos(),
            UnaryFunction::ArcTangent => x.atan(),
            UnaryFunction::HyperbolicSine => x.sinh(),
            UnaryFunction::HyperbolicCosine => x.cosh(),
            UnaryFunction::HyperbolicTangent => x.tanh(),
            UnaryFunction::NaturalLogarithm => x.ln(),
            UnaryFunction::CommonLogarithm => x.log10(),
            UnaryFunction::AbsoluteValue => x.abs(),
            UnaryFunction::Exponential => x.exp(),
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(DomainError::Undefined {
                function: self.name().to_string(),
                argument: x,
            })
        }
    }
}

impl str::FromStr for Identifier {
    type Err = ();

    /// Names are case-insensitive.
    fn from_str(input: &str) -> Result<Identifier, Self::Err> {
        let identifier = match input.to_lowercase().as_str() {
            "pi" | "π" => Identifier::Constant(Constant::Pi),
            "e" => Identifier::Constant(Constant::Euler),
            "rand" => Identifier::Constant(Constant::Random),
            "sqrt" | "√" => Identifier::Function(UnaryFunction::SquareRoot),
            "cbrt" => Identifier::Function(UnaryFunction::CubeRoot),
            "sin" => Identifier::Function(UnaryFunction::Sine),
            "cos" => Identifier::Function(UnaryFunction::Cosine),
            "tan" => Identifier::Function(UnaryFunction::Tangent),
            "asin" => Identifier::Function(UnaryFunction::ArcSine),
            "acos" => Identifier::Function(UnaryFunction::ArcCosine),
            "atan" => Identifier::Function(UnaryFunction::ArcTangent),
            "sinh" => Identifier::Function(UnaryFunction::HyperbolicSine),
            "cosh" => Identifier::Function(UnaryFunction::HyperbolicCosine),
            "tanh" => Identifier::Function(UnaryFunction::HyperbolicTangent),
            "ln" => Identifier::Function(UnaryFunction::NaturalLogarithm),
            "log" => Identifier::Function(UnaryFunction::CommonLogarithm),
            "abs" => Identifier::Function(UnaryFunction::AbsoluteValue),
            "exp" => Identifier::Function(UnaryFunction::Exponential),
            _ => return Err(()),
        };
        Ok(identifier)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Constant(constant) => write!(f, "{}", constant.name()),
            Identifier::Function(function) => write!(f, "{}", function.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[parameterized(
    name = {"pi", "π", "PI", "e", "rand", "√", "Sqrt", "log", "tanh"},
    expected = {
    Identifier::Constant(Constant::Pi),
    Identifier::Constant(Constant::Pi),
    Identifier::Constant(Constant::Pi),
    Identifier::Constant(Constant::Euler),
    Identifier::Constant(Constant::Random),
    Identifier::Function(UnaryFunction::SquareRoot),
    Identifier::Function(UnaryFunction::SquareRoot),
    Identifier::Function(UnaryFunction::CommonLogarithm),
    Identifier::Function(UnaryFunction::HyperbolicTangent),
    }
    )]
    fn name_resolves_to_identifier(name: &str, expected: Identifier) {
        assert_eq!(name.parse::<Identifier>(), Ok(expected))
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("sinpi".parse::<Identifier>().is_err())
    }

    #[test]
    fn random_constant_is_in_unit_interval() {
        for _ in 0..100 {
            let value = Constant::Random.value();
            assert!((0.0..1.0).contains(&value))
        }
    }

    #[test]
    fn common_logarithm_is_base_ten() {
        assert_eq!(UnaryFunction::CommonLogarithm.evaluate(1000.0), Ok(3.0))
    }

    #[test]
    fn logarithm_of_zero_is_undefined() {
        let error = UnaryFunction::NaturalLogarithm.evaluate(0.0).unwrap_err();
        assert_eq!(
            error,
            DomainError::Undefined {
                function: "ln".to_string(),
                argument: 0.0
            }
        )
    }

    #[test]
    fn square_root_of_negative_is_undefined() {
        assert!(UnaryFunction::SquareRoot.evaluate(-4.0).is_err())
    }
}
