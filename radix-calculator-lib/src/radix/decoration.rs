/// Subscript glyphs, indexed by decimal digit.
const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Renders a number as Unicode subscript digits, e.g. `16` becomes `₁₆`.
pub fn subscript(number: u32) -> String {
    number
        .to_string()
        .chars()
        .filter_map(|digit| digit.to_digit(10))
        .map(|digit| SUBSCRIPTS[digit as usize])
        .collect()
}

/// Wraps converted digits in parentheses followed by the base as a subscript.
///
/// # Examples
///
/// ```
/// use radix_calculator::radix::decoration::decorate;
///
/// assert_eq!(decorate("ff", 16), "(FF)₁₆");
/// ```
pub fn decorate(digits: &str, base: u32) -> String {
    format!("({}){}", digits.to_uppercase(), subscript(base))
}
