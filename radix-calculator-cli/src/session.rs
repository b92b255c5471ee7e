use anyhow::{Context, Result};
use log::debug;
use radix_calculator::interpreter::{evaluate_with, Capabilities};
use radix_calculator::radix::reading::{conversion_row, read_value};
use radix_calculator::radix::{to_base, Radix};
use radix_calculator::report::render_table;
use std::io::{BufRead, Lines, Write};

pub const DEFAULT_PRECISION: usize = 10;

/// Typing this, in any case, ends a session.
const STOP: &str = "STOP";

/// Evaluates a decimal expression and writes its value in binary.
pub fn convert_to_binary(expression: &str, precision: usize) -> Result<String> {
    let value = evaluate_with(expression, Capabilities::binary_converter())?;
    let binary = to_base(value, Radix::Binary.base(), precision)?;
    Ok(binary)
}

/// Reads a number in the `origin` radix and renders it in all four radices, origin first.
pub fn convert_between_radices(number: &str, origin: Radix, precision: usize) -> Result<Vec<String>> {
    let value = read_value(number, origin, Capabilities::radix_converter())?;
    let row = conversion_row(value, origin, precision)?;
    Ok(row)
}

/// Prompts for decimal expressions until `STOP` or the end of input, then prints every
/// stored conversion as a table.
pub fn run_binary_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    precision: usize,
) -> Result<()> {
    let mut lines = input.lines();
    let mut rows = Vec::new();

    while let Some(expression) = prompt(&mut lines, output, "Decimal: ")? {
        match convert_to_binary(&expression, precision) {
            Ok(binary) => {
                debug!("stored {} as {}", expression, binary);
                rows.push(vec![expression, binary]);
                writeln!(
                    output,
                    ">> Conversion stored. Enter next number or type '{}' to display results.\n",
                    STOP
                )?;
            }
            Err(error) => writeln!(output, ">> Invalid input: {}\n", error)?,
        }
    }

    print_results(output, &["Input", "Output"], &rows)
}

/// Prompts for an origin radix and a number until `STOP` or the end of input, then prints
/// every stored conversion as a table.
pub fn run_radix_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    precision: usize,
) -> Result<()> {
    let mut lines = input.lines();
    let mut rows = Vec::new();

    while let Some(base) = prompt(&mut lines, output, "Enter origin base (2, 8, 10, 16): ")? {
        let origin = match base.parse::<u32>() {
            Err(_) => {
                writeln!(output, ">> Invalid input. Enter 2, 8, 10, or 16.\n")?;
                continue;
            }
            Ok(base) => match Radix::try_from(base) {
                Ok(origin) => origin,
                Err(_) => {
                    writeln!(
                        output,
                        ">> Invalid base. Only bases 2, 8, 10, and 16 are allowed.\n"
                    )?;
                    continue;
                }
            },
        };

        let prompt_text = format!("Enter number in base {}: ", origin);
        let number = match prompt(&mut lines, output, &prompt_text)? {
            Some(number) => number,
            None => break,
        };

        match convert_between_radices(&number, origin, precision) {
            Ok(row) => {
                debug!("stored {} from base {} as {:?}", number, origin, row);
                rows.push(row);
                writeln!(
                    output,
                    ">> Conversion stored. Enter next conversion or type '{}' to display results.\n",
                    STOP
                )?;
            }
            Err(error) => writeln!(output, ">> Invalid input: {}\n", error)?,
        }
    }

    print_results(
        output,
        &["Input", "Output 1", "Output 2", "Output 3"],
        &rows,
    )
}

/// Writes the prompt and reads the next trimmed line. `None` when the session should end.
fn prompt<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    output: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush().context("Failed to flush prompt")?;

    let line = match lines.next() {
        Some(line) => line.context("Failed to read input")?,
        None => return Ok(None),
    };
    let line = line.trim();
    if line.eq_ignore_ascii_case(STOP) {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}

fn print_results<W: Write>(output: &mut W, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    if rows.is_empty() {
        writeln!(output, "No conversions to display.")?;
    } else {
        write!(output, "{}", render_table(headers, rows)?)?;
    }
    Ok(())
}
