use anyhow::{bail, Context, Result};
use itertools::Itertools;
use string_builder::Builder;

/// Extra spaces added to the widest cell of every column.
const PADDING: usize = 2;

/// Lays out collected conversions as a left-aligned table.
///
/// Every column is as wide as its widest cell plus two spaces, and columns are separated
/// by a single space. The table is surrounded by blank lines.
///
/// # Arguments
///
/// * `headers`: The title of every column.
/// * `rows`: The cells of every row, one per column.
///
/// returns: The table as text, or an error if a row does not fit the headers.
///
/// # Examples
///
/// ```
/// use radix_calculator::report::render_table;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let rows = vec![vec!["5".to_string(), "(101)₂".to_string()]];
/// let table = render_table(&["Input", "Output"], &rows)?;
/// print!("{}", table);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    if let Some((index, row)) = rows.iter().find_position(|row| row.len() != headers.len()) {
        bail!(
            "Row {} has {} cells but the table has {} columns",
            index,
            row.len(),
            headers.len()
        );
    }

    let widths: Vec<usize> = (0..headers.len())
        .map(|column| {
            rows.iter()
                .map(|row| row[column].as_str())
                .chain(std::iter::once(headers[column]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or_default()
                + PADDING
        })
        .collect();

    let mut builder = Builder::new(widths.iter().sum::<usize>() * (rows.len() + 1));
    builder.append("\n");
    append_line(&mut builder, headers.iter().copied(), &widths);
    for row in rows {
        append_line(&mut builder, row.iter().map(String::as_str), &widths);
    }
    builder.append("\n");

    builder.string().context("Failed to build result table")
}

fn append_line<'a>(builder: &mut Builder, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .join(" ");
    builder.append(line);
    builder.append("\n");
}
