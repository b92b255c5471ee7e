mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use radix_calculator::radix::Radix;
use std::io;

/// Converts numbers and arithmetic expressions between number systems
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    #[clap(flatten)]
    verbose: Verbosity,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Converts decimal expressions to binary. Starts an interactive session when no
    /// expression is given
    Binary {
        /// The expression to convert, e.g. "2(3+4)" or "2 1/3"
        expression: Vec<String>,

        /// The largest number of digits after the binary point
        #[clap(short, long, default_value_t = session::DEFAULT_PRECISION)]
        precision: usize,
    },
    /// Converts between bases 2, 8, 10 and 16. Starts an interactive session when no
    /// number is given
    Radix {
        /// The base the number is written in
        #[clap(short, long)]
        from: Option<Radix>,

        /// The number, or a decimal expression, to convert
        #[clap(requires = "from")]
        number: Option<String>,

        /// The largest number of digits after the point
        #[clap(short, long, default_value_t = session::DEFAULT_PRECISION)]
        precision: usize,
    },
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    match args.command {
        Command::Binary {
            expression,
            precision,
        } if !expression.is_empty() => {
            let expression = expression.join(" ");
            let binary = session::convert_to_binary(&expression, precision)
                .with_context(|| format!("could not convert {}", expression))?;
            println!("{}", binary);
        }
        Command::Binary { precision, .. } => {
            session::run_binary_session(stdin.lock(), &mut stdout.lock(), precision)?
        }
        Command::Radix {
            from: Some(origin),
            number: Some(number),
            precision,
        } => {
            let row = session::convert_between_radices(&number, origin, precision)
                .with_context(|| format!("could not convert {} from base {}", number, origin))?;
            println!("{}", row.join(" = "));
        }
        Command::Radix { precision, .. } => {
            session::run_radix_session(stdin.lock(), &mut stdout.lock(), precision)?
        }
    }
    Ok(())
}
