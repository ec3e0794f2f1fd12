//! Discounts Calculator CLI
//!
//! Computes one discount breakdown from arguments, or a whole CSV batch.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- total_percentage 456.78 12.3 32.1
//! cargo run -- base_fixed 100 5 21 2 half_even
//! cargo run -- --batch requests.csv > results.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use discounts_calculator::{
    parse_precision, BatchError, BatchProcessor, CalculationOptions, DiscountResult, DiscountType,
    Result, RoundingMode,
};
use rust_decimal::Decimal;
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;
use std::str::FromStr;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => Err(BatchError::MissingArgument),
        Some("--batch") => {
            let input_path = args.get(1).ok_or(BatchError::MissingArgument)?;
            run_batch(input_path)
        }
        Some(_) => run_single(&args),
    }
}

fn run_batch(input_path: &str) -> Result<()> {
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let stdout = io::stdout();
    let handle = stdout.lock();

    let mut processor = BatchProcessor::new();
    processor.process_csv(reader, handle)?;

    Ok(())
}

fn run_single(args: &[String]) -> Result<()> {
    if args.len() < 3 {
        return Err(BatchError::MissingArgument);
    }

    let discount_type = DiscountType::from_str(&args[0]).map_err(|_| invalid("type", &args[0]))?;
    let base = parse_decimal("base", &args[1])?;
    let discount = parse_decimal("discount", &args[2])?;
    let tax = match args.get(3) {
        Some(raw) => parse_decimal("tax", raw)?,
        None => Decimal::ZERO,
    };

    let mut options = CalculationOptions::default();
    if let Some(raw) = args.get(4) {
        options.precision = parse_precision(raw).map_err(|_| invalid("precision", raw))?;
    }
    if let Some(raw) = args.get(5) {
        options.rounding_mode =
            RoundingMode::from_str(raw).map_err(|_| invalid("rounding", raw))?;
    }

    let result = DiscountResult::compute(discount_type, base, discount, tax, options)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_breakdown(&mut handle, &result)?;

    Ok(())
}

fn parse_decimal(name: &'static str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| invalid(name, raw))
}

fn invalid(name: &'static str, raw: &str) -> BatchError {
    BatchError::InvalidArgument {
        name,
        value: raw.to_string(),
    }
}

fn write_breakdown<W: Write>(out: &mut W, result: &DiscountResult) -> io::Result<()> {
    let precision = result.precision() as usize;

    writeln!(out, "Base {}", result.base())?;
    writeln!(out, "Discount {}", result.discount())?;
    writeln!(out, "Tax {}", result.tax())?;
    writeln!(out, "Subtotal Base {:.*}", precision, result.base_subtotal())?;
    writeln!(
        out,
        "Subtotal Discount {:.*}",
        precision,
        result.discount_subtotal()
    )?;
    writeln!(out, "Subtotal Tax {:.*}", precision, result.tax_subtotal())?;
    writeln!(out, "Total {:.*}", precision, result.total())?;
    out.flush()
}
