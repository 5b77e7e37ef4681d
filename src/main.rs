use clap::Parser;
use env_logger::Env;

use std::{ffi::OsString, path::PathBuf, process};

use orders::{run, validate_input, SystemClock};

#[derive(Parser)]
#[command(version, about)]
/// Splits a sales-order CSV export into one spreadsheet per order.
///
/// The spreadsheets are written to a folder named Orders_YYYY-MM-DD (today's
/// date) next to the input file.
struct Args {
    /// Path to the sales data CSV file.
    // Taken as `OsString` so an empty argument reaches `validate_input`.
    path: Option<OsString>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let path = args.path.map(PathBuf::from);
    let path = match validate_input(path.as_deref()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    match run(path, &SystemClock) {
        Ok(done) => println!(
            "Excel files have been generated in {}",
            done.output_dir.display()
        ),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
