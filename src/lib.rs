#![doc = include_str!("../README.md")]
use anyhow::{bail, Result};
use log::info;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub mod groups;
pub mod input;
pub mod outdir;
pub mod report;
pub mod table;
pub mod usd;
pub mod writer;

pub use groups::{group_orders, OrderGroup};
pub use input::{validate_input, InputError};
pub use outdir::{create_orders_dir, Clock, FixedClock, SystemClock};
pub use report::{price_order, PricedLine, PricedOrder};
pub use table::{Key, OrderTable, SalesRow};
pub use usd::Usd;
pub use writer::{order_file_name, write_order};

/// What a successful [`run`] produced.
#[derive(Debug, Default)]
pub struct Run {
    pub output_dir: PathBuf,
    pub documents: Vec<PathBuf>,
}

/// Splits the sales export at `path` into one spreadsheet per order.
///
/// The documents go in a directory named for `clock`'s date, next to the
/// input file. The first failure stops the run; documents already written
/// are left in place.
///
/// `path` should already have passed [`validate_input`].
///
/// # Errors
///
/// Returns any error from creating the output directory, reading the
/// export, or writing a document. Two order IDs that map to the same
/// document name (for example `A/B` and `A_B`) are also an error, raised
/// before either document is written.
pub fn run(path: impl AsRef<Path>, clock: &impl Clock) -> Result<Run> {
    let path = path.as_ref();
    let base_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let output_dir = create_orders_dir(base_dir, clock.today())?;
    let table = OrderTable::read_csv(path)?;
    let groups = group_orders(table.rows);
    let mut names: HashMap<String, &Key> = HashMap::new();
    for group in &groups {
        let name = order_file_name(&group.order_id);
        if let Some(other) = names.insert(name.clone(), &group.order_id) {
            bail!(
                "reading {}: orders {other} and {} would both be written to {name}",
                path.display(),
                group.order_id
            );
        }
    }
    let mut documents = Vec::new();
    for group in groups {
        let order = price_order(group);
        documents.push(write_order(&order, &output_dir)?);
    }
    info!(
        "{} order document(s) in {}",
        documents.len(),
        output_dir.display()
    );
    Ok(Run {
        output_dir,
        documents,
    })
}
