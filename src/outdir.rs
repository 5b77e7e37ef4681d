use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use log::debug;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Supplies the calendar date a run is filed under.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local date, as seen by the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Returns the output directory name for `date`, e.g. `Orders_2024-03-09`.
#[must_use]
pub fn orders_dir_name(date: NaiveDate) -> String {
    format!("Orders_{}", date.format("%Y-%m-%d"))
}

/// Creates (or reuses) the dated output directory inside `base_dir`.
///
/// Only the dated directory itself is created; `base_dir` must exist.
///
/// # Errors
///
/// Returns errors if the directory cannot be created, or if something
/// other than a directory already has its name.
pub fn create_orders_dir(base_dir: impl AsRef<Path>, date: NaiveDate) -> Result<PathBuf> {
    let dir = base_dir.as_ref().join(orders_dir_name(date));
    match fs::create_dir(&dir) {
        Ok(()) => debug!("created {}", dir.display()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if !dir.is_dir() {
                bail!("{} exists but is not a directory", dir.display());
            }
            debug!("reusing {}", dir.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("creating {}", dir.display()));
        }
    }
    Ok(dir)
}
