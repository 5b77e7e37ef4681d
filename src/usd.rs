use anyhow::bail;
use serde_with::DeserializeFromStr;

use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, Mul},
    str::FromStr,
};

/// Represents an amount of money in USD currency.
///
/// The amount is held as a plain `f64` so that line totals and grand totals
/// carry no rounding until they are presented. The [`Display`]
/// implementation rounds to cents and groups thousands, the same way the
/// spreadsheet currency format `$#,##0.00` does.
#[derive(Clone, Copy, Default, DeserializeFromStr, PartialEq, PartialOrd)]
pub struct Usd(f64);

impl Usd {
    #[must_use]
    pub fn new(dollars: f64) -> Self {
        Self(dollars)
    }

    /// Returns the unrounded amount in dollars.
    #[must_use]
    pub fn dollars(self) -> f64 {
        self.0
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fixed = format!("{:.2}", self.0.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        let sign = if self.0 < 0.0 && fixed != "0.00" { "-" } else { "" };
        write!(f, "{sign}${grouped}.{cents}")
    }
}

impl FromStr for Usd {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let dollars: f64 = s.trim().replace(',', "").parse()?;
        if !dollars.is_finite() {
            bail!("not a finite amount: {s:?}");
        }
        Ok(Self(dollars))
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Usd {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
