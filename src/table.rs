use anyhow::{bail, Context, Result};
use log::debug;
use serde::{de, Deserialize, Deserializer};
use serde_with::DeserializeFromStr;

use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt::Display,
    path::Path,
    str::FromStr,
};

use crate::usd::Usd;

/// The header names every input file must carry, in output column order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "ORDER ID",
    "ITEM NUMBER",
    "PRODUCT LINE",
    "ITEM QUANTITY",
    "ITEM PRICE",
];

/// An order identifier or item number as it appears in the export.
///
/// Values that read as integers are compared numerically, so `7` and `07`
/// name the same order; anything else is kept as verbatim text. Integers
/// sort before text.
#[derive(Clone, Debug, DeserializeFromStr, Eq, Hash, PartialEq)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl FromStr for Key {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().parse() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Int(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Defines the CSV format for one line of a sales order.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SalesRow {
    #[serde(rename = "ORDER ID")]
    pub order_id: Key,
    #[serde(rename = "ITEM NUMBER")]
    pub item_number: Key,
    #[serde(rename = "PRODUCT LINE")]
    pub product_line: String,
    #[serde(rename = "ITEM QUANTITY", deserialize_with = "deserialize_qty")]
    pub qty: f64,
    #[serde(rename = "ITEM PRICE")]
    pub price: Usd,
}

/// Reads a quantity the way [`Usd`] reads a price: surrounding whitespace is
/// ignored, and the value must be a finite number.
fn deserialize_qty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let text = String::deserialize(deserializer)?;
    let qty: f64 = text.trim().parse().map_err(de::Error::custom)?;
    if !qty.is_finite() {
        return Err(de::Error::custom(format!("not a finite quantity: {text:?}")));
    }
    Ok(qty)
}

/// Holds every row of a sales export, in file order.
#[derive(Debug, Default)]
pub struct OrderTable {
    pub columns: Vec<String>,
    pub rows: Vec<SalesRow>,
}

impl OrderTable {
    /// Reads the sales export at `path`.
    ///
    /// Header names are used exactly as written. All of
    /// [`REQUIRED_COLUMNS`] are checked for up front, before any row is
    /// read; other columns are carried in [`Self::columns`] but otherwise
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file cannot be opened or is not valid CSV
    /// * Any required column is missing from the header
    /// * A quantity or price is not a number
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut rdr = csv::Reader::from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let columns: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading header of {}", path.display()))?
            .iter()
            .map(String::from)
            .collect();
        debug!("columns in {}: {columns:?}", path.display());
        let missing: Vec<_> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| !columns.iter().any(|c| c == name))
            .collect();
        if !missing.is_empty() {
            bail!(
                "reading {}: missing required column(s): {missing:?}",
                path.display()
            );
        }
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            let row: SalesRow = result.with_context(|| format!("{}", path.display()))?;
            rows.push(row);
        }
        Ok(Self { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_str_fn_parses_integers_and_keeps_text_verbatim() {
        assert_eq!(Key::from_str("7").unwrap(), Key::Int(7));
        assert_eq!(Key::from_str("007").unwrap(), Key::Int(7));
        assert_eq!(Key::from_str(" 12 ").unwrap(), Key::Int(12));
        assert_eq!(
            Key::from_str("SO-12 ").unwrap(),
            Key::Text("SO-12 ".to_string())
        );
    }

    #[test]
    fn key_ord_puts_integers_first_and_compares_numerically() {
        let mut keys = vec![
            Key::Text("b".into()),
            Key::Int(10),
            Key::Text("a".into()),
            Key::Int(2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                Key::Int(2),
                Key::Int(10),
                Key::Text("a".into()),
                Key::Text("b".into()),
            ]
        );
    }

    #[test]
    fn read_csv_fn_correctly_parses_order_data() {
        let table = OrderTable::read_csv("testdata/orders.csv").unwrap();
        assert_eq!(table.rows.len(), 7, "wrong row count");
        assert_eq!(
            table.columns,
            vec![
                "ORDER ID",
                "ITEM NUMBER",
                "PRODUCT LINE",
                "ITEM QUANTITY",
                "ITEM PRICE",
                "CUSTOMER"
            ]
        );
        assert_eq!(
            table.rows[0],
            SalesRow {
                order_id: Key::Int(1001),
                item_number: Key::Int(3),
                product_line: "Classic Cars".to_string(),
                qty: 2.0,
                price: Usd::new(95.7),
            }
        );
    }

    #[test]
    fn read_csv_fn_returns_error_for_missing_column() {
        let err = OrderTable::read_csv("testdata/orders_missing_column.csv").unwrap_err();
        assert!(format!("{err:#}").contains("ITEM PRICE"), "{err:#}");
    }

    #[test]
    fn read_csv_fn_returns_error_for_non_numeric_price() {
        let err = OrderTable::read_csv("testdata/orders_bad_price.csv").unwrap_err();
        assert!(
            format!("{err:#}").contains("orders_bad_price.csv"),
            "{err:#}"
        );
    }

    #[test]
    fn read_csv_fn_returns_error_for_non_numeric_quantity() {
        assert!(OrderTable::read_csv("testdata/orders_bad_quantity.csv").is_err());
    }

    #[test]
    fn read_csv_fn_ignores_whitespace_around_quantity_and_price() {
        let table = OrderTable::read_csv("testdata/orders_padded_numbers.csv").unwrap();
        assert_eq!(table.rows[0].qty, 2.0);
        assert_eq!(table.rows[0].price, Usd::new(3.0));
    }

    #[test]
    fn read_csv_fn_accepts_header_only_file() {
        let table = OrderTable::read_csv("testdata/orders_empty.csv").unwrap();
        assert!(table.rows.is_empty());
    }
}
