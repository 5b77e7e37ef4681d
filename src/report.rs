use crate::{groups::OrderGroup, table::Key, usd::Usd};

/// One item of an order, with its line total.
#[derive(Debug, PartialEq)]
pub struct PricedLine {
    pub order_id: Key,
    pub item_number: Key,
    pub product_line: String,
    pub qty: f64,
    pub price: Usd,
    pub total: Usd,
}

/// Holds an order ready for output: its items in item-number order, each
/// with a line total, and the grand total of the whole order.
///
/// To create one, use [`price_order`].
#[derive(Debug, PartialEq)]
pub struct PricedOrder {
    pub order_id: Key,
    pub lines: Vec<PricedLine>,
    pub grand_total: Usd,
}

/// Computes line totals and the grand total for `group`.
///
/// Each line total is price times quantity. The grand total is the sum of
/// the line totals, added up in row order. Nothing is rounded here; that is
/// left to presentation.
#[must_use]
pub fn price_order(group: OrderGroup) -> PricedOrder {
    let mut grand_total = Usd::default();
    let lines = group
        .rows
        .into_iter()
        .map(|row| {
            let total = row.price * row.qty;
            grand_total += total;
            PricedLine {
                order_id: row.order_id,
                item_number: row.item_number,
                product_line: row.product_line,
                qty: row.qty,
                price: row.price,
                total,
            }
        })
        .collect();
    PricedOrder {
        order_id: group.order_id,
        lines,
        grand_total,
    }
}
