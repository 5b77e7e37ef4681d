use std::collections::HashMap;

use crate::table::{Key, SalesRow};

/// All the rows belonging to one order, sorted by item number.
#[derive(Debug, PartialEq)]
pub struct OrderGroup {
    pub order_id: Key,
    pub rows: Vec<SalesRow>,
}

/// Partitions `rows` into one [`OrderGroup`] per distinct order ID.
///
/// Groups come out in the order their IDs first appear. Within a group,
/// rows are sorted by item number; rows with equal item numbers keep their
/// file order.
#[must_use]
pub fn group_orders(rows: Vec<SalesRow>) -> Vec<OrderGroup> {
    let mut index: HashMap<Key, usize> = HashMap::new();
    let mut groups: Vec<OrderGroup> = Vec::new();
    for row in rows {
        let i = *index.entry(row.order_id.clone()).or_insert_with(|| {
            groups.push(OrderGroup {
                order_id: row.order_id.clone(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[i].rows.push(row);
    }
    for group in &mut groups {
        group.rows.sort_by(|a, b| a.item_number.cmp(&b.item_number));
    }
    groups
}
