//! Sample catalogue data.
//!
//! Item `i` is named `Test Item{i}`, priced `10000 + i` and described as
//! `Test Item Detail{i}`, so price and detail searches have predictable
//! answers.

use domain::{Item, ItemSellStatus};

const BASE_PRICE: i32 = 10_000;

/// Build the `i`-th sample item. Sold-out items carry no stock.
///
/// Prices saturate at `i32::MAX`.
pub fn sample_item(i: i32, sell_status: ItemSellStatus) -> Item {
    let stock_number = match sell_status {
        ItemSellStatus::Sell => 100,
        ItemSellStatus::SoldOut => 0,
    };
    Item::new(
        format!("Test Item{}", i),
        BASE_PRICE.saturating_add(i),
        format!("Test Item Detail{}", i),
        sell_status,
        stock_number,
    )
}

/// Items `1..=count`, all on sale.
pub fn sample_items(count: u16) -> Vec<Item> {
    (1..=i32::from(count))
        .map(|i| sample_item(i, ItemSellStatus::Sell))
        .collect()
}

/// Items `1..=on_sale` on sale followed by `sold_out` sold-out items
/// numbered on from there.
pub fn mixed_sample_items(on_sale: u16, sold_out: u16) -> Vec<Item> {
    let on_sale = i32::from(on_sale);
    (1..=on_sale + i32::from(sold_out))
        .map(|i| {
            let status = if i <= on_sale {
                ItemSellStatus::Sell
            } else {
                ItemSellStatus::SoldOut
            };
            sample_item(i, status)
        })
        .collect()
}
