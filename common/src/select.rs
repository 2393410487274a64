// Day filtering and category ordering for display

use crate::models::{MenuRecord, MenuView};
use std::collections::HashMap;

/// Fixed display priority for known meal categories. Categories not listed
/// here sort after all listed ones, in the order they first appear in the
/// source.
pub const CATEGORY_PRIORITY: [&str; 4] = ["Breakfast", "Lunch", "Snacks", "Dinner"];

fn category_rank(category: &str) -> usize {
    CATEGORY_PRIORITY
        .iter()
        .position(|known| *known == category)
        .unwrap_or(CATEGORY_PRIORITY.len())
}

/// Build the display view for one day.
///
/// Keeps a record iff its `date` equals `today` exactly (both are ISO
/// `YYYY-MM-DD` strings; no timezone normalization happens here), partitions
/// by category preserving source order within each group, and orders
/// categories by [`CATEGORY_PRIORITY`]. The sort is stable, so unknown
/// categories keep their first-encounter order. An empty view means "menu
/// not updated yet", not an error.
pub fn select(records: &[MenuRecord], today: &str) -> MenuView {
    let mut categories: Vec<String> = Vec::new();
    let mut by_category: HashMap<String, Vec<MenuRecord>> = HashMap::new();

    for record in records.iter().filter(|r| r.date == today) {
        if !by_category.contains_key(&record.category) {
            categories.push(record.category.clone());
        }
        by_category
            .entry(record.category.clone())
            .or_default()
            .push(record.clone());
    }

    categories.sort_by_key(|category| category_rank(category));

    MenuView::new(categories, by_category)
}
