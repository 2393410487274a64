// Property-based tests for day filtering and category ordering
// Feature: canteen-menu

use common::models::MenuRecord;
use common::parser::parse;
use common::select::{select, CATEGORY_PRIORITY};
use proptest::prelude::*;

fn date_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "2024-01-01".to_string(),
        "2024-01-02".to_string(),
        "2024-06-15".to_string(),
        "2025-12-31".to_string(),
    ])
}

fn category() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Breakfast".to_string(),
        "Lunch".to_string(),
        "Snacks".to_string(),
        "Dinner".to_string(),
        "Juice Bar".to_string(),
        "Night Mess".to_string(),
    ])
}

fn records() -> impl Strategy<Value = Vec<MenuRecord>> {
    prop::collection::vec(
        (date_key(), category(), "[A-Za-z]{1,8}", "[0-9]{1,3}").prop_map(
            |(date, category, name, price)| MenuRecord {
                date,
                category,
                name,
                price,
            },
        ),
        0..30,
    )
}

/// **Feature: canteen-menu, Property 5: A record survives iff its date is today**
///
/// *For any* record set and any `today`, the view contains exactly the
/// records whose `date` equals `today`, and no others.
#[test]
fn property_select_filters_by_exact_date() {
    proptest!(|(records in records(), today in date_key())| {
        let view = select(&records, &today);

        let expected: Vec<&MenuRecord> =
            records.iter().filter(|r| r.date == today).collect();
        prop_assert_eq!(view.record_count(), expected.len());

        for category in view.categories() {
            for record in view.records_for(category) {
                prop_assert_eq!(&record.date, &today);
            }
        }
    });
}

/// **Feature: canteen-menu, Property 6: Categories follow the fixed priority**
///
/// *For any* record set, listed categories appear in priority-list order and
/// every unlisted category appears after all listed ones.
#[test]
fn property_select_orders_categories_by_priority() {
    proptest!(|(records in records(), today in date_key())| {
        let view = select(&records, &today);
        let rank = |c: &str| {
            CATEGORY_PRIORITY
                .iter()
                .position(|known| *known == c)
                .unwrap_or(CATEGORY_PRIORITY.len())
        };

        let ranks: Vec<usize> = view.categories().iter().map(|c| rank(c)).collect();
        prop_assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
    });
}

/// **Feature: canteen-menu, Property 7: Source order survives grouping**
///
/// *For any* record set, records within one category keep their relative
/// source order.
#[test]
fn property_select_preserves_order_within_category() {
    proptest!(|(records in records(), today in date_key())| {
        let view = select(&records, &today);

        for category in view.categories() {
            let grouped = view.records_for(category);
            let mut source_iter = records
                .iter()
                .filter(|r| r.date == today && &r.category == category);
            for record in grouped {
                prop_assert_eq!(Some(record), source_iter.next());
            }
            prop_assert_eq!(source_iter.next(), None);
        }
    });
}

/// **Feature: canteen-menu, Property 8: The full pipeline is idempotent**
///
/// *For any* raw sheet and any `today`, running parse + select twice on
/// identical input yields identical views.
#[test]
fn property_pipeline_is_idempotent() {
    proptest!(|(records in records(), today in date_key())| {
        let mut raw = String::from("Date,Meal_Type,Item_Name,Price\n");
        for r in &records {
            raw.push_str(&format!("{},{},{},{}\n", r.date, r.category, r.name, r.price));
        }

        let first = select(&parse(&raw, ','), &today);
        let second = select(&parse(&raw, ','), &today);
        prop_assert_eq!(first, second);
    });
}

#[test]
fn fixed_category_order_is_breakfast_lunch_snacks_dinner() {
    assert_eq!(
        CATEGORY_PRIORITY,
        ["Breakfast", "Lunch", "Snacks", "Dinner"]
    );
}

/// One day's sheet with a malformed row: categories come out ordered, the
/// bad row is gone, and each category holds its own records.
#[test]
fn scenario_one_day_sheet_with_malformed_row() {
    let raw =
        "Date,Meal_Type,Item_Name,Price\n2024-01-01,Lunch,Rice,50\n2024-01-01,Breakfast,Idli,30\nbadrow,onlytwo\n";
    let view = select(&parse(raw, ','), "2024-01-01");

    assert_eq!(view.categories(), ["Breakfast", "Lunch"]);
    assert_eq!(view.records_for("Breakfast").len(), 1);
    assert_eq!(view.records_for("Breakfast")[0].name, "Idli");
    assert_eq!(view.records_for("Breakfast")[0].price, "30");
    assert_eq!(view.records_for("Lunch")[0].name, "Rice");
    assert_eq!(view.records_for("Lunch")[0].price, "50");
    assert_eq!(view.record_count(), 2);
}

/// No row matches today: the view is empty, which is a valid "not updated
/// yet" result rather than an error.
#[test]
fn scenario_no_row_for_today_yields_empty_view() {
    let raw = "Date,Meal_Type,Item_Name,Price\n2024-01-01,Lunch,Rice,50\n";
    let view = select(&parse(raw, ','), "2024-01-02");
    assert!(view.is_empty());
    assert_eq!(view.record_count(), 0);
}
