use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed user-facing message for a failed refresh cycle.
///
/// The underlying cause is only ever logged; consumers never see it.
pub const MENU_UNAVAILABLE_MESSAGE: &str =
    "Could not load today's menu. Please try again in a few minutes.";

// ============================================================================
// Menu Models
// ============================================================================

/// MenuRecord is one structured row of the source table.
///
/// `date` is an ISO `YYYY-MM-DD` string key compared by exact equality
/// against "today"; it is never parsed into a date object. `price` is a
/// free-text label, no arithmetic is performed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub date: String,
    pub category: String,
    pub name: String,
    pub price: String,
}

/// MenuView is the grouped-and-ordered structure handed to presentation.
///
/// Categories appear in display order; records within a category keep their
/// source row order. Rebuilt wholesale on every refresh cycle, nothing is
/// mutated incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuView {
    categories: Vec<String>,
    by_category: HashMap<String, Vec<MenuRecord>>,
}

impl MenuView {
    pub fn new(categories: Vec<String>, by_category: HashMap<String, Vec<MenuRecord>>) -> Self {
        Self {
            categories,
            by_category,
        }
    }

    /// Category names in display order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Records for one category, in source row order.
    pub fn records_for(&self, category: &str) -> &[MenuRecord] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when no record matched today's date ("menu not updated yet").
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total record count across all categories.
    pub fn record_count(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }
}

/// MenuState is the single exposed-state slot consumed by presentation.
///
/// Every transition replaces the slot wholesale; when refresh cycles
/// overlap, the last cycle to resolve wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MenuState {
    Idle,
    Loading,
    Ready {
        view: MenuView,
        /// Human-readable "as of" label, e.g. "Monday, January 1".
        as_of: String,
    },
    Error {
        message: String,
    },
}

impl MenuState {
    pub fn is_ready(&self) -> bool {
        matches!(self, MenuState::Ready { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MenuState::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, name: &str) -> MenuRecord {
        MenuRecord {
            date: "2024-01-01".to_string(),
            category: category.to_string(),
            name: name.to_string(),
            price: "50".to_string(),
        }
    }

    #[test]
    fn test_view_accessors() {
        let mut by_category = HashMap::new();
        by_category.insert("Lunch".to_string(), vec![record("Lunch", "Rice")]);
        let view = MenuView::new(vec!["Lunch".to_string()], by_category);

        assert!(!view.is_empty());
        assert_eq!(view.categories(), ["Lunch".to_string()]);
        assert_eq!(view.records_for("Lunch").len(), 1);
        assert!(view.records_for("Dinner").is_empty());
        assert_eq!(view.record_count(), 1);
    }

    #[test]
    fn test_empty_view() {
        let view = MenuView::default();
        assert!(view.is_empty());
        assert_eq!(view.record_count(), 0);
    }

    #[test]
    fn test_state_serializes_with_status_tag() {
        let json = serde_json::to_value(&MenuState::Loading).unwrap();
        assert_eq!(json["status"], "loading");

        let json = serde_json::to_value(&MenuState::Ready {
            view: MenuView::default(),
            as_of: "Monday, January 1".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["as_of"], "Monday, January 1");
    }

    #[test]
    fn test_state_predicates() {
        assert!(MenuState::Ready {
            view: MenuView::default(),
            as_of: "Monday, January 1".to_string(),
        }
        .is_ready());
        assert!(MenuState::Error {
            message: MENU_UNAVAILABLE_MESSAGE.to_string(),
        }
        .is_error());
        assert!(!MenuState::Loading.is_ready());
    }
}
