//! Total orders over items.
//!
//! Each order is a plain comparison function; [`ItemOrder`] names them so a
//! caller can pick one at runtime. Sorting is always stable.

use crate::model::Item;
use std::cmp::Ordering;

/// Case-sensitive lexicographic title order. Empty titles sort first.
pub fn by_title(a: &Item, b: &Item) -> Ordering {
    a.title().cmp(b.title())
}

/// Newest publication year first.
pub fn by_year_desc(a: &Item, b: &Item) -> Ordering {
    b.year().cmp(&a.year())
}

/// Available items before unavailable ones; no further tie-break.
pub fn by_availability(a: &Item, b: &Item) -> Ordering {
    b.is_available().cmp(&a.is_available())
}

/// Category declaration order, then case-insensitive title.
pub fn by_category_then_title(a: &Item, b: &Item) -> Ordering {
    a.category()
        .cmp(&b.category())
        .then_with(|| cmp_ignore_case(a.title(), b.title()))
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// A named item order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrder {
    /// See [`by_title`].
    Title,
    /// See [`by_year_desc`].
    YearDesc,
    /// See [`by_availability`].
    Availability,
    /// See [`by_category_then_title`].
    CategoryThenTitle,
}

impl ItemOrder {
    /// Returns the comparison function for this order.
    pub fn comparator(self) -> fn(&Item, &Item) -> Ordering {
        match self {
            ItemOrder::Title => by_title,
            ItemOrder::YearDesc => by_year_desc,
            ItemOrder::Availability => by_availability,
            ItemOrder::CategoryThenTitle => by_category_then_title,
        }
    }
}

/// Stable in-place sort; returns the slice for chaining.
pub fn sort_items(items: &mut [Item], order: ItemOrder) -> &mut [Item] {
    items.sort_by(order.comparator());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::title).collect()
    }

    fn catalog() -> Vec<Item> {
        let mut taken = Item::new("222", "Crime and Punishment", 1866, Category::Romance);
        taken.set_available(false);
        vec![
            Item::new("111", "War and Peace", 1869, Category::Romance),
            taken,
            Item::new("333", "harry Potter", 1997, Category::Fantasy),
        ]
    }

    #[test]
    fn title_is_case_sensitive() {
        let mut items = catalog();
        sort_items(&mut items, ItemOrder::Title);
        assert_eq!(
            titles(&items),
            vec!["Crime and Punishment", "War and Peace", "harry Potter"]
        );
    }

    #[test]
    fn empty_title_sorts_first() {
        let mut items = catalog();
        items.push(Item::new("444", "", 2000, Category::Science));
        items.push(Item::new("555", "", 2001, Category::Science));
        sort_items(&mut items, ItemOrder::Title);

        assert_eq!(items[0].id(), "444");
        assert_eq!(items[1].id(), "555");
        assert_eq!(by_title(&items[0], &items[1]), Ordering::Equal);
    }

    #[test]
    fn year_descending() {
        let mut items = catalog();
        let sorted = sort_items(&mut items, ItemOrder::YearDesc);
        let years: Vec<i32> = sorted.iter().map(Item::year).collect();
        assert_eq!(years, vec![1997, 1869, 1866]);
    }

    #[test]
    fn availability_keeps_relative_order() {
        let mut items = catalog();
        sort_items(&mut items, ItemOrder::Availability);
        let ids: Vec<&str> = items.iter().map(Item::id).collect();
        assert_eq!(ids, vec!["111", "333", "222"]);
    }

    #[test]
    fn category_then_title_ignores_case() {
        let mut items = catalog();
        items.push(Item::new("444", "alpha", 1900, Category::Romance));
        sort_items(&mut items, ItemOrder::CategoryThenTitle);
        assert_eq!(
            titles(&items),
            vec!["harry Potter", "alpha", "Crime and Punishment", "War and Peace"]
        );
    }

    #[test]
    fn comparators_are_consistent_on_equal_inputs() {
        let item = Item::new("111", "Same", 2000, Category::Science);
        for order in [
            ItemOrder::Title,
            ItemOrder::YearDesc,
            ItemOrder::Availability,
            ItemOrder::CategoryThenTitle,
        ] {
            assert_eq!((order.comparator())(&item, &item), Ordering::Equal);
        }
    }
}
