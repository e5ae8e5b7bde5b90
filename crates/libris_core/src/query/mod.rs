//! Item orders and read-only cursors.

mod cursor;
mod order;

pub use cursor::Cursor;
pub use order::{
    by_availability, by_category_then_title, by_title, by_year_desc, sort_items, ItemOrder,
};
