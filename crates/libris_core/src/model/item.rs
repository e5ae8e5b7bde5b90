//! Catalog items and their categories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Fixed classification of an item.
///
/// Declaration order is significant: it is the primary key of
/// [`by_category_then_title`](crate::query::by_category_then_title).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Fiction.
    Fiction,
    /// Non-fiction.
    NonFiction,
    /// Science.
    Science,
    /// History.
    History,
    /// Fantasy.
    Fantasy,
    /// Detective stories.
    Detective,
    /// Romance.
    Romance,
    /// Biography.
    Biography,
    /// Children's books.
    Children,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 9] = [
        Category::Fiction,
        Category::NonFiction,
        Category::Science,
        Category::History,
        Category::Fantasy,
        Category::Detective,
        Category::Romance,
        Category::Biography,
        Category::Children,
    ];

    /// Returns the upper-snake name used in exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Fiction => "FICTION",
            Category::NonFiction => "NON_FICTION",
            Category::Science => "SCIENCE",
            Category::History => "HISTORY",
            Category::Fantasy => "FANTASY",
            Category::Detective => "DETECTIVE",
            Category::Romance => "ROMANCE",
            Category::Biography => "BIOGRAPHY",
            Category::Children => "CHILDREN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A catalog entry.
///
/// Two items are equal when their identifiers are equal; every other field is
/// ignored by `PartialEq` and `Hash`. Availability can only be changed by the
/// lending path inside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: String,
    title: String,
    contributors: BTreeSet<String>,
    category: Category,
    year: i32,
    extent: u32,
    available: bool,
}

impl Item {
    /// Creates an available item with no contributors and an extent of 0.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            contributors: BTreeSet::new(),
            category,
            year,
            extent: 0,
            available: true,
        }
    }

    /// Replaces the contributor set.
    #[must_use]
    pub fn with_contributors<I, S>(mut self, contributors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contributors = contributors.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one contributor.
    #[must_use]
    pub fn with_contributor(mut self, contributor: impl Into<String>) -> Self {
        self.contributors.insert(contributor.into());
        self
    }

    /// Sets the extent in pages.
    #[must_use]
    pub const fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    /// Returns the catalog identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the title. An empty title stands for "no title".
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the contributors in sorted order.
    pub fn contributors(&self) -> &BTreeSet<String> {
        &self.contributors
    }

    /// Returns the category.
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the publication year.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the extent in pages.
    pub const fn extent(&self) -> u32 {
        self.extent
    }

    /// Returns whether the item can be borrowed.
    pub const fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Returns `true` when every field matches, not just the identifier.
    pub fn same_fields(&self, other: &Item) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.contributors == other.contributors
            && self.category == other.category
            && self.year == other.year
            && self.extent == other.extent
            && self.available == other.available
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" ({}, {}, {} pages)",
            self.id, self.title, self.category, self.year, self.extent
        )
    }
}
