//! Search and sort over the reading list.
//!
//! The visible list is a pure function of `(catalog, search, sort)`:
//!
//! ```text
//! catalog ──► filter(search, case-insensitive, title|author|category) ──► stable sort(key) ──► view
//! ```

use crate::{catalog::ReadingItem, date::CalendarDate};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Ordering of the reading list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortKey {
    /// Most recently added first.
    #[default]
    Date,
    Category,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Category, SortKey::Status];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Category => "category",
            Self::Status => "status",
        }
    }

    /// Option text in the sort selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "Sort by Date",
            Self::Category => "Sort by Category",
            Self::Status => "Sort by Status",
        }
    }

    fn compare(self, a: &ReadingItem, b: &ReadingItem) -> Ordering {
        match self {
            Self::Date => compare_newest_first(a.added_on(), b.added_on()),
            Self::Category => compare_text(&a.category, &b.category),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "category" => Ok(Self::Category),
            "status" => Ok(Self::Status),
            other => Err(format!(
                "unknown sort key `{other}` (expected date, category or status)"
            )),
        }
    }
}

/// Search input plus sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingQuery {
    pub search: String,
    pub sort: SortKey,
}

impl ReadingQuery {
    pub fn new(search: impl Into<String>, sort: SortKey) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }

    /// Whether `item` passes the search filter. The empty term matches all.
    pub fn matches(&self, item: &ReadingItem) -> bool {
        let needle = self.search.to_lowercase();
        matches_lowered(item, &needle)
    }

    /// Apply the query to a catalog, returning a new ordered view.
    pub fn apply<'a>(&self, catalog: &'a [ReadingItem]) -> Vec<&'a ReadingItem> {
        reading_view(catalog, self)
    }
}

/// Filter then sort the reading list. The catalog is never modified.
pub fn reading_view<'a>(catalog: &'a [ReadingItem], query: &ReadingQuery) -> Vec<&'a ReadingItem> {
    let needle = query.search.to_lowercase();
    let mut view: Vec<&ReadingItem> = catalog
        .iter()
        .filter(|item| matches_lowered(item, &needle))
        .collect();
    // `sort_by` is stable: equal keys keep catalog order.
    view.sort_by(|a, b| query.sort.compare(a, b));
    view
}

fn matches_lowered(item: &ReadingItem, needle: &str) -> bool {
    needle.is_empty()
        || [&item.title, &item.author, &item.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Newest first; undated items after every dated one.
fn compare_newest_first(a: Option<CalendarDate>, b: Option<CalendarDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive first, byte order to break ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
