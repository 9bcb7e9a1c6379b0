//! Expansion, search and sort state of the navigation panel.
//!
//! [`PanelState`] is a plain value; [`PanelState::reduce`] returns the next
//! value and leaves the old one untouched.

use super::view::{ReadingQuery, SortKey};
use rustc_hash::FxHashMap;
use std::{fmt, str::FromStr};

/// A collapsible section of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Projects,
    Reading,
    Exploration,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Projects, Section::Reading, Section::Exploration];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Reading => "reading",
            Self::Exploration => "exploration",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Reading => "Reading List",
            Self::Exploration => "Exploration",
        }
    }

    /// Category used in the composite keys of this section's items.
    pub const fn item_category(self) -> ItemCategory {
        match self {
            Self::Projects => ItemCategory::Project,
            Self::Reading => ItemCategory::Reading,
            Self::Exploration => ItemCategory::Exploration,
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| format!("unknown section `{s}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Project,
    Reading,
    Exploration,
}

impl ItemCategory {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Reading => "reading",
            Self::Exploration => "exploration",
        }
    }
}

/// Composite key addressing one item's expansion flag: `<category>-<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub category: ItemCategory,
    pub id: String,
}

impl ItemKey {
    pub fn new(category: ItemCategory, id: impl Into<String>) -> Self {
        Self {
            category,
            id: id.into(),
        }
    }

    pub fn project(id: impl Into<String>) -> Self {
        Self::new(ItemCategory::Project, id)
    }

    pub fn reading(id: impl Into<String>) -> Self {
        Self::new(ItemCategory::Reading, id)
    }

    pub fn exploration(id: impl Into<String>) -> Self {
        Self::new(ItemCategory::Exploration, id)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.prefix(), self.id)
    }
}

impl FromStr for ItemKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = s
            .split_once('-')
            .ok_or_else(|| format!("`{s}` is not a <category>-<id> key"))?;
        let category = match prefix {
            "project" => ItemCategory::Project,
            "reading" => ItemCategory::Reading,
            "exploration" => ItemCategory::Exploration,
            other => return Err(format!("unknown item category `{other}`")),
        };
        Ok(Self::new(category, id))
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    ToggleSection(Section),
    ToggleItem(ItemKey),
    SetSearch(String),
    SetSort(SortKey),
}

/// Everything the panel remembers between renders.
///
/// Missing keys read as collapsed. Keys are never removed, so the map only
/// grows until the panel is unmounted and the state dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    sections: FxHashMap<Section, bool>,
    items: FxHashMap<ItemKey, bool>,
    query: ReadingQuery,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a chosen sort key.
    pub fn with_default_sort(sort: SortKey) -> Self {
        Self {
            query: ReadingQuery::new("", sort),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn reduce(&self, action: PanelAction) -> Self {
        let mut next = self.clone();
        match action {
            PanelAction::ToggleSection(section) => {
                let flag = next.sections.entry(section).or_insert(false);
                *flag = !*flag;
            }
            PanelAction::ToggleItem(key) => {
                let flag = next.items.entry(key).or_insert(false);
                *flag = !*flag;
            }
            PanelAction::SetSearch(term) => next.query.search = term,
            PanelAction::SetSort(sort) => next.query.sort = sort,
        }
        next
    }

    #[must_use]
    pub fn toggled_section(&self, section: Section) -> Self {
        self.reduce(PanelAction::ToggleSection(section))
    }

    #[must_use]
    pub fn toggled_item(&self, key: ItemKey) -> Self {
        self.reduce(PanelAction::ToggleItem(key))
    }

    #[must_use]
    pub fn with_search(&self, term: impl Into<String>) -> Self {
        self.reduce(PanelAction::SetSearch(term.into()))
    }

    #[must_use]
    pub fn with_sort(&self, sort: SortKey) -> Self {
        self.reduce(PanelAction::SetSort(sort))
    }

    pub fn is_section_expanded(&self, section: Section) -> bool {
        self.sections.get(&section).copied().unwrap_or(false)
    }

    pub fn is_item_expanded(&self, key: &ItemKey) -> bool {
        self.items.get(key).copied().unwrap_or(false)
    }

    pub fn query(&self) -> &ReadingQuery {
        &self.query
    }

    /// Number of item keys ever toggled.
    pub fn tracked_items(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_starts_collapsed() {
        let state = PanelState::new();
        for section in Section::ALL {
            assert!(!state.is_section_expanded(section));
        }
        assert!(!state.is_item_expanded(&ItemKey::project("1")));
        assert_eq!(state.query().sort, SortKey::Date);
    }

    #[test]
    fn test_double_toggle_restores_item() {
        let state = PanelState::new();
        let key = ItemKey::reading("2");
        let once = state.toggled_item(key.clone());
        assert!(once.is_item_expanded(&key));
        let twice = once.toggled_item(key.clone());
        assert!(!twice.is_item_expanded(&key));
        // The key stays tracked after collapsing.
        assert_eq!(twice.tracked_items(), 1);
    }

    #[test]
    fn test_sections_are_independent() {
        let state = PanelState::new()
            .toggled_section(Section::Projects)
            .toggled_section(Section::Reading);
        assert!(state.is_section_expanded(Section::Projects));
        assert!(state.is_section_expanded(Section::Reading));
        assert!(!state.is_section_expanded(Section::Exploration));

        let state = state.toggled_section(Section::Projects);
        assert!(!state.is_section_expanded(Section::Projects));
        assert!(state.is_section_expanded(Section::Reading));
    }

    #[test]
    fn test_items_are_independent_across_sections() {
        let state = PanelState::new().toggled_item(ItemKey::project("1"));
        assert!(state.is_item_expanded(&ItemKey::project("1")));
        assert!(!state.is_item_expanded(&ItemKey::reading("1")));
        assert!(!state.is_item_expanded(&ItemKey::exploration("1")));
    }

    #[test]
    fn test_reduce_leaves_previous_state_alone() {
        let state = PanelState::new();
        let next = state.with_search("clean").with_sort(SortKey::Status);
        assert_eq!(state.query(), &ReadingQuery::default());
        assert_eq!(next.query(), &ReadingQuery::new("clean", SortKey::Status));
    }

    #[test]
    fn test_item_key_round_trip() {
        let key = ItemKey::exploration("4");
        assert_eq!(key.to_string(), "exploration-4");
        assert_eq!("exploration-4".parse::<ItemKey>(), Ok(key));
        assert_eq!(
            "reading-a-b".parse::<ItemKey>().map(|k| k.id),
            Ok("a-b".to_string())
        );
        assert!("book-1".parse::<ItemKey>().is_err());
        assert!("nodash".parse::<ItemKey>().is_err());
    }

    #[test]
    fn test_section_parse() {
        assert_eq!("reading".parse::<Section>(), Ok(Section::Reading));
        assert!("Reading".parse::<Section>().is_err());
    }
}
