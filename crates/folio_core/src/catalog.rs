//! Content records shown on the page.
//!
//! Records are read-only once loaded. Each collection is assumed to carry
//! unique `id`s; nothing in this crate checks that.

use crate::date::CalendarDate;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
        pub enum $name { $($variant),+ }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self { $($name::$variant => $text),+ }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} `{}`",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

string_enum! {
    /// Progress of a navigation-panel project.
    pub enum ProjectStatus { Ongoing => "ongoing", Completed => "completed" }
}

string_enum! {
    pub enum ReadingStatus { Completed => "completed", InProgress => "in-progress" }
}

string_enum! {
    pub enum TopicKind {
        Interest => "interest",
        Learning => "learning",
        Research => "research",
        Goal => "goal",
    }
}

string_enum! {
    /// How a showcase card previews its project on hover.
    pub enum PreviewKind { Video => "video", Terminal => "terminal", Image => "image" }
}

string_enum! {
    pub enum WorkCategory { Frontend => "frontend", Backend => "backend", Fullstack => "fullstack" }
}

string_enum! {
    pub enum WorkStatus { Completed => "completed", InProgress => "in-progress" }
}

impl ReadingStatus {
    /// Badge text in the reading list.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Read",
            Self::InProgress => "Reading",
        }
    }
}

// ============================================================================
// Navigation Panel Records
// ============================================================================

/// Number of technology chips shown before the `+N` overflow badge.
pub const VISIBLE_TECH_CHIPS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub technologies: Vec<String>,
    /// `YYYY-MM-DD`, or empty while unfinished.
    #[cfg_attr(feature = "serde", serde(default))]
    pub completion_date: String,
    pub status: ProjectStatus,
}

impl Project {
    /// Leading technology chips and the count hidden behind `+N`.
    pub fn tech_preview(&self) -> (&[String], usize) {
        let shown = self.technologies.len().min(VISIBLE_TECH_CHIPS);
        (&self.technologies[..shown], self.technologies.len() - shown)
    }

    pub fn completed_on(&self) -> Option<CalendarDate> {
        CalendarDate::parse(&self.completion_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub summary: String,
    pub status: ReadingStatus,
    /// `YYYY-MM-DD`
    pub date_added: String,
}

impl ReadingItem {
    pub fn added_on(&self) -> Option<CalendarDate> {
        CalendarDate::parse(&self.date_added)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationTopic {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TopicKind,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub progress: Option<String>,
}

/// The three panel collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub projects: Vec<Project>,
    pub reading: Vec<ReadingItem>,
    pub exploration: Vec<ExplorationTopic>,
}

// ============================================================================
// Showcase Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectStats {
    pub lines_of_code: u64,
    pub features: u64,
    /// Free text such as "4 weeks" or "ongoing".
    #[cfg_attr(
        feature = "serde",
        serde(alias = "timeToBuild", alias = "timeTouild")
    )]
    pub time_to_build: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub users_impacted: Option<u64>,
    pub bugs_squashed: u64,
}

const DEFAULT_PROBLEM: &str = "This project addressed a critical need in the development workflow, requiring innovative solutions to complex technical challenges.";
const DEFAULT_APPROACH: &str = "I approached this challenge by breaking it down into manageable components, leveraging modern development practices and focusing on scalable architecture.";
const DEFAULT_CHALLENGES: &str = "The most significant challenge was optimizing performance while maintaining code readability and maintainability.";
const DEFAULT_OUTCOME: &str = "The project successfully delivered on all requirements, providing a robust solution that improved efficiency and user experience.";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkshopProject {
    pub id: String,
    pub title: String,
    pub tech_stack: Vec<String>,
    pub synopsis: String,
    /// One-line quote shown on the card.
    pub challenge: String,
    pub stats: ProjectStats,
    pub preview_type: PreviewKind,
    pub preview_content: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub live_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub github_url: Option<String>,
    pub category: WorkCategory,
    pub status: WorkStatus,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub problem: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub approach: Option<String>,
    /// Long-form write-up, distinct from the card's `challenge` quote.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub challenges: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub outcome: Option<String>,
}

impl WorkshopProject {
    pub fn problem(&self) -> &str {
        self.problem.as_deref().unwrap_or(DEFAULT_PROBLEM)
    }

    pub fn approach(&self) -> &str {
        self.approach.as_deref().unwrap_or(DEFAULT_APPROACH)
    }

    pub fn challenges(&self) -> &str {
        self.challenges.as_deref().unwrap_or(DEFAULT_CHALLENGES)
    }

    pub fn outcome(&self) -> &str {
        self.outcome.as_deref().unwrap_or(DEFAULT_OUTCOME)
    }
}
