//! Workshop showcase and the personal-insight cards.
//!
//! ```text
//!   filter ──► visible cards ──hover──► terminal preview (50 ms/char)
//!                   │
//!                 click ──► modal(selected id) ──close──► none
//! ```

use crate::{
    catalog::{PreviewKind, WorkCategory, WorkshopProject},
    clock::Millis,
    timer::{TimerId, TimerQueue},
    typing::{Step, TypingState},
};
use std::{fmt, str::FromStr};

/// Typing speed of the terminal preview on hovered cards.
pub const PREVIEW_CHAR_DELAY_MS: Millis = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(WorkCategory),
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(WorkCategory::Frontend),
        CategoryFilter::Only(WorkCategory::Backend),
        CategoryFilter::Only(WorkCategory::Fullstack),
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn accepts(self, project: &WorkshopProject) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => project.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<WorkCategory>().map(Self::Only)
    }
}

#[derive(Debug)]
struct Hover {
    id: String,
    /// Present only for terminal previews.
    terminal: Option<TypingState>,
    timer: Option<TimerId>,
}

#[derive(Debug)]
pub struct Showcase {
    projects: Vec<WorkshopProject>,
    filter: CategoryFilter,
    selected: Option<String>,
    hover: Option<Hover>,
    focus: Option<usize>,
    timers: TimerQueue<()>,
}

impl Showcase {
    pub fn new(projects: Vec<WorkshopProject>) -> Self {
        Self {
            projects,
            filter: CategoryFilter::All,
            selected: None,
            hover: None,
            focus: None,
            timers: TimerQueue::new(),
        }
    }

    pub fn projects(&self) -> &[WorkshopProject] {
        &self.projects
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Cards passing the current filter, in catalog order.
    pub fn filtered(&self) -> Vec<&WorkshopProject> {
        self.projects
            .iter()
            .filter(|p| self.filter.accepts(p))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Modal
    // ------------------------------------------------------------------------

    /// Open the detail modal. Unknown ids are ignored.
    pub fn open_modal(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    pub fn is_modal_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&WorkshopProject> {
        self.selected.as_deref().and_then(|id| self.find(id))
    }

    // ------------------------------------------------------------------------
    // Hover preview
    // ------------------------------------------------------------------------

    /// Pointer entered a card. A terminal preview starts typing from empty.
    pub fn hover_start(&mut self, id: &str, now: Millis) -> bool {
        let Some(project) = self.find(id) else {
            return false;
        };
        let terminal = (project.preview_type == PreviewKind::Terminal)
            .then(|| TypingState::new(project.preview_content.clone()));

        self.timers.clear();
        let timer = terminal
            .as_ref()
            .map(|_| self.timers.every(now, PREVIEW_CHAR_DELAY_MS, ()));
        self.hover = Some(Hover {
            id: id.to_string(),
            terminal,
            timer,
        });
        true
    }

    /// Pointer left. The preview is discarded.
    pub fn hover_end(&mut self) {
        self.timers.clear();
        self.hover = None;
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.as_ref().map(|h| h.id.as_str())
    }

    /// Revealed text of the hovered card's terminal preview.
    pub fn preview(&self) -> Option<&str> {
        self.hover
            .as_ref()
            .and_then(|h| h.terminal.as_ref())
            .map(TypingState::revealed)
    }

    pub fn advance(&mut self, now: Millis) {
        while self.timers.pop_due(now).is_some() {
            let Some(hover) = self.hover.as_mut() else {
                break;
            };
            let Some(terminal) = hover.terminal.as_mut() else {
                break;
            };
            if terminal.tick() != Step::Typed
                && let Some(id) = hover.timer.take()
            {
                self.timers.cancel(id);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Insight cards
    // ------------------------------------------------------------------------

    pub fn focus_insight(&mut self, index: usize) {
        self.focus = Some(index);
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn focused_insight(&self) -> Option<usize> {
        self.focus
    }

    pub fn unmount(&mut self) {
        self.hover_end();
        self.selected = None;
        self.focus = None;
    }

    fn find(&self, id: &str) -> Option<&WorkshopProject> {
        self.projects.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProjectStats, WorkStatus};

    fn project(id: &str, category: WorkCategory, preview_type: PreviewKind, content: &str) -> WorkshopProject {
        WorkshopProject {
            id: id.into(),
            title: format!("Project {id}"),
            tech_stack: vec!["Rust".into()],
            synopsis: String::new(),
            challenge: String::new(),
            stats: ProjectStats {
                lines_of_code: 1,
                features: 1,
                time_to_build: "1 week".into(),
                users_impacted: None,
                bugs_squashed: 0,
            },
            preview_type,
            preview_content: content.into(),
            live_url: None,
            github_url: None,
            category,
            status: WorkStatus::Completed,
            problem: None,
            approach: None,
            challenges: None,
            outcome: None,
        }
    }

    fn showcase() -> Showcase {
        Showcase::new(vec![
            project("1", WorkCategory::Fullstack, PreviewKind::Terminal, "npm run"),
            project("2", WorkCategory::Backend, PreviewKind::Image, "diagram.png"),
            project("3", WorkCategory::Frontend, PreviewKind::Video, "demo.mp4"),
            project("4", WorkCategory::Backend, PreviewKind::Terminal, "cargo"),
        ])
    }

    fn ids(cards: &[&WorkshopProject]) -> Vec<String> {
        cards.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let mut showcase = showcase();
        assert_eq!(showcase.filtered().len(), 4);
        showcase.set_filter(CategoryFilter::Only(WorkCategory::Backend));
        assert_eq!(ids(&showcase.filtered()), ["2", "4"]);
        showcase.set_filter("frontend".parse().unwrap());
        assert_eq!(ids(&showcase.filtered()), ["3"]);
        showcase.set_filter(CategoryFilter::All);
        assert_eq!(showcase.filtered().len(), 4);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert!("mobile".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::ALL.map(|f| f.as_str()), ["all", "frontend", "backend", "fullstack"]);
    }

    #[test]
    fn test_modal_open_close() {
        let mut showcase = showcase();
        assert!(!showcase.open_modal("missing"));
        assert!(!showcase.is_modal_open());
        assert!(showcase.open_modal("2"));
        assert_eq!(showcase.selected().map(|p| p.id.as_str()), Some("2"));
        showcase.close_modal();
        assert!(showcase.selected().is_none());
    }

    #[test]
    fn test_terminal_preview_types_while_hovered() {
        let mut showcase = showcase();
        assert!(showcase.hover_start("1", 0));
        assert_eq!(showcase.preview(), Some(""));
        showcase.advance(149);
        assert_eq!(showcase.preview(), Some("np"));
        showcase.advance(10_000);
        assert_eq!(showcase.preview(), Some("npm run"));
        assert!(showcase.timers.is_empty());
    }

    #[test]
    fn test_preview_restarts_on_next_hover() {
        let mut showcase = showcase();
        showcase.hover_start("1", 0);
        showcase.advance(200);
        showcase.hover_end();
        assert_eq!(showcase.preview(), None);
        showcase.advance(1_000);

        showcase.hover_start("1", 1_000);
        assert_eq!(showcase.preview(), Some(""));
        showcase.advance(1_050);
        assert_eq!(showcase.preview(), Some("n"));
    }

    #[test]
    fn test_non_terminal_hover_has_no_preview() {
        let mut showcase = showcase();
        assert!(showcase.hover_start("2", 0));
        assert_eq!(showcase.hovered(), Some("2"));
        assert_eq!(showcase.preview(), None);
        assert!(showcase.timers.is_empty());
    }

    #[test]
    fn test_insight_focus() {
        let mut showcase = showcase();
        assert_eq!(showcase.focused_insight(), None);
        showcase.focus_insight(2);
        assert_eq!(showcase.focused_insight(), Some(2));
        showcase.clear_focus();
        assert_eq!(showcase.focused_insight(), None);
    }
}
