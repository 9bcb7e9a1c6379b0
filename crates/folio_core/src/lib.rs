//! Interaction state of the folio portfolio page.
//!
//! Every component here is a plain value driven by explicit calls:
//!
//! | Component                      | Driven by                                   |
//! |--------------------------------|---------------------------------------------|
//! | [`RevealEngine`]               | `advance(now)`, `set_line_text`             |
//! | [`PanelState`]                 | `reduce(PanelAction)`                       |
//! | [`PanelLifecycle`]             | `open`, `close`, `transition_end`, `advance`|
//! | [`AnimatedCounter`]            | `on_visibility(ratio, now)`                 |
//! | [`CopyEmail`]                  | `copy(clipboard, mailer, now)`, `advance`   |
//! | [`Showcase`]                   | filter, modal, hover, `advance`             |
//!
//! Time is always passed in. Nothing in this crate sleeps or spawns; a
//! driver reads a [`Clock`] and forwards the reading.

pub mod catalog;
pub mod clock;
pub mod contact;
pub mod counter;
pub mod date;
pub mod panel;
pub mod reveal;
pub mod showcase;
pub mod timer;
pub mod typing;

pub use catalog::{
    Catalog, ExplorationTopic, PreviewKind, Project, ProjectStats, ProjectStatus, ReadingItem,
    ReadingStatus, TopicKind, WorkCategory, WorkStatus, WorkshopProject,
};
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use contact::{Clipboard, ClipboardError, CopyEmail, CopyOutcome, MailComposer};
pub use counter::AnimatedCounter;
pub use date::CalendarDate;
pub use panel::{
    ItemKey, LifecycleEvent, PanelAction, PanelLifecycle, PanelState, PanelTimings, Phase,
    ReadingQuery, Section, SortKey, reading_view,
};
pub use reveal::{RevealEngine, RevealEvent, RevealLine, Timeline};
pub use showcase::{CategoryFilter, Showcase};
pub use typing::TypingState;
