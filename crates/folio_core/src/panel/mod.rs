//! The slide-in navigation panel.
//!
//! | Module      | Concern                                      |
//! |-------------|----------------------------------------------|
//! | `state`     | section/item expansion, search, sort         |
//! | `view`      | the filtered and sorted reading list         |
//! | `lifecycle` | open/close phases and the local-time clock   |

pub mod lifecycle;
pub mod state;
pub mod view;

pub use lifecycle::{LifecycleEvent, PanelLifecycle, PanelTimings, Phase};
pub use state::{ItemCategory, ItemKey, PanelAction, PanelState, Section};
pub use view::{ReadingQuery, SortKey, reading_view};
