//! `[panel]` section configuration.

use super::defaults;
use educe::Educe;
use folio_core::{Millis, PanelTimings, SortKey};
use serde::{Deserialize, Serialize};

/// `[panel]` section in folio.toml - navigation panel behaviour.
///
/// # Example
/// ```toml
/// [panel]
/// sort = "category"        # date | category | status
/// clock_interval_ms = 1000
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Initial order of the reading list.
    #[serde(default = "defaults::panel::sort")]
    #[educe(Default = defaults::panel::sort())]
    pub sort: SortKey,

    /// Refresh period of the local-time display.
    #[serde(default = "defaults::panel::clock_interval_ms")]
    #[educe(Default = defaults::panel::clock_interval_ms())]
    pub clock_interval_ms: Millis,

    /// Delay between mounting the panel and starting its slide-in.
    #[serde(default = "defaults::panel::entry_delay_ms")]
    #[educe(Default = defaults::panel::entry_delay_ms())]
    pub entry_delay_ms: Millis,
}

impl PanelConfig {
    pub fn timings(&self) -> PanelTimings {
        PanelTimings {
            entry_delay_ms: self.entry_delay_ms,
            clock_interval_ms: self.clock_interval_ms,
        }
    }
}
