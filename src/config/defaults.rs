//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "hello@example.com".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }
}

// ============================================================================
// [hero] Section Defaults
// ============================================================================

pub mod hero {
    use super::super::HeroLine;

    /// The opening sequence: a comment, then a tiny program.
    pub fn lines() -> Vec<HeroLine> {
        vec![
            HeroLine::new("// Building things that think and feel.", 60, 500),
            HeroLine::new("function startPortfolio() {", 40, 300),
            HeroLine::new("  const you = getInspired();", 30, 300),
            HeroLine::new("  explore(you);", 30, 300),
            HeroLine::new("}", 30, 300),
        ]
    }

    pub fn prompt() -> String {
        "Scroll to explore".into()
    }
}

// ============================================================================
// [panel] Section Defaults
// ============================================================================

pub mod panel {
    use folio_core::{Millis, SortKey, panel::lifecycle};

    pub fn sort() -> SortKey {
        SortKey::Date
    }

    pub fn clock_interval_ms() -> Millis {
        lifecycle::DEFAULT_CLOCK_INTERVAL_MS
    }

    pub fn entry_delay_ms() -> Millis {
        lifecycle::DEFAULT_ENTRY_DELAY_MS
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
