//! `[hero]` section configuration.
//!
//! The typewriter sequence at the top of the page.

use super::defaults;
use educe::Educe;
use folio_core::{Millis, RevealLine};
use serde::{Deserialize, Serialize};

/// One `[[hero.lines]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroLine {
    pub text: String,

    /// Milliseconds per character.
    pub speed: Millis,

    /// Milliseconds to wait after the line completes.
    #[serde(default)]
    pub pause: Millis,
}

impl HeroLine {
    pub fn new(text: impl Into<String>, speed: Millis, pause: Millis) -> Self {
        Self {
            text: text.into(),
            speed,
            pause,
        }
    }

    pub fn to_reveal_line(&self) -> RevealLine {
        RevealLine::new(self.text.clone(), self.speed, self.pause)
    }
}

/// `[hero]` section in folio.toml.
///
/// # Example
/// ```toml
/// [hero]
/// keep_cursor = true
///
/// [[hero.lines]]
/// text = "// hello"
/// speed = 60
/// pause = 500
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Keep the cursor blinking after a line completes.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub keep_cursor: bool,

    /// Text under the final stage.
    #[serde(default = "defaults::hero::prompt")]
    #[educe(Default = defaults::hero::prompt())]
    pub prompt: String,

    /// Lines revealed one stage at a time.
    #[serde(default = "defaults::hero::lines")]
    #[educe(Default = defaults::hero::lines())]
    pub lines: Vec<HeroLine>,
}

impl HeroConfig {
    pub fn reveal_lines(&self) -> Vec<RevealLine> {
        self.lines.iter().map(HeroLine::to_reveal_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_hero_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.hero.lines.len(), 5);
        assert_eq!(config.hero.lines[0].text, "// Building things that think and feel.");
        assert_eq!(config.hero.lines[0].speed, 60);
        assert_eq!(config.hero.lines[0].pause, 500);
        assert_eq!(config.hero.prompt, "Scroll to explore");
        assert!(!config.hero.keep_cursor);
    }

    #[test]
    fn test_hero_custom_lines() {
        let config = r#"
            [hero]
            keep_cursor = true

            [[hero.lines]]
            text = "// a."
            speed = 10
            pause = 2000

            [[hero.lines]]
            text = "}"
            speed = 10
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        let lines = config.hero.reveal_lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].post_delay_ms, 2000);
        assert_eq!(lines[1].post_delay_ms, 0);
        assert!(config.hero.keep_cursor);
    }

    #[test]
    fn test_hero_empty_lines_allowed() {
        let config = r#"
            [hero]
            lines = []
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(config.hero.lines.is_empty());
    }
}
