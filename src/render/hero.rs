//! The typewriter hero.
//!
//! Each line carries the millisecond offsets of an uninterrupted reveal,
//! taken from [`Timeline::compute`]. The page script types a line starting
//! at `data-start`, one character per `data-speed`, and shows the prompt at
//! its own `data-start`. Without the script every line is shown in full.

use crate::{config::SiteConfig, utils::html::escape};
use folio_core::Timeline;

pub fn render(config: &SiteConfig) -> String {
    let hero = &config.hero;
    let lines = hero.reveal_lines();
    let timeline = Timeline::compute(&lines);

    let body: String = lines
        .iter()
        .zip(&timeline.lines)
        .enumerate()
        .map(|(i, (line, timing))| {
            format!(
                r#"<div class="hero-line hero-line-{i}" data-start="{start}" data-speed="{speed}" data-complete="{complete}">{text}</div>"#,
                start = timing.start,
                speed = line.char_delay_ms,
                complete = timing.complete,
                text = escape(&line.text),
            )
        })
        .collect();

    format!(
        r#"<section id="hero" class="hero" data-keep-cursor="{keep}"><div class="hero-code">{body}</div><div class="hero-prompt" data-start="{prompt_at}"><div class="hero-prompt-bar"></div><p>{prompt}</p></div></section>"#,
        keep = hero.keep_cursor,
        prompt_at = timeline.prompt,
        prompt = escape(&hero.prompt),
    )
}
