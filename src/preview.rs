//! Terminal playback of the interactive parts of the page.
//!
//! `folio preview` runs the hero reveal on the system clock and redraws the
//! lines in place. `folio panel` opens the navigation panel, applies the
//! requested search, sort and expansions, and prints what the panel shows.

use crate::{config::SiteConfig, content::SiteContent, log};
use anyhow::{Context, Result, bail};
use chrono::{Local, TimeZone};
use colored::Colorize;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use folio_core::{
    Catalog, Clock, LifecycleEvent, Millis, PanelAction, PanelLifecycle, PanelState, Project,
    RevealEngine, RevealEvent, RevealLine, Section, SortKey, SystemClock, reading_view,
};
use std::{
    io::{Write, stdout},
    thread,
    time::Duration,
};

/// Longest sleep between two hero frames; bounds the cursor blink latency.
const FRAME_MS: Millis = 50;

const CURSOR: &str = "▋";

// ============================================================================
// Hero
// ============================================================================

/// Play the hero reveal, `speed` times faster than configured.
pub fn play_hero(config: &SiteConfig, speed: f64) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        bail!("--speed must be a positive number, got {speed}");
    }

    let clock = SystemClock::new();
    let mut engine = RevealEngine::mount(scaled_lines(&config.hero.reveal_lines(), speed), clock.now_ms());
    let mut out = stdout().lock();
    execute!(out, cursor::Hide).ok();

    let mut drawn = 0;
    loop {
        let now = clock.now_ms();
        let events = engine.advance(now);
        let frame = hero_frame(&engine, now, config.hero.keep_cursor, &config.hero.prompt);
        redraw(&mut out, drawn, &frame)?;
        drawn = frame.len();

        if events.contains(&RevealEvent::PromptRevealed) || engine.is_terminal() {
            break;
        }
        let wait = engine
            .next_due()
            .map_or(FRAME_MS, |due| due.saturating_sub(clock.now_ms()).min(FRAME_MS));
        thread::sleep(Duration::from_millis(wait));
    }

    execute!(out, cursor::Show).ok();
    engine.unmount();
    Ok(())
}

/// Divide every delay by `speed`, keeping at least 1ms between characters.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scaled_lines(lines: &[RevealLine], speed: f64) -> Vec<RevealLine> {
    let scale = |ms: Millis| (ms as f64 / speed).round() as Millis;
    lines
        .iter()
        .map(|line| RevealLine::new(line.text.clone(), scale(line.char_delay_ms).max(1), scale(line.post_delay_ms)))
        .collect()
}

/// Visible lines at `now`, each with its cursor if showing, then the prompt.
fn hero_frame(engine: &RevealEngine, now: Millis, keep_cursor: bool, prompt: &str) -> Vec<String> {
    let mut frame: Vec<String> = engine
        .visible_lines()
        .enumerate()
        .map(|(index, text)| {
            let text = if index == 0 { text.bold().to_string() } else { text.to_string() };
            if engine.cursor_visible(index, now, keep_cursor) {
                format!("{text}{}", CURSOR.green())
            } else {
                text
            }
        })
        .collect();

    if engine.prompt_visible() {
        frame.push(String::new());
        frame.push(format!("{} ↓", prompt).dimmed().to_string());
    }
    frame
}

#[allow(clippy::cast_possible_truncation)]
fn redraw(out: &mut impl Write, previous_rows: usize, frame: &[String]) -> Result<()> {
    if previous_rows > 0 {
        execute!(out, cursor::MoveUp(previous_rows as u16))?;
    }
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
    for line in frame {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

// ============================================================================
// Panel
// ============================================================================

/// What `folio panel` was asked to do once the panel is open.
#[derive(Debug, Clone, Default)]
pub struct PanelRequest {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub expand: Vec<Section>,
}

impl PanelRequest {
    /// Actions turning `state` into the requested view.
    ///
    /// Sections only ever get expanded: a toggle is emitted once per section,
    /// and only while it is still collapsed.
    fn actions(&self, state: &PanelState) -> Vec<PanelAction> {
        let mut actions = Vec::new();
        if let Some(term) = &self.search {
            actions.push(PanelAction::SetSearch(term.clone()));
        }
        if let Some(sort) = self.sort {
            actions.push(PanelAction::SetSort(sort));
        }

        let mut expand: Vec<Section> = Vec::new();
        for &section in &self.expand {
            if !state.is_section_expanded(section) && !expand.contains(&section) {
                expand.push(section);
            }
        }
        actions.extend(expand.into_iter().map(PanelAction::ToggleSection));
        actions
    }
}

/// Open the panel, apply `request` and print the result.
pub fn show_panel(config: &SiteConfig, request: &PanelRequest) -> Result<()> {
    let content = SiteContent::load(&config.build.content)
        .with_context(|| format!("Failed to load content from {}", config.build.content.display()))?;

    let clock = SystemClock::new();
    let mut panel = PanelLifecycle::new(config.panel.timings(), config.panel.sort);
    panel.open(clock.now_ms());

    // Wait out the entry delay.
    while !panel.is_shown() {
        let Some(due) = panel.next_due() else { break };
        thread::sleep(Duration::from_millis(due.saturating_sub(clock.now_ms())));
        for event in panel.advance(clock.now_ms()) {
            if event == LifecycleEvent::Opened {
                log!("panel"; "opened");
            }
        }
    }

    let actions = panel.state().map(|state| request.actions(state)).unwrap_or_default();
    for action in actions {
        panel.dispatch(action);
    }

    let now = panel.current_time().unwrap_or_else(|| clock.now_ms());
    if let Some(state) = panel.state() {
        let mut out = stdout().lock();
        for line in panel_lines(&content.catalog, state, &local_time(now)) {
            writeln!(out, "{line}")?;
        }
    }

    panel.close();
    panel.transition_end();
    Ok(())
}

/// `HH:MM:SS` in the local timezone.
fn local_time(ms: Millis) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

fn panel_lines(catalog: &Catalog, state: &PanelState, time: &str) -> Vec<String> {
    let mut lines = vec![format!("{} {}", "Local time".dimmed(), time)];

    for section in Section::ALL {
        let expanded = state.is_section_expanded(section);
        let marker = if expanded { "▾" } else { "▸" };
        lines.push(String::new());
        lines.push(format!("{marker} {}", section.title().bold()));
        if !expanded {
            continue;
        }

        match section {
            Section::Projects => lines.extend(catalog.projects.iter().flat_map(project_lines)),
            Section::Reading => {
                let query = state.query();
                let view = reading_view(&catalog.reading, query);
                let search = if query.search.is_empty() {
                    String::new()
                } else {
                    format!("\"{}\" · ", query.search)
                };
                lines.push(format!("  {search}{}", query.sort.label()).dimmed().to_string());
                if view.is_empty() {
                    lines.push("  no matches".dimmed().to_string());
                }
                lines.extend(view.into_iter().map(|item| {
                    format!(
                        "  {} by {} [{}] · {}",
                        item.title,
                        item.author,
                        item.status.label(),
                        item.category
                    )
                }));
            }
            Section::Exploration => lines.extend(
                catalog
                    .exploration
                    .iter()
                    .map(|topic| format!("  {} ({})", topic.title, topic.kind)),
            ),
        }
    }
    lines
}

fn project_lines(project: &Project) -> Vec<String> {
    let (chips, hidden) = project.tech_preview();
    let mut tech = chips.join(", ");
    if hidden > 0 {
        tech.push_str(&format!(" +{hidden}"));
    }

    let mut lines = vec![format!("  {} [{}] {}", project.title, project.status, tech.dimmed())];
    if let Some(date) = project.completed_on() {
        lines.push(format!("    Completed: {}", date.to_short_us()));
    }
    lines
}
