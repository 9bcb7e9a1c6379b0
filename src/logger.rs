//! Terminal output: the `log!` macro, asset copy progress and the watch
//! status line.
//!
//! ```ignore
//! log!("build"; "wrote {} bytes", len);
//!
//! if let Some(bars) = ProgressBars::new_filtered(&[("assets", files.len())]) {
//!     bars.inc_by_name("assets");
//! }
//! ```

use chrono::Local;
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Terminal columns, read once.
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Rows currently reserved by live progress bars.
static BAR_ROWS: AtomicUsize = AtomicUsize::new(0);

// Bar line layout: "[assets] [████░░░░] 3/8"
const BRACKETS: usize = 2;
const GAP: usize = 1;
const BAR_FRAME: usize = 3;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

#[inline]
const fn prefix_len(module_len: usize) -> usize {
    module_len + BRACKETS + GAP
}

fn terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Log a message with a colored `[module]` prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print one log line, keeping any live progress bars below it.
#[allow(clippy::cast_possible_truncation)]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();

    let rows = BAR_ROWS.load(Ordering::SeqCst);
    if rows > 0 {
        execute!(stdout, cursor::MoveUp(rows as u16)).ok();
        execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
    } else {
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    }

    // Multi-line messages (build errors) are printed whole.
    let message = if message.contains('\n') {
        message
    } else {
        let room = (terminal_width() as usize).saturating_sub(prefix_len(module.len()));
        truncate_str(message, room)
    };
    writeln!(stdout, "{prefix} {message}").ok();

    for _ in 0..rows {
        writeln!(stdout).ok();
    }
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "preview" | "panel" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bars
// ============================================================================

/// A block of progress bars, one terminal row each, redrawn in place.
pub struct ProgressBars {
    bars: Vec<ProgressBar>,
    lock: Mutex<()>,
}

struct ProgressBar {
    name: &'static str,
    prefix: ColoredString,
    total: usize,
    current: AtomicUsize,
    row: usize,
}

impl ProgressBars {
    pub fn new(modules: &[(&'static str, usize)]) -> Self {
        let mut stdout = stdout().lock();
        for _ in modules {
            writeln!(stdout).ok();
        }
        stdout.flush().ok();
        BAR_ROWS.store(modules.len(), Ordering::SeqCst);

        let bars = modules
            .iter()
            .enumerate()
            .map(|(row, &(name, total))| ProgressBar {
                name,
                prefix: colorize_prefix(name),
                total,
                current: AtomicUsize::new(0),
                row,
            })
            .collect();

        Self {
            bars,
            lock: Mutex::new(()),
        }
    }

    /// Like [`ProgressBars::new`], but skips empty entries and returns
    /// `None` when there is at most one item in total.
    pub fn new_filtered(modules: &[(&'static str, usize)]) -> Option<Self> {
        let modules: Vec<_> = modules.iter().filter(|(_, n)| *n > 0).copied().collect();
        let total: usize = modules.iter().map(|(_, n)| n).sum();
        (total > 1).then(|| Self::new(&modules))
    }

    pub fn inc_by_name(&self, name: &str) {
        if let Some(bar) = self.bars.iter().find(|bar| bar.name == name) {
            let current = bar.current.fetch_add(1, Ordering::Relaxed) + 1;
            self.draw(bar, current);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw(&self, bar: &ProgressBar, current: usize) {
        let _guard = self.lock.lock().ok();

        let count = format!("{current}/{}", bar.total);
        let overhead = prefix_len(bar.name.len()) + BAR_FRAME + GAP + count.len();
        let width = (terminal_width() as usize)
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        let filled = (current * width).checked_div(bar.total).unwrap_or(0).min(width);
        let track = "█".repeat(filled) + &"░".repeat(width - filled);

        let mut stdout = stdout().lock();
        let up = (self.bars.len() - bar.row) as u16;
        execute!(stdout, cursor::MoveUp(up), Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "{} [{track}] {count}", bar.prefix).ok();
        execute!(stdout, cursor::MoveDown(up)).ok();
        write!(stdout, "\r").ok();
        stdout.flush().ok();
    }

    /// Erase the bars and release their rows.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish(&self) {
        if BAR_ROWS.swap(0, Ordering::SeqCst) == 0 {
            return;
        }
        let _guard = self.lock.lock().ok();

        let mut stdout = stdout().lock();
        let rows = self.bars.len() as u16;
        execute!(stdout, cursor::MoveUp(rows), Clear(ClearType::FromCursorDown)).ok();
        stdout.flush().ok();
    }
}

impl Drop for ProgressBars {
    fn drop(&mut self) {
        self.finish();
    }
}

// ============================================================================
// Watch Status
// ============================================================================

/// The status block of `folio serve`: each message replaces the previous one.
pub struct WatchStatus {
    last_lines: usize,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    pub fn success(&mut self, message: &str) {
        self.display(&"✓".green().to_string(), message);
    }

    pub fn unchanged(&mut self, what: &str) {
        self.display("", &format!("unchanged: {what}").dimmed().to_string());
    }

    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(&"✗".red().to_string(), &message);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn display(&mut self, symbol: &str, message: &str) {
        let mut stdout = stdout().lock();
        if self.last_lines > 0 {
            execute!(
                stdout,
                cursor::MoveUp(self.last_lines as u16),
                Clear(ClearType::FromCursorDown)
            )
            .ok();
        }

        let line = format_status(&Local::now().format("%H:%M:%S").to_string(), symbol, message);
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

fn format_status(time: &str, symbol: &str, message: &str) -> String {
    let stamp = format!("[{time}]").dimmed();
    if symbol.is_empty() {
        format!("{stamp} {message}")
    } else {
        format!("{stamp} {symbol} {message}")
    }
}

#[inline]
fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_len() {
        assert_eq!(prefix_len(0), 3);
        assert_eq!(prefix_len(5), 8); // "[build] "
    }

    #[test]
    fn test_truncate_str_ascii() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_char_boundary() {
        // "a€b" is 1 + 3 + 1 bytes
        assert_eq!(truncate_str("a€b", 4), "a€");
        assert_eq!(truncate_str("a€b", 3), "a");
        assert_eq!(truncate_str("€€", 4), "€");
    }

    #[test]
    fn test_prefix_carries_module_name() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("Preview").to_string(), "[Preview]");
    }

    #[test]
    fn test_new_filtered_skips_trivial_work() {
        assert!(ProgressBars::new_filtered(&[("assets", 0)]).is_none());
        assert!(ProgressBars::new_filtered(&[("assets", 1), ("fonts", 0)]).is_none());
    }

    #[test]
    fn test_format_status() {
        colored::control::set_override(false);
        assert_eq!(format_status("12:00:00", "", "ok"), "[12:00:00] ok");
        assert_eq!(format_status("12:00:00", "✓", "rebuilt"), "[12:00:00] ✓ rebuilt");
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count("rebuilt"), 1);
        assert_eq!(line_count("failed: content/site.toml\nline 3\nexpected `=`"), 3);
    }

    #[test]
    fn test_watch_status_starts_empty() {
        assert_eq!(WatchStatus::new().last_lines, 0);
    }
}
