//! `folio contact`: the "copy my email" button from the terminal.
//!
//! The address goes to the first clipboard tool found on `PATH`. Without
//! one, the system mail client is opened on a `mailto:` URL instead.

use crate::{config::SiteConfig, log};
use anyhow::{Result, bail};
use folio_core::{
    Clipboard, ClipboardError, Clock, CopyEmail, CopyOutcome, MailComposer, SystemClock,
    contact::COPIED_RESET_MS,
};
use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

/// Clipboard writers, tried in order. Each reads the text from stdin.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// URL openers, tried in order.
const OPENERS: &[&str] = &["open", "xdg-open", "wslview"];

/// First tool of `candidates` that `which` can resolve.
fn find_tool<'a, T>(candidates: &'a [T], name: impl Fn(&T) -> &str) -> Option<(PathBuf, &'a T)> {
    candidates
        .iter()
        .find_map(|tool| which::which(name(tool)).ok().map(|path| (path, tool)))
}

/// Clipboard backed by a command-line tool.
pub struct SystemClipboard {
    program: Option<(PathBuf, &'static [&'static str])>,
}

impl SystemClipboard {
    pub fn detect() -> Self {
        let program = find_tool(CLIPBOARD_TOOLS, |(name, _)| *name).map(|(path, (_, args))| (path, *args));
        Self { program }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let Some((program, args)) = &self.program else {
            return Err(ClipboardError::Unavailable);
        };
        let denied = |e: std::io::Error| ClipboardError::Denied(e.to_string());

        let mut child = Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(denied)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(denied)?;
        }

        let status = child.wait().map_err(denied)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Denied(format!("{} exited with {status}", program.display())))
        }
    }
}

/// Mail client reached through the desktop URL opener.
///
/// `compose` cannot fail through the trait, so the last failure is kept for
/// the caller to report.
#[derive(Default)]
pub struct SystemMailer {
    failure: Option<String>,
}

impl MailComposer for SystemMailer {
    fn compose(&mut self, url: &str) {
        self.failure = match find_tool(OPENERS, |name| *name) {
            None => Some(format!("no URL opener found ({})", OPENERS.join(", "))),
            Some((opener, _)) => Command::new(&opener)
                .arg(url)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .err()
                .map(|e| format!("failed to run {}: {e}", opener.display())),
        };
    }
}

/// Copy the configured address, falling back to the mail client.
pub fn run(config: &SiteConfig) -> Result<()> {
    let clock = SystemClock::new();
    let mut mailer = SystemMailer::default();
    let outcome = copy_email(
        &config.base.email,
        &mut SystemClipboard::detect(),
        &mut mailer,
        clock.now_ms(),
    )?;
    let message = describe(&outcome, &config.base.email, mailer.failure.as_deref())?;
    log!("contact"; "{message}");
    Ok(())
}

fn copy_email(
    email: &str,
    clipboard: &mut impl Clipboard,
    mailer: &mut impl MailComposer,
    now: folio_core::Millis,
) -> Result<CopyOutcome> {
    if email.trim().is_empty() {
        bail!("[base.email] is empty, nothing to copy");
    }
    let mut button = CopyEmail::new(email.trim());
    let outcome = button.copy(clipboard, mailer, now);
    button.unmount();
    Ok(outcome)
}

/// What happened, or an error when neither the clipboard nor the mailer worked.
fn describe(outcome: &CopyOutcome, email: &str, mail_failure: Option<&str>) -> Result<String> {
    match (outcome, mail_failure) {
        (CopyOutcome::Copied, _) => Ok(format!(
            "copied {email} (the page shows \"Copied!\" for {}s)",
            COPIED_RESET_MS / 1000
        )),
        (CopyOutcome::MailFallback(url), None) => Ok(format!("clipboard unavailable, opened {url}")),
        (CopyOutcome::MailFallback(_), Some(reason)) => {
            bail!("clipboard unavailable and {reason}; the address is {email}")
        }
    }
}
