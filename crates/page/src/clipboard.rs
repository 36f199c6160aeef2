// ABOUTME: Clipboard collaborators for the copy button and the transient "Copied!" toast.
// ABOUTME: Provides the Clipboard trait, an in-memory clipboard, and one that pipes into a system command.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use dom_query::Document;

use crate::dom;
use crate::error::PageError;

const TOAST: &str = "#toast";
const TOAST_SHOWN: &str = "show";

/// How long the confirmation stays up.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Receives text to place on the system clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), PageError>;
}

/// Holds the last copied text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), PageError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Pipes the text into an external program such as `pbcopy` or `wl-copy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Splits a shell-style command line on whitespace; the first word is the program.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), PageError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| PageError::clipboard(format!("{}: {}", self.program, e)))?;
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(text.as_bytes()) {
                drop(stdin);
                // Reap the child; the write error is the one worth reporting.
                let _ = child.kill();
                let _ = child.wait();
                return Err(PageError::clipboard(format!("{}: {}", self.program, err)));
            }
        }
        let status = child.wait().map_err(PageError::clipboard)?;
        if !status.success() {
            return Err(PageError::clipboard(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// A confirmation notice that disappears on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, shown_at: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            duration,
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.duration
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at()
    }
}

/// Reflects a toast's visibility at `now` on `#toast`. Returns false if the page has no toast element.
pub fn sync_toast(doc: &Document, toast: &Toast, now: Instant) -> bool {
    let Some(el) = dom::find(doc, TOAST) else {
        return false;
    };
    if toast.is_visible(now) {
        el.add_class(TOAST_SHOWN);
    } else {
        el.remove_class(TOAST_SHOWN);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires() {
        let start = Instant::now();
        let toast = Toast::new("Copied!", start, DEFAULT_TOAST_DURATION);
        assert!(toast.is_visible(start));
        assert!(toast.is_visible(start + Duration::from_millis(2499)));
        assert!(!toast.is_visible(start + Duration::from_millis(2500)));
    }

    #[test]
    fn test_sync_toast_toggles_class() {
        let doc = Document::from(r#"<html><body><div id="toast">Copied!</div></body></html>"#);
        let start = Instant::now();
        let toast = Toast::new("Copied!", start, DEFAULT_TOAST_DURATION);

        assert!(sync_toast(&doc, &toast, start));
        assert!(dom::find(&doc, "#toast.show").is_some());

        sync_toast(&doc, &toast, start + Duration::from_secs(3));
        assert!(dom::find(&doc, "#toast.show").is_none());
    }

    #[test]
    fn test_command_line_parsing() {
        let clip = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clip.program, "xclip");
        assert_eq!(clip.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_none());
    }

    #[test]
    fn test_missing_program_is_clipboard_error() {
        let mut clip = CommandClipboard::new("devsite-no-such-clipboard-program");
        let err = clip.write_text("x").unwrap_err();
        assert!(err.is_clipboard());
    }

    #[cfg(unix)]
    #[test]
    fn test_program_that_stops_reading_is_clipboard_error() {
        // Larger than a pipe buffer, so the write outlives `true`.
        let text = "x".repeat(1 << 20);
        let mut clip = CommandClipboard::new("true");
        let err = clip.write_text(&text).unwrap_err();
        assert!(err.is_clipboard());
        assert!(err.to_string().contains("true"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_text() {
        let mut clip = CommandClipboard::from_command_line("cat").unwrap();
        clip.write_text("clamp(1.000rem, 0.500rem + 2.500vw, 3.000rem)").unwrap();
    }
}
