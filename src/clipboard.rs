//! Copying snippet code to the system clipboard.

use crate::snippet::Snippet;
use arboard::Clipboard;
use std::time::{Duration, Instant};
use thiserror::Error;

#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// How long a short-lived process keeps serving the clipboard on Linux
pub const DEFAULT_HOLD: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
#[error("failed to copy text: {0}")]
pub struct ClipboardError(#[from] arboard::Error);

/// Copy for a long-running process such as the TUI
pub fn copy(snippet: &Snippet) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(snippet.code.as_str())?;
    tracing::debug!(title = %snippet.title, "copied snippet to clipboard");
    Ok(())
}

/// Copy from a process that exits right after.
///
/// X11 and Wayland selections vanish with their owner, so on Linux this blocks until
/// a clipboard manager or another application takes the selection over, or `hold` elapses.
pub fn copy_and_hold(snippet: &Snippet, hold: Duration) -> Result<(), ClipboardError> {
    let Some(deadline) = hold_deadline(Instant::now(), hold) else {
        return copy(snippet);
    };
    let mut clipboard = Clipboard::new()?;

    #[cfg(target_os = "linux")]
    clipboard
        .set()
        .wait_until(deadline)
        .text(snippet.code.as_str())?;

    #[cfg(not(target_os = "linux"))]
    {
        let _ = deadline;
        clipboard.set_text(snippet.code.as_str())?;
    }

    tracing::debug!(title = %snippet.title, ?hold, "copied snippet to clipboard");
    Ok(())
}

/// `None` when the selection should not be held at all
fn hold_deadline(now: Instant, hold: Duration) -> Option<Instant> {
    if hold.is_zero() {
        return None;
    }
    now.checked_add(hold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hold_does_not_wait() {
        assert_eq!(hold_deadline(Instant::now(), Duration::ZERO), None);
    }

    #[test]
    fn hold_deadline_is_in_the_future() {
        let now = Instant::now();
        assert_eq!(
            hold_deadline(now, DEFAULT_HOLD),
            Some(now + Duration::from_secs(30))
        );
    }
}
