//! Text hand-off into a viewing session.
//!
//! [`ServicesProvider`] is the single entry point for "open this text as
//! slides". It is built for one invocation and borrows the session it feeds.
//! Text can come from the command line, the clipboard on demand, or the
//! background [`ClipboardWatcher`].

use arboard::Clipboard;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::AppUpdate;
use crate::error::{Error, Result};
use crate::session::SlideSession;

/// Invocation handler bound to one session for the duration of one call.
pub struct ServicesProvider<'a> {
    session: &'a mut SlideSession,
}

impl<'a> ServicesProvider<'a> {
    /// Bind a handler to `session`.
    pub fn new(session: &'a mut SlideSession) -> Self {
        Self { session }
    }

    /// Show `text` as slides, starting from the first one.
    ///
    /// Blank text is rejected and leaves the session untouched.
    pub fn open_slide_text(self, text: &str) -> Result<()> {
        if is_blank(text) {
            tracing::warn!("Rejected blank text invocation");
            return Err(Error::EmptyText);
        }
        self.session.open_text(text);
        Ok(())
    }
}

/// Whether `text` has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Anything that can hand over the current text selection.
pub trait TextSource {
    /// Read the current text, if there is any.
    fn read_text(&mut self) -> Result<Option<String>>;
}

/// The system clipboard via `arboard`.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    /// Connect to the system clipboard.
    pub fn new() -> Result<Self> {
        Ok(Self {
            clipboard: Clipboard::new()?,
        })
    }
}

impl TextSource for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            // Images or an empty clipboard are not errors for us.
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Tracks the last seen clipboard text and reports changes.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<String>,
}

impl ChangeDetector {
    /// Start with `initial` as already seen.
    pub const fn new(initial: Option<String>) -> Self {
        Self { last: initial }
    }

    /// Returns the text if it differs from the last observation and is not blank.
    pub fn observe(&mut self, current: Option<String>) -> Option<String> {
        let current = current?;
        if self.last.as_deref() == Some(current.as_str()) {
            return None;
        }
        self.last = Some(current.clone());
        (!is_blank(&current)).then_some(current)
    }
}

/// Background clipboard poller that turns new clipboard text into invocations.
pub struct ClipboardWatcher;

impl ClipboardWatcher {
    /// Poll the source built by `connect` every `interval` and forward changes to `tx`.
    ///
    /// The source is created on the polling thread, so it need not be `Send`.
    /// Whatever is on the clipboard when the watcher starts is treated as
    /// already seen. The task ends once the receiving side is dropped.
    pub fn spawn<S, F>(connect: F, tx: mpsc::Sender<AppUpdate>, interval: Duration) -> JoinHandle<()>
    where
        S: TextSource,
        F: FnOnce() -> Result<S> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let mut source = match connect() {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!("Clipboard watcher disabled: {e}");
                    let _ = tx.blocking_send(AppUpdate::Failed(e.to_string()));
                    return;
                }
            };
            let initial = source.read_text().ok().flatten();
            let mut detector = ChangeDetector::new(initial);
            tracing::info!("Clipboard watcher started ({interval:?})");

            while !tx.is_closed() {
                std::thread::sleep(interval);
                match source.read_text() {
                    Ok(current) => {
                        if let Some(text) = detector.observe(current) {
                            tracing::debug!("Clipboard changed ({} chars)", text.chars().count());
                            if tx.blocking_send(AppUpdate::TextReceived(text)).is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => tracing::warn!("Clipboard read failed: {e}"),
                }
            }
            tracing::info!("Clipboard watcher stopped");
        })
    }
}
