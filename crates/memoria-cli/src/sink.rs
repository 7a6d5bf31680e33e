use std::io::Write;
use std::sync::Mutex;

use uuid::Uuid;

use memoria_chat::{AudioSink, PlaybackError};

/// Reports playback on a text stream. Speech synthesis and audio decoding
/// happen outside this tool, so starting a source just announces it.
pub struct TerminalSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.out.into_inner().ok()
    }

    fn emit(&self, line: &str) -> std::io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| std::io::Error::other("terminal sink poisoned"))?;
        writeln!(out, "{line}")?;
        out.flush()
    }
}

impl<W: Write + Send> AudioSink for TerminalSink<W> {
    fn play_url(&self, message_id: Uuid, url: &str) -> Result<(), PlaybackError> {
        self.emit(&format!("[playing {message_id}] {url}"))
            .map_err(|e| PlaybackError::Audio(e.to_string()))
    }

    fn speak(&self, message_id: Uuid, text: &str) -> Result<(), PlaybackError> {
        self.emit(&format!("[speaking {message_id}] {text}"))
            .map_err(|e| PlaybackError::Speech(e.to_string()))
    }

    fn stop(&self) {
        if let Err(e) = self.emit("[stopped]") {
            tracing::debug!(error = %e, "failed to report playback stop");
        }
    }
}
