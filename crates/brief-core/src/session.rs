//! Per-session input mode state.
//!
//! A session starts in [`Mode::Pdf`]. The mode flips only on explicit user
//! action (toggle, clear) or when an upload is detected while pasting text.
//! Every mutation hands back a [`Transition`] carrying freshly derived
//! [`ViewFlags`], so callers never render from stale visibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which input source is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Summarize the text of an uploaded PDF.
    #[default]
    Pdf,
    /// Summarize pasted text.
    Text,
}

impl Mode {
    /// The other mode.
    pub fn flipped(self) -> Self {
        match self {
            Mode::Pdf => Mode::Text,
            Mode::Text => Mode::Pdf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Pdf => "pdf",
            Mode::Text => "text",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(Mode::Pdf),
            "text" => Ok(Mode::Text),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Widget visibility derived from the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFlags {
    /// The file uploader is greyed out.
    pub uploader_disabled: bool,
    /// The paste area is rendered.
    pub text_area_visible: bool,
}

impl ViewFlags {
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            uploader_disabled: mode == Mode::Text,
            text_area_visible: mode == Mode::Text,
        }
    }
}

/// Result of a state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    /// View re-derived after the mutation.
    pub view: ViewFlags,
}

impl Transition {
    /// Whether the mode actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// State owned by one user session.
///
/// The pasted text lives independently of the mode: switching back to PDF,
/// or clearing, leaves it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    mode: Mode,
    pasted_text: String,
}

impl SessionState {
    /// Fresh session in PDF mode with no pasted text.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn pasted_text(&self) -> &str {
        &self.pasted_text
    }

    /// Replace the pasted text. The mode is not touched.
    pub fn set_pasted_text(&mut self, text: impl Into<String>) {
        self.pasted_text = text.into();
    }

    /// Visibility flags for the current mode.
    pub fn view(&self) -> ViewFlags {
        ViewFlags::for_mode(self.mode)
    }

    /// Flip between PDF and text input.
    pub fn toggle(&mut self) -> Transition {
        self.set_mode(self.mode.flipped())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Transition {
        let from = self.mode;
        self.mode = mode;
        if from != mode {
            debug!("Input mode {} -> {}", from, mode);
        }
        Transition {
            from,
            to: mode,
            view: self.view(),
        }
    }

    /// A file upload was noticed; text mode yields to PDF.
    pub fn upload_detected(&mut self) -> Transition {
        self.set_mode(Mode::Pdf)
    }

    /// Reset the mode to PDF. Pasted text is kept.
    pub fn clear(&mut self) -> Transition {
        self.set_mode(Mode::Pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_mode_is_pdf() {
        let state = SessionState::new();
        assert_eq!(state.current_mode(), Mode::Pdf);
        assert_eq!(state.pasted_text(), "");
    }

    #[test]
    fn test_toggle_twice_restores_mode() {
        let mut state = SessionState::new();
        let first = state.toggle();
        assert_eq!(first.to, Mode::Text);
        assert!(first.changed());

        let second = state.toggle();
        assert_eq!(second.from, Mode::Text);
        assert_eq!(state.current_mode(), Mode::Pdf);
    }

    #[test]
    fn test_upload_forces_pdf() {
        let mut state = SessionState::new();
        state.toggle();
        let transition = state.upload_detected();
        assert_eq!(transition.from, Mode::Text);
        assert_eq!(transition.to, Mode::Pdf);
        assert!(!transition.view.uploader_disabled);

        // Already in PDF mode: nothing changes.
        assert!(!state.upload_detected().changed());
    }

    #[test]
    fn test_clear_keeps_pasted_text() {
        let mut state = SessionState::new();
        state.toggle();
        state.set_pasted_text("draft notes");

        let transition = state.clear();
        assert_eq!(transition.to, Mode::Pdf);
        assert_eq!(state.pasted_text(), "draft notes");
    }

    #[test]
    fn test_view_follows_every_mutation() {
        let mut state = SessionState::new();
        assert_eq!(
            state.view(),
            ViewFlags {
                uploader_disabled: false,
                text_area_visible: false
            }
        );

        let view = state.toggle().view;
        assert!(view.uploader_disabled);
        assert!(view.text_area_visible);

        let view = state.set_mode(Mode::Pdf).view;
        assert!(!view.text_area_visible);
    }

    #[test]
    fn test_exactly_one_mode_after_any_sequence() {
        let mut state = SessionState::new();
        let ops: [fn(&mut SessionState) -> Transition; 4] = [
            SessionState::toggle,
            SessionState::upload_detected,
            SessionState::clear,
            SessionState::toggle,
        ];
        for (i, op) in ops.iter().cycle().take(23).enumerate() {
            let t = op(&mut state);
            assert_eq!(t.to, state.current_mode(), "step {i}");
            assert_eq!(t.view, ViewFlags::for_mode(state.current_mode()));
        }
    }

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("PDF".parse::<Mode>().unwrap(), Mode::Pdf);
        assert_eq!(" text ".parse::<Mode>().unwrap(), Mode::Text);
        assert!("image".parse::<Mode>().is_err());
        assert_eq!(Mode::Text.to_string(), "text");
        assert_eq!(serde_json::to_string(&Mode::Pdf).unwrap(), "\"pdf\"");
    }
}
