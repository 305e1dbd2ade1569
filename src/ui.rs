use std::fmt;

use crate::error::PacingError;
use crate::pacing::{FramePacingController, PacingDecision};

/// Flips the settings and current-settings panels.
pub const TOGGLE_KEY: char = 'g';

pub const EDITOR_PACING_CAPTION: &str = "Cannot set frame pacing in Editor";

/// State of the settings panel: what each widget shows and whether it is
/// visible. Layout and drawing belong to the host.
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    settings_visible: bool,
    current_settings_visible: bool,
    frame_rate_text: String,
    resolution_x_text: String,
    resolution_y_text: String,
    pacing_toggle_enabled: bool,
    pacing_toggle_on: bool,
    pacing_caption: Option<&'static str>,
    pacing_caption_visible: bool,
    frame_rate_field_visible: bool,
}

impl SettingsPanel {
    pub fn open(pacing: &FramePacingController) -> Self {
        let request = pacing.request();
        let screen = pacing.screen_mode();
        let editor = pacing.display().is_editor;

        let mut panel = Self {
            settings_visible: true,
            current_settings_visible: false,
            frame_rate_text: request.target_frame_rate_hz.to_string(),
            resolution_x_text: screen.width.to_string(),
            resolution_y_text: screen.height.to_string(),
            pacing_toggle_enabled: !editor,
            pacing_toggle_on: false,
            pacing_caption: editor.then_some(EDITOR_PACING_CAPTION),
            pacing_caption_visible: true,
            frame_rate_field_visible: false,
        };
        panel.show_pacing_widgets(false);
        panel
    }

    /// Returns whether the key was the toggle key.
    pub fn handle_key(&mut self, key: char) -> bool {
        if !key.eq_ignore_ascii_case(&TOGGLE_KEY) {
            return false;
        }
        self.settings_visible = !self.settings_visible;
        self.current_settings_visible = !self.current_settings_visible;
        true
    }

    /// Ignored while the toggle is disabled (editor hosts).
    pub fn pacing_toggled(
        &mut self,
        use_system_pacing: bool,
        pacing: &mut FramePacingController,
    ) -> PacingDecision {
        if !self.pacing_toggle_enabled {
            tracing::debug!("pacing toggle disabled, ignoring");
            return pacing.decision();
        }
        self.pacing_toggle_on = use_system_pacing;
        self.show_pacing_widgets(use_system_pacing);
        pacing.set_use_system_pacing(use_system_pacing)
    }

    pub fn frame_rate_edited(
        &mut self,
        text: &str,
        pacing: &mut FramePacingController,
    ) -> Result<PacingDecision, PacingError> {
        self.frame_rate_text = text.to_string();
        pacing.set_target_frame_rate_str(text)
    }

    pub fn resolution_x_edited(
        &mut self,
        text: &str,
        pacing: &mut FramePacingController,
    ) -> Result<PacingDecision, PacingError> {
        self.resolution_x_text = text.to_string();
        pacing.set_resolution_width_str(text)
    }

    pub fn resolution_y_edited(
        &mut self,
        text: &str,
        pacing: &mut FramePacingController,
    ) -> Result<PacingDecision, PacingError> {
        self.resolution_y_text = text.to_string();
        pacing.set_resolution_height_str(text)
    }

    pub fn status_lines(decision: &PacingDecision) -> StatusLines {
        StatusLines {
            vsync_count: decision.sync_divisor(),
            target_frame_rate: decision.software_cap().to_string(),
        }
    }

    pub fn settings_visible(&self) -> bool {
        self.settings_visible
    }

    pub fn current_settings_visible(&self) -> bool {
        self.current_settings_visible
    }

    pub fn frame_rate_text(&self) -> &str {
        &self.frame_rate_text
    }

    pub fn resolution_text(&self) -> (&str, &str) {
        (&self.resolution_x_text, &self.resolution_y_text)
    }

    pub fn pacing_toggle(&self) -> (bool, bool) {
        (self.pacing_toggle_enabled, self.pacing_toggle_on)
    }

    /// Caption shown next to the pacing toggle, if visible.
    pub fn pacing_caption(&self) -> Option<&'static str> {
        if self.pacing_caption_visible {
            self.pacing_caption
        } else {
            None
        }
    }

    pub fn frame_rate_field_visible(&self) -> bool {
        self.frame_rate_field_visible
    }

    // The frame-rate field is only editable under system pacing; with a
    // hardware divisor the caption takes its place.
    fn show_pacing_widgets(&mut self, use_system_pacing: bool) {
        self.pacing_caption_visible = !use_system_pacing;
        self.frame_rate_field_visible = use_system_pacing;
    }
}

/// Text for the current-settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLines {
    pub vsync_count: u32,
    pub target_frame_rate: String,
}

impl fmt::Display for StatusLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vsync count: {}", self.vsync_count)?;
        write!(f, "target frame rate: {}", self.target_frame_rate)
    }
}
