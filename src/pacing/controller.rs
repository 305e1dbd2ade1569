use crate::error::PacingError;

use super::{
    recompute_decision, DisplayContext, PacingDecision, PacingMode, PacingRequest, RefreshRate,
    ScreenMode,
};

/// Owns the pacing request and keeps its decision current.
///
/// Every setter recomputes the decision before returning it, so a caller can
/// never observe a decision that lags its inputs. A rejected setter leaves
/// both request and decision untouched.
#[derive(Debug, Clone)]
pub struct FramePacingController {
    display: DisplayContext,
    request: PacingRequest,
    screen: ScreenMode,
    decision: PacingDecision,
    initialized: bool,
}

impl FramePacingController {
    pub fn new(request: PacingRequest, display: DisplayContext) -> Self {
        debug_assert!(request.target_frame_rate_hz > 0, "target rate must be positive");
        Self {
            decision: recompute_decision(&request, &display),
            display,
            request,
            screen: ScreenMode::default(),
            initialized: false,
        }
    }

    /// Seeds the target rate from the display's native rate, rounded to the
    /// nearest whole Hz.
    ///
    /// Only the first call has any effect. Editor validation hooks may fire
    /// this repeatedly; later calls return the current request unchanged.
    pub fn initialize(&mut self, display: DisplayContext) -> PacingRequest {
        if self.initialized {
            tracing::trace!(target: "pacing", "already initialized, ignoring");
            return self.request;
        }

        let native = display.native_refresh_rate;
        let editor = display.is_editor;
        self.initialized = true;
        self.display = display;
        self.request.target_frame_rate_hz = native.rounded_hz().max(1);
        tracing::info!(
            target: "pacing",
            native = %native,
            editor,
            target_hz = self.request.target_frame_rate_hz,
            "pacing initialized from display"
        );
        self.recompute();
        self.request
    }

    pub fn set_target_frame_rate(&mut self, hz: i64) -> Result<PacingDecision, PacingError> {
        let hz = positive_u32(hz).ok_or_else(|| {
            tracing::warn!(target: "pacing", hz, "rejected target frame rate");
            PacingError::invalid_argument("target frame rate", hz)
        })?;
        self.request.target_frame_rate_hz = hz;
        Ok(self.recompute())
    }

    /// Parses an edit-field value, then behaves like
    /// [`set_target_frame_rate`](Self::set_target_frame_rate).
    pub fn set_target_frame_rate_str(&mut self, text: &str) -> Result<PacingDecision, PacingError> {
        let hz = parse_integer("target frame rate", text)?;
        self.set_target_frame_rate(hz)
    }

    pub fn set_use_system_pacing(&mut self, use_system_pacing: bool) -> PacingDecision {
        self.request.use_system_pacing = use_system_pacing;
        self.recompute()
    }

    pub fn set_screen_mode(&mut self, screen: ScreenMode) -> Result<PacingDecision, PacingError> {
        if screen.width == 0 || screen.height == 0 {
            return Err(PacingError::invalid_argument(
                "resolution",
                format_args!("{}x{}", screen.width, screen.height),
            ));
        }
        self.screen = screen;
        tracing::debug!(
            target: "pacing",
            width = screen.width,
            height = screen.height,
            fullscreen = screen.fullscreen,
            "screen mode changed"
        );
        Ok(self.recompute())
    }

    pub fn set_resolution_width_str(&mut self, text: &str) -> Result<PacingDecision, PacingError> {
        let width = parse_dimension("resolution width", text)?;
        self.set_screen_mode(ScreenMode {
            width,
            ..self.screen
        })
    }

    pub fn set_resolution_height_str(&mut self, text: &str) -> Result<PacingDecision, PacingError> {
        let height = parse_dimension("resolution height", text)?;
        self.set_screen_mode(ScreenMode {
            height,
            ..self.screen
        })
    }

    /// Takes a fresh display reading, e.g. after a fullscreen switch changed
    /// the native refresh rate.
    pub fn update_display(&mut self, display: DisplayContext) -> PacingDecision {
        self.display = display;
        self.recompute()
    }

    pub fn request(&self) -> PacingRequest {
        self.request
    }

    pub fn display(&self) -> DisplayContext {
        self.display
    }

    pub fn screen_mode(&self) -> ScreenMode {
        self.screen
    }

    pub fn decision(&self) -> PacingDecision {
        self.decision
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn delivered_rate(&self) -> RefreshRate {
        self.decision.delivered_rate(self.display.native_refresh_rate)
    }

    fn recompute(&mut self) -> PacingDecision {
        let decision = recompute_decision(&self.request, &self.display);
        self.decision = decision;

        let native = self.display.native_refresh_rate;
        tracing::debug!(
            target: "pacing",
            mode = ?decision.mode(),
            software_cap = %decision.software_cap(),
            sync_divisor = decision.sync_divisor(),
            target_hz = self.request.target_frame_rate_hz,
            native = %native,
            "pacing decision"
        );

        if decision.mode() == PacingMode::HardwareSynced {
            let target_hz = self.request.target_frame_rate_hz;
            if !decision.is_exact(target_hz, native) {
                tracing::warn!(
                    target: "pacing",
                    requested_hz = target_hz,
                    delivered = %decision.delivered_rate(native),
                    evenly_divides = native.is_multiple_of(target_hz),
                    "sync divisor cannot hit the requested rate exactly"
                );
            }
            if !self.display.supports_hardware_sync {
                tracing::warn!(
                    target: "pacing",
                    "display reports no hardware sync, the divisor may be ignored"
                );
            }
        }

        decision
    }
}

fn positive_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|value| *value > 0)
}

fn parse_integer(what: &'static str, text: &str) -> Result<i64, PacingError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| PacingError::invalid_argument(what, text))
}

fn parse_dimension(what: &'static str, text: &str) -> Result<u32, PacingError> {
    let value = parse_integer(what, text)?;
    positive_u32(value).ok_or_else(|| PacingError::invalid_argument(what, value))
}
