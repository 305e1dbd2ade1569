use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::PacingError;
use crate::pacing::{DisplayContext, PacingRequest, ScreenMode};

use super::motion::{MovementTarget, UpdatePhase};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub app_name: String,
    pub screen: ScreenMode,
    /// Display reported by the in-memory platform.
    pub display: DisplayContext,
    /// Replace `request.target_frame_rate_hz` with the display's rounded
    /// native rate at startup. `request.use_system_pacing` is honored either
    /// way.
    pub seed_from_display: bool,
    pub request: PacingRequest,
    pub movement_speed: i32,
    pub update_phase: UpdatePhase,
    pub movement_target: MovementTarget,
    pub fixed_update_hz: u32,
    pub frames: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            app_name: "Frame Pacing Demo".to_string(),
            screen: ScreenMode::default(),
            display: DisplayContext::default(),
            seed_from_display: true,
            request: PacingRequest::default(),
            movement_speed: 4,
            update_phase: UpdatePhase::default(),
            movement_target: MovementTarget::default(),
            fixed_update_hz: 50,
            frames: 120,
        }
    }
}

impl DemoConfig {
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source).context("failed to parse demo config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_ron_str(&source).with_context(|| format!("in config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), PacingError> {
        if self.request.target_frame_rate_hz == 0 {
            return Err(PacingError::invalid_argument("target frame rate", 0));
        }
        if self.fixed_update_hz == 0 {
            return Err(PacingError::invalid_argument("fixed update rate", 0));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(PacingError::invalid_argument(
                "resolution",
                format_args!("{}x{}", self.screen.width, self.screen.height),
            ));
        }
        let native = self.display.native_refresh_rate;
        if native.numerator == 0 || native.denominator == 0 {
            return Err(PacingError::invalid_argument(
                "native refresh rate",
                format_args!("{}/{}", native.numerator, native.denominator),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameTiming {
    pub delta_seconds: f32,
    pub fps: f32,
}

impl FrameTiming {
    pub fn from_fps(fps: f64) -> Self {
        let fps = fps.max(f64::MIN_POSITIVE);
        Self {
            delta_seconds: (1.0 / fps) as f32,
            fps: fps as f32,
        }
    }
}

/// Accumulates frame time and releases it in fixed-size physics steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step_seconds: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn from_hz(hz: u32) -> Self {
        Self {
            step_seconds: 1.0 / hz.max(1) as f32,
            accumulator: 0.0,
        }
    }

    pub fn step_seconds(&self) -> f32 {
        self.step_seconds
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.step_seconds {
            self.accumulator -= self.step_seconds;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::RefreshRate;

    #[test]
    fn empty_config_uses_defaults() {
        let config = DemoConfig::from_ron_str("()").unwrap();
        assert_eq!(config.movement_speed, 4);
        assert_eq!(config.fixed_update_hz, 50);
        assert_eq!(config.update_phase, UpdatePhase::LateUpdate);
        assert_eq!(config.movement_target, MovementTarget::FollowTarget);
        assert_eq!(config.screen, ScreenMode::default());
        assert!(config.seed_from_display);
    }

    #[test]
    fn config_reads_rational_refresh_rate() {
        let config = DemoConfig::from_ron_str(
            "(
                display: (native_refresh_rate: (numerator: 60000, denominator: 1001)),
                request: (target_frame_rate_hz: 30, use_system_pacing: true),
                update_phase: FixedUpdate,
                movement_target: Layer,
            )",
        )
        .unwrap();
        assert_eq!(config.display.native_refresh_rate, RefreshRate::NTSC_59_94);
        assert!(!config.display.is_editor);
        assert_eq!(config.request.target_frame_rate_hz, 30);
        assert!(config.request.use_system_pacing);
        assert_eq!(config.update_phase, UpdatePhase::FixedUpdate);
        assert_eq!(config.movement_target, MovementTarget::Layer);
    }

    #[test]
    fn zero_target_is_rejected() {
        let err = DemoConfig::from_ron_str("(request: (target_frame_rate_hz: 0))").unwrap_err();
        assert!(err.downcast_ref::<PacingError>().is_some());
    }

    #[test]
    fn fixed_timestep_releases_whole_steps() {
        let mut step = FixedTimestep::from_hz(50);
        step.accumulate(0.05);
        assert!(step.should_step());
        assert!(step.should_step());
        assert!(!step.should_step());
    }
}
