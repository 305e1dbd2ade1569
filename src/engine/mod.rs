pub mod core;
pub mod motion;
pub mod platform;
pub mod scene;

use anyhow::Result;

use self::core::{DemoConfig, FixedTimestep, FrameTiming};
use self::motion::{Motion, MovementTarget, UpdatePhase};
use self::platform::DisplayPlatform;
use self::scene::SceneGraph;

use crate::error::PacingError;
use crate::pacing::{FramePacingController, PacingDecision};
use crate::ui::SettingsPanel;

/// Headless demo scene: one object moving at a fixed speed while the frame
/// pacing is driven through the settings panel.
pub struct DemoApp<P: DisplayPlatform> {
    config: DemoConfig,
    platform: P,
    pacing: FramePacingController,
    scene: SceneGraph,
    motion: Motion,
    panel: SettingsPanel,
    fixed_step: FixedTimestep,
    timing: FrameTiming,
    frames_run: u64,
}

impl<P: DisplayPlatform> DemoApp<P> {
    pub fn new(config: DemoConfig, mut platform: P) -> Result<Self> {
        config.validate()?;

        let display = platform.display_context();
        let mut pacing = FramePacingController::new(config.request, display);
        if config.seed_from_display {
            pacing.initialize(display);
        } else {
            pacing.update_display(display);
        }
        let decision = pacing.set_screen_mode(config.screen)?;
        platform.apply_screen_mode(config.screen);
        platform.apply_decision(&decision);

        let panel = SettingsPanel::open(&pacing);
        let motion = Motion::new(
            config.update_phase,
            config.movement_target,
            config.movement_speed,
        );

        Ok(Self {
            fixed_step: FixedTimestep::from_hz(config.fixed_update_hz),
            timing: FrameTiming::default(),
            scene: SceneGraph::new(),
            frames_run: 0,
            config,
            platform,
            pacing,
            motion,
            panel,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            target: "engine",
            app = %self.config.app_name,
            frames = self.config.frames,
            "Demo starting"
        );

        for _ in 0..self.config.frames {
            self.tick();
        }

        let delivered = self.pacing.delivered_rate();
        let status = SettingsPanel::status_lines(&self.pacing.decision());
        tracing::info!(
            target: "engine",
            frames = self.frames_run,
            delivered = %delivered,
            vsync_count = status.vsync_count,
            target_frame_rate = %status.target_frame_rate,
            x = self.scene.position(self.motion.target()).x,
            "Demo finished"
        );
        Ok(())
    }

    /// Simulates one frame at the currently delivered rate.
    pub fn tick(&mut self) {
        self.timing = FrameTiming::from_fps(self.pacing.delivered_rate().value());
        let delta = self.timing.delta_seconds;

        self.motion.tick(UpdatePhase::Update, delta, &mut self.scene);

        self.fixed_step.accumulate(delta);
        let mut fixed_steps = 0u32;
        while self.fixed_step.should_step() {
            let step = self.fixed_step.step_seconds();
            self.motion.tick(UpdatePhase::FixedUpdate, step, &mut self.scene);
            fixed_steps += 1;
        }

        self.motion.tick(UpdatePhase::LateUpdate, delta, &mut self.scene);
        self.motion.tick(UpdatePhase::CameraUpdated, delta, &mut self.scene);

        self.frames_run += 1;
        tracing::trace!(
            target: "engine",
            frame = self.frames_run,
            delta_ms = delta * 1000.0,
            fixed_steps,
            "frame tick"
        );
    }

    pub fn handle_key(&mut self, key: char) -> bool {
        self.panel.handle_key(key)
    }

    pub fn edit_frame_rate(&mut self, text: &str) -> Result<PacingDecision, PacingError> {
        let decision = self.panel.frame_rate_edited(text, &mut self.pacing)?;
        self.platform.apply_decision(&decision);
        Ok(decision)
    }

    pub fn toggle_system_pacing(&mut self, use_system_pacing: bool) -> PacingDecision {
        let decision = self.panel.pacing_toggled(use_system_pacing, &mut self.pacing);
        self.platform.apply_decision(&decision);
        decision
    }

    pub fn edit_resolution_x(&mut self, text: &str) -> Result<PacingDecision, PacingError> {
        self.panel.resolution_x_edited(text, &mut self.pacing)?;
        Ok(self.apply_screen_and_pacing())
    }

    pub fn edit_resolution_y(&mut self, text: &str) -> Result<PacingDecision, PacingError> {
        self.panel.resolution_y_edited(text, &mut self.pacing)?;
        Ok(self.apply_screen_and_pacing())
    }

    /// Re-reads the platform display, e.g. after a mode switch.
    pub fn display_changed(&mut self) -> PacingDecision {
        let decision = self.pacing.update_display(self.platform.display_context());
        self.platform.apply_decision(&decision);
        decision
    }

    pub fn change_speed(&mut self, speed: f32) {
        self.motion.set_speed(speed);
    }

    pub fn change_update_phase(&mut self, index: usize) -> Result<(), PacingError> {
        self.motion.set_phase(UpdatePhase::try_from(index)?);
        Ok(())
    }

    pub fn change_movement_target(&mut self, index: usize) -> Result<(), PacingError> {
        self.motion.set_target(MovementTarget::try_from(index)?);
        Ok(())
    }

    pub fn restart(&mut self) {
        self.scene.restart();
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn pacing(&self) -> &FramePacingController {
        &self.pacing
    }

    pub fn panel(&self) -> &SettingsPanel {
        &self.panel
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    // A mode switch may change the native refresh rate, so the display is
    // read again after the screen mode lands.
    fn apply_screen_and_pacing(&mut self) -> PacingDecision {
        self.platform.apply_screen_mode(self.pacing.screen_mode());
        self.display_changed()
    }
}
