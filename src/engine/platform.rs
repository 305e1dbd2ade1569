use crate::pacing::{DisplayContext, PacingDecision, ScreenMode, SoftwareCap};

/// The engine/OS side that turns pacing decisions into real settings.
pub trait DisplayPlatform {
    fn display_context(&self) -> DisplayContext;

    fn apply_screen_mode(&mut self, screen: ScreenMode);

    /// Sets the software frame cap and the vertical-sync count together.
    fn apply_decision(&mut self, decision: &PacingDecision);
}

/// In-memory platform that reports a fixed display and records what was
/// applied to it.
#[derive(Debug)]
pub struct PlatformLayer {
    display: DisplayContext,
    screen: Option<ScreenMode>,
    software_cap: SoftwareCap,
    vsync_count: u32,
    applied: u64,
}

impl PlatformLayer {
    pub fn new(display: DisplayContext) -> Self {
        Self {
            display,
            screen: None,
            software_cap: SoftwareCap::Uncapped,
            vsync_count: 0,
            applied: 0,
        }
    }

    /// Simulates a monitor or mode switch.
    pub fn set_display(&mut self, context: DisplayContext) {
        let native = context.native_refresh_rate;
        tracing::debug!(native = %native, "platform display changed");
        self.display = context;
    }

    pub fn software_cap(&self) -> SoftwareCap {
        self.software_cap
    }

    pub fn vsync_count(&self) -> u32 {
        self.vsync_count
    }

    pub fn screen_mode(&self) -> Option<ScreenMode> {
        self.screen
    }

    pub fn applied_count(&self) -> u64 {
        self.applied
    }
}

impl DisplayPlatform for PlatformLayer {
    fn display_context(&self) -> DisplayContext {
        self.display
    }

    fn apply_screen_mode(&mut self, screen: ScreenMode) {
        tracing::debug!(
            width = screen.width,
            height = screen.height,
            fullscreen = screen.fullscreen,
            "platform screen mode applied"
        );
        self.screen = Some(screen);
    }

    fn apply_decision(&mut self, decision: &PacingDecision) {
        self.software_cap = decision.software_cap();
        self.vsync_count = decision.sync_divisor();
        self.applied += 1;
        tracing::debug!(
            software_cap = %self.software_cap,
            vsync_count = self.vsync_count,
            "platform pacing applied"
        );
    }
}

impl Default for PlatformLayer {
    fn default() -> Self {
        Self::new(DisplayContext::default())
    }
}
