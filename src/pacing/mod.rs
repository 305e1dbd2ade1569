//! Frame pacing: choosing between a software frame cap and a hardware
//! vertical-sync divisor.
//!
//! [`recompute_decision`] is the whole algorithm and is a pure function of a
//! [`PacingRequest`] and a [`DisplayContext`]. [`FramePacingController`]
//! owns the request, guards initialization and recomputes the
//! [`PacingDecision`] on every change.

pub mod controller;
pub mod rate;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use controller::FramePacingController;
pub use rate::RefreshRate;

/// What the display subsystem reports. Never mutated by the pacing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayContext {
    pub native_refresh_rate: RefreshRate,
    /// Running inside an editor host rather than a standalone player.
    pub is_editor: bool,
    pub supports_hardware_sync: bool,
}

impl DisplayContext {
    pub fn runtime(native_refresh_rate: RefreshRate) -> Self {
        Self {
            native_refresh_rate,
            is_editor: false,
            supports_hardware_sync: true,
        }
    }

    pub fn editor(native_refresh_rate: RefreshRate) -> Self {
        Self {
            native_refresh_rate,
            is_editor: true,
            supports_hardware_sync: false,
        }
    }
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self::runtime(RefreshRate::default())
    }
}

/// The caller's pacing wishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingRequest {
    /// Always greater than zero.
    pub target_frame_rate_hz: u32,
    /// Pace with a software timer instead of a hardware sync divisor.
    pub use_system_pacing: bool,
}

impl Default for PacingRequest {
    fn default() -> Self {
        Self {
            target_frame_rate_hz: 60,
            use_system_pacing: false,
        }
    }
}

/// Requested output resolution. Refresh-rate changes only take effect in
/// exclusive fullscreen; the platform picks the closest supported mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenMode {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for ScreenMode {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1200,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacingMode {
    SoftwareCapped,
    HardwareSynced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftwareCap {
    Uncapped,
    Hz(u32),
}

impl SoftwareCap {
    pub fn hz(self) -> Option<u32> {
        match self {
            Self::Uncapped => None,
            Self::Hz(hz) => Some(hz),
        }
    }
}

impl fmt::Display for SoftwareCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncapped => f.write_str("uncapped"),
            Self::Hz(hz) => write!(f, "{hz}"),
        }
    }
}

/// The settings the platform layer should apply.
///
/// Exactly one parameter is live: a software-capped decision has a sync
/// divisor of 0 (disabled), a hardware-synced one has
/// [`SoftwareCap::Uncapped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacingDecision {
    mode: PacingMode,
    software_cap: SoftwareCap,
    sync_divisor: u32,
}

impl PacingDecision {
    pub fn software_capped(hz: u32) -> Self {
        Self {
            mode: PacingMode::SoftwareCapped,
            software_cap: SoftwareCap::Hz(hz),
            sync_divisor: 0,
        }
    }

    pub fn hardware_synced(divisor: u32) -> Self {
        Self {
            mode: PacingMode::HardwareSynced,
            software_cap: SoftwareCap::Uncapped,
            sync_divisor: divisor.max(1),
        }
    }

    pub fn mode(&self) -> PacingMode {
        self.mode
    }

    pub fn software_cap(&self) -> SoftwareCap {
        self.software_cap
    }

    /// Display refreshes per rendered frame; 0 when hardware sync is off.
    pub fn sync_divisor(&self) -> u32 {
        self.sync_divisor
    }

    /// The frame rate this decision actually produces on `native`.
    ///
    /// A hardware divisor can only express integer fractions of the native
    /// rate, so this may differ from the requested target.
    pub fn delivered_rate(&self, native: RefreshRate) -> RefreshRate {
        match (self.mode, self.software_cap) {
            (PacingMode::HardwareSynced, _) => native.divided_by(self.sync_divisor),
            (PacingMode::SoftwareCapped, SoftwareCap::Hz(hz)) => RefreshRate::from_hz(hz),
            (PacingMode::SoftwareCapped, SoftwareCap::Uncapped) => native,
        }
    }

    /// Whether the delivered rate equals `target_hz` exactly.
    pub fn is_exact(&self, target_hz: u32, native: RefreshRate) -> bool {
        target_hz > 0 && self.delivered_rate(native) == RefreshRate::from_hz(target_hz)
    }
}

/// Picks the pacing strategy for `request` on `display`.
///
/// - In an editor host the software cap always wins; editors composite
///   through the host window and cannot honour a sync divisor.
/// - At runtime with system pacing requested, the software cap is used.
/// - Otherwise the hardware divisor `round(native / target)` (at least 1) is
///   used and the software cap is lifted.
pub fn recompute_decision(request: &PacingRequest, display: &DisplayContext) -> PacingDecision {
    if display.is_editor || request.use_system_pacing {
        return PacingDecision::software_capped(request.target_frame_rate_hz);
    }

    let divisor = display
        .native_refresh_rate
        .sync_divisor_for(request.target_frame_rate_hz);
    PacingDecision::hardware_synced(divisor)
}
