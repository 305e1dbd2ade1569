use serde::{Deserialize, Serialize};

use crate::error::PacingError;

use super::scene::SceneGraph;

/// The per-frame callback slot in which movement runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UpdatePhase {
    /// Before rendering, once per frame.
    Update,
    /// Once per fixed physics step, zero or more times per frame.
    FixedUpdate,
    /// After every `Update`.
    #[default]
    LateUpdate,
    /// After the camera driver has positioned the camera.
    CameraUpdated,
}

impl UpdatePhase {
    pub const ALL: [Self; 4] = [
        Self::Update,
        Self::FixedUpdate,
        Self::LateUpdate,
        Self::CameraUpdated,
    ];
}

impl TryFrom<usize> for UpdatePhase {
    type Error = PacingError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| PacingError::invalid_argument("update phase index", index))
    }
}

/// Which scene object the movement drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementTarget {
    /// The background layer, moved the opposite way.
    Layer,
    /// The sprite the virtual camera follows.
    #[default]
    FollowTarget,
    VirtualCamera,
    EngineCamera,
}

impl MovementTarget {
    pub const ALL: [Self; 4] = [
        Self::Layer,
        Self::FollowTarget,
        Self::VirtualCamera,
        Self::EngineCamera,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Layer => 0,
            Self::FollowTarget => 1,
            Self::VirtualCamera => 2,
            Self::EngineCamera => 3,
        }
    }

    fn direction(self) -> f32 {
        match self {
            Self::Layer => -1.0,
            _ => 1.0,
        }
    }
}

impl TryFrom<usize> for MovementTarget {
    type Error = PacingError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| PacingError::invalid_argument("movement target index", index))
    }
}

/// Scene switches implied by the movement target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneBindings {
    pub camera_follows_target: bool,
    pub camera_driver_enabled: bool,
    pub sprite_visible: bool,
}

impl SceneBindings {
    pub fn for_target(target: MovementTarget) -> Self {
        Self {
            camera_follows_target: target == MovementTarget::FollowTarget,
            camera_driver_enabled: target != MovementTarget::EngineCamera,
            sprite_visible: target == MovementTarget::FollowTarget,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Motion {
    phase: UpdatePhase,
    target: MovementTarget,
    speed: i32,
    bindings: SceneBindings,
}

impl Motion {
    pub fn new(phase: UpdatePhase, target: MovementTarget, speed: i32) -> Self {
        Self {
            phase,
            target,
            speed,
            bindings: SceneBindings::for_target(target),
        }
    }

    pub fn phase(&self) -> UpdatePhase {
        self.phase
    }

    pub fn target(&self) -> MovementTarget {
        self.target
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn bindings(&self) -> SceneBindings {
        self.bindings
    }

    pub fn set_phase(&mut self, phase: UpdatePhase) {
        tracing::debug!(target: "engine", ?phase, "update phase changed");
        self.phase = phase;
    }

    pub fn set_target(&mut self, target: MovementTarget) {
        tracing::debug!(target: "engine", ?target, "movement target changed");
        self.target = target;
        self.bindings = SceneBindings::for_target(target);
    }

    /// Slider values are truncated toward zero.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed as i32;
    }

    /// Moves the selected object if `phase` is the configured one. Returns
    /// whether anything moved.
    ///
    /// `CameraUpdated` is raised by the camera driver, so nothing moves in
    /// that phase while the driver is disabled.
    pub fn tick(&self, phase: UpdatePhase, delta_seconds: f32, scene: &mut SceneGraph) -> bool {
        if phase != self.phase {
            return false;
        }
        if phase == UpdatePhase::CameraUpdated && !self.bindings.camera_driver_enabled {
            return false;
        }
        let dx = self.speed as f32 * self.target.direction() * delta_seconds;
        scene.translate_x(self.target, dx);
        true
    }
}
