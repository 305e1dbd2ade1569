use super::motion::MovementTarget;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    position: Position,
    initial: Position,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            initial: position,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// The movable objects of the demo scene, one per [`MovementTarget`].
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: [SceneNode; 4],
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: [
                SceneNode::new("layer", Position::new(0.0, 0.0, 1.0)),
                SceneNode::new("sprite", Position::default()),
                SceneNode::new("virtual camera", Position::new(0.0, 0.0, -10.0)),
                SceneNode::new("camera", Position::new(0.0, 0.0, -10.0)),
            ],
        }
    }

    pub fn node(&self, target: MovementTarget) -> &SceneNode {
        &self.nodes[target.index()]
    }

    pub fn position(&self, target: MovementTarget) -> Position {
        self.node(target).position
    }

    pub fn translate_x(&mut self, target: MovementTarget, dx: f32) {
        let node = &mut self.nodes[target.index()];
        node.position.x += dx;
        tracing::trace!(name = %node.name, x = node.position.x, "node moved");
    }

    /// Puts every node back where the scene started.
    pub fn restart(&mut self) {
        tracing::debug!("restarting scene");
        for node in &mut self.nodes {
            node.position = node.initial;
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
