/// Pointer event phases delivered to the view tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer event in the coordinate space of the receiving view.
///
/// Coordinates stay `f32` end to end; hit testing truncates them to
/// integers when comparing against child bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub x: f32,
    pub y: f32,
}

impl TouchEvent {
    pub fn new(action: TouchAction, x: f32, y: f32) -> Self {
        Self { action, x, y }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Up, x, y)
    }

    pub fn cancel() -> Self {
        Self::new(TouchAction::Cancel, 0.0, 0.0)
    }

    /// Same position with the action swapped. Used when a gesture in
    /// flight has to be cancelled towards its current target.
    pub fn with_action(self, action: TouchAction) -> Self {
        Self { action, ..self }
    }

    /// Translates the event into a child coordinate space.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}
