/// A held control the update step reacts to.
///
/// The desktop app maps physical keys onto actions; the scene only sees
/// actions, never raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Move along the camera's forward vector (W).
    MoveForward,
    /// Move against the camera's forward vector (S).
    MoveBackward,
    /// Move against the camera's right vector (A).
    StrafeLeft,
    /// Move along the camera's right vector (D).
    StrafeRight,
    /// Move down the world Y axis (Z).
    Descend,
    /// Move up the world Y axis (X).
    Ascend,
    /// Close the viewer (Escape).
    Exit,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Descend,
        Action::Ascend,
        Action::Exit,
    ];

    /// Default key for the action, as a single uppercase character name.
    pub fn default_key(self) -> &'static str {
        match self {
            Action::MoveForward => "W",
            Action::MoveBackward => "S",
            Action::StrafeLeft => "A",
            Action::StrafeRight => "D",
            Action::Descend => "Z",
            Action::Ascend => "X",
            Action::Exit => "Escape",
        }
    }
}
