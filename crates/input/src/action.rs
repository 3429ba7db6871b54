/// A discrete action bound to a key. The windowing layer maps physical keys
/// to actions; nothing past that boundary sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move along the view direction.
    MoveForward,
    /// Move against the view direction.
    MoveBackward,
    /// Strafe left of the view direction.
    StrafeLeft,
    /// Strafe right of the view direction.
    StrafeRight,
    /// Move along world up.
    Ascend,
    /// Move against world up.
    Descend,
    /// Request the application to close.
    Quit,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Ascend,
        Action::Descend,
        Action::Quit,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of actions whose keys are currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions(u8);

impl HeldActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions(actions: &[Action]) -> Self {
        let mut held = Self::new();
        for action in actions {
            held.press(*action);
        }
        held
    }

    pub fn press(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.is_held(*a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut held = HeldActions::new();
        assert!(held.is_empty());

        held.press(Action::MoveForward);
        held.press(Action::StrafeLeft);
        assert!(held.is_held(Action::MoveForward));
        assert!(held.is_held(Action::StrafeLeft));
        assert!(!held.is_held(Action::MoveBackward));

        held.release(Action::MoveForward);
        assert!(!held.is_held(Action::MoveForward));
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![Action::StrafeLeft]);
    }

    #[test]
    fn set_mirrors_key_state() {
        let mut held = HeldActions::new();
        held.set(Action::Ascend, true);
        held.set(Action::Ascend, true);
        assert!(held.is_held(Action::Ascend));
        held.set(Action::Ascend, false);
        assert!(held.is_empty());
    }

    #[test]
    fn every_action_has_a_distinct_bit() {
        let all = HeldActions::from_actions(&Action::ALL);
        assert_eq!(all.iter().count(), Action::ALL.len());
    }
}
