use crate::action::HeldActions;

/// A continuous input event, delivered in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Absolute pointer position in window pixels (y grows downward).
    PointerMoved { x: f32, y: f32 },
    /// Vertical scroll amount in lines; positive scrolls away from the user.
    Scrolled { dy: f32 },
    /// Framebuffer was resized to the given physical size.
    Resized { width: u32, height: u32 },
    /// The window asked to close.
    CloseRequested,
}

/// Everything that happened since the previous poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldActions,
}

impl FrameInput {
    /// True when a close was requested by either the window or a held quit key.
    pub fn close_requested(&self) -> bool {
        self.held.is_held(crate::Action::Quit)
            || self
                .events
                .iter()
                .any(|e| matches!(e, InputEvent::CloseRequested))
    }
}

/// Source of per-frame input, polled exactly once per frame.
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    #[test]
    fn close_from_window_event() {
        let input = FrameInput {
            events: vec![InputEvent::Scrolled { dy: 1.0 }, InputEvent::CloseRequested],
            held: HeldActions::new(),
        };
        assert!(input.close_requested());
    }

    #[test]
    fn close_from_quit_key() {
        let input = FrameInput {
            events: Vec::new(),
            held: HeldActions::from_actions(&[Action::Quit]),
        };
        assert!(input.close_requested());
        assert!(!FrameInput::default().close_requested());
    }
}
