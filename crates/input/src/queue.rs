use crate::action::{Action, HeldActions};
use crate::event::{FrameInput, InputEvent, InputSource};

/// Buffers events from the windowing layer until the frame loop polls them.
///
/// Relative mouse motion (as delivered for a captured cursor) is integrated
/// into a virtual pointer position so consumers always see absolute
/// coordinates.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
    held: HeldActions,
    pointer: (f32, f32),
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the virtual pointer at a known position, usually the window center.
    pub fn with_pointer(x: f32, y: f32) -> Self {
        Self {
            pointer: (x, y),
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::PointerMoved { x, y } = event {
            self.pointer = (x, y);
        }
        self.events.push(event);
    }

    /// Record a key transition for a bound action.
    pub fn set_action(&mut self, action: Action, pressed: bool) {
        if self.held.is_held(action) != pressed {
            tracing::trace!(?action, pressed, "action state changed");
        }
        self.held.set(action, pressed);
    }

    /// Integrate a raw mouse delta into the virtual pointer.
    pub fn pointer_delta(&mut self, dx: f32, dy: f32) {
        let (x, y) = self.pointer;
        self.push(InputEvent::PointerMoved {
            x: x + dx,
            y: y + dy,
        });
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    pub fn held(&self) -> HeldActions {
        self.held
    }

    /// Drop all held actions, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held = HeldActions::new();
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for InputQueue {
    fn poll(&mut self) -> FrameInput {
        FrameInput {
            events: std::mem::take(&mut self.events),
            held: self.held,
        }
    }
}
