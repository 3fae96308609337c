use glam::Vec2;
use voxglobe_common::PointerButton;

/// What the rotation controller reads from the pointer in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Drag button is held at the end of the tick.
    pub pressed: bool,
    /// Drag button went down during the tick.
    pub just_pressed: bool,
    /// Pointer travel since the previous tick, in pixels (y grows downward).
    pub delta: Vec2,
}

impl PointerInput {
    /// No button, no motion.
    pub const IDLE: Self = Self {
        pressed: false,
        just_pressed: false,
        delta: Vec2::ZERO,
    };

    /// A held drag moving by `delta` this tick.
    pub fn held(delta: Vec2) -> Self {
        Self {
            pressed: true,
            just_pressed: false,
            delta,
        }
    }

    /// The tick on which the drag button goes down.
    pub fn press() -> Self {
        Self {
            pressed: true,
            just_pressed: true,
            delta: Vec2::ZERO,
        }
    }
}

/// Accumulates host pointer events between ticks for one drag button.
///
/// 1. Forward host events through the `on_*` methods.
/// 2. Call [`take_frame`](Self::take_frame) once per tick.
///
/// Hosts should feed either absolute cursor positions or raw motion deltas,
/// not both, or travel is counted twice.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    button: PointerButton,
    pressed: bool,
    just_pressed: bool,
    delta: Vec2,
    last_position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new(button: PointerButton) -> Self {
        Self {
            button,
            pressed: false,
            just_pressed: false,
            delta: Vec2::ZERO,
            last_position: None,
        }
    }

    pub fn button(&self) -> PointerButton {
        self.button
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Button transition. Buttons other than the drag button are ignored.
    pub fn on_button(&mut self, button: PointerButton, pressed: bool) {
        if button != self.button {
            return;
        }
        if pressed && !self.pressed {
            self.just_pressed = true;
            tracing::trace!(?button, "drag button down");
        }
        self.pressed = pressed;
    }

    /// Absolute cursor position in window pixels.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if let Some(last) = self.last_position {
            self.delta += position - last;
        }
        self.last_position = Some(position);
    }

    /// Raw relative motion.
    pub fn on_motion(&mut self, dx: f32, dy: f32) {
        self.delta += Vec2::new(dx, dy);
    }

    /// Cursor left the window; the next position starts a fresh baseline.
    pub fn on_cursor_left(&mut self) {
        self.last_position = None;
    }

    /// Snapshot this tick's input and clear the transients.
    pub fn take_frame(&mut self) -> PointerInput {
        let frame = PointerInput {
            pressed: self.pressed,
            just_pressed: self.just_pressed,
            delta: self.delta,
        };
        self.just_pressed = false;
        self.delta = Vec2::ZERO;
        frame
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(PointerButton::default())
    }
}
