//! Pointer and touch input for steering the ambient field.
//!
//! [`PointerInput`] keeps the most recent pointer sample as an offset from the
//! viewport center, normalized to `[-0.5, 0.5]` on each axis. There is no
//! smoothing: the field reads the raw latest value each frame.
//!
//! Touch only steers while exactly one finger is down, so pinches and other
//! multi-touch gestures leave the offset alone.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Map a position in pixels to an offset from the viewport center, in viewport
/// units. Returns `None` for a degenerate viewport.
pub fn normalize_pointer(position: Vec2, viewport: (u32, u32)) -> Option<Vec2> {
    let (w, h) = viewport;
    if w == 0 || h == 0 {
        return None;
    }
    Some(Vec2::new(
        position.x / w as f32 - 0.5,
        position.y / h as f32 - 0.5,
    ))
}

/// What a window event meant for the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Nothing the effect cares about.
    None,
    /// The pointer offset changed.
    PointerMoved,
    /// The user asked for a burst.
    Trigger,
}

/// Latest pointer offset plus the viewport it is measured against.
#[derive(Debug, Default)]
pub struct PointerInput {
    offset: Vec2,
    viewport: (u32, u32),
    touches: HashSet<u64>,
}

impl PointerInput {
    /// Create a tracker for a viewport of the given size in physical pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }

    /// Normalized offset in `[-0.5, 0.5]^2`; zero until the first sample.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Update the viewport used for normalization.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Record a cursor position in physical pixels.
    pub fn cursor_moved(&mut self, position: Vec2) -> bool {
        match normalize_pointer(position, self.viewport) {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    /// Record a touch sample. Moves the offset only during a single-finger drag.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> bool {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id);
                false
            }
            TouchPhase::Moved => {
                if self.touches.len() == 1 && self.touches.contains(&id) {
                    self.cursor_moved(position)
                } else {
                    false
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                false
            }
        }
    }

    /// Number of fingers currently down.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Process a winit window event.
    ///
    /// Space, Enter and a left click map to [`InputAction::Trigger`].
    pub fn handle_event(&mut self, event: &WindowEvent) -> InputAction {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if self.cursor_moved(position) {
                    InputAction::PointerMoved
                } else {
                    InputAction::None
                }
            }

            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                if self.touch(touch.id, touch.phase, position) {
                    InputAction::PointerMoved
                } else {
                    InputAction::None
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => InputAction::Trigger,

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Space | KeyCode::Enter | KeyCode::NumpadEnter) => {
                        InputAction::Trigger
                    }
                    _ => InputAction::None,
                }
            }

            _ => InputAction::None,
        }
    }
}
