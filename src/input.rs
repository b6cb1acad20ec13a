//! Window input for the demo driver.
//!
//! [`PointerInput`] turns raw winit window events into the few things the
//! session cares about: where the pointer moved, how big the window is, and a
//! pause toggle on the space bar.
//!
//! ```ignore
//! fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
//!     match self.input.handle_event(&event) {
//!         Some(InputEvent::PointerMoved(pos)) => { session.pointer_moved(pos); }
//!         Some(InputEvent::Resized { width, height }) => session.resize(width, height),
//!         Some(InputEvent::TogglePause) => session.clock_mut().toggle_pause(),
//!         None => {}
//!     }
//! }
//! ```

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to this client-pixel position.
    PointerMoved(Vec2),
    Resized { width: u32, height: u32 },
    TogglePause,
}

/// Pointer and window-size tracking.
#[derive(Debug, Default)]
pub struct PointerInput {
    position: Vec2,
    delta: Vec2,
    window_size: (u32, u32),
}

impl PointerInput {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..Default::default()
        }
    }

    /// Last pointer position in client pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Movement of the last pointer event, in pixels.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Record the size the window actually got, without reporting a resize.
    ///
    /// The window manager may not honour the requested size, so call this
    /// once the window exists.
    pub fn sync_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                let space = event.physical_key == PhysicalKey::Code(KeyCode::Space);
                (space && event.state == ElementState::Pressed && !event.repeat)
                    .then_some(InputEvent::TogglePause)
            }
            _ => None,
        }
    }

    fn cursor_moved(&mut self, position: Vec2) -> InputEvent {
        self.delta = position - self.position;
        self.position = position;
        InputEvent::PointerMoved(position)
    }

    fn resized(&mut self, width: u32, height: u32) -> Option<InputEvent> {
        if (width, height) == self.window_size {
            return None;
        }
        self.window_size = (width, height);
        Some(InputEvent::Resized { width, height })
    }
}
