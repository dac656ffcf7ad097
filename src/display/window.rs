// Window module - window/input contract the core asks a display collaborator
// to implement, plus the bookkeeping struct that bridges window events to
// controller state.
//
// The core never opens a window itself. A host binary owns the real event
// loop (winit, SDL, a game console's own video-out) and implements
// `DisplayWindow` as a thin adapter around it.

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::keyboard::{KeyCode, KeyboardHandler, Player};
use crate::input::ControllerIO;
use std::time::Duration;

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Scale factor (1x, 2x, 3x, 4x, etc.)
    pub scale: u32,
    /// Target frame rate in Hz (typically 60 for NTSC NES)
    pub target_fps: u32,
    /// Whether to enable VSync
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 3x scale, 60 FPS, VSync enabled
    pub fn new() -> Self {
        Self {
            scale: 3,
            target_fps: 60,
            vsync: true,
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8); // Clamp between 1x and 8x
        self
    }

    /// Set the target frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }

    /// Get the frame duration for the target FPS
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend-agnostic window/input event. A collaborator translates its own
/// event types (winit's `WindowEvent`, SDL's event queue, ...) into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user asked to close the window.
    CloseRequested,
    /// A key went down.
    KeyPressed(KeyCode),
    /// A key went up.
    KeyReleased(KeyCode),
}

/// A video/input surface implemented by whatever is driving a real window.
///
/// The core calls `present` once per rendered frame and `poll_events` to
/// drain pending input; it never owns an event loop.
pub trait DisplayWindow {
    /// Present a rendered frame. Implementations typically upload
    /// `frame.to_rgba_bytes()` to a GPU texture or pixel buffer.
    fn present(&mut self, frame: &FrameBuffer);

    /// Drain and return events that occurred since the last poll.
    fn poll_events(&mut self) -> Vec<WindowEvent>;
}

/// Bridges [`WindowEvent`]s into NES controller state.
///
/// Owns the frame buffer a collaborator's `DisplayWindow` is asked to
/// present, plus the keyboard mapping and resulting controller state. A host
/// binary drives this by calling [`DisplayBridge::handle_event`] for each
/// event its `DisplayWindow::poll_events()` returns, then reads
/// [`DisplayBridge::controller_io`] to feed the emulator's input ports.
pub struct DisplayBridge {
    config: WindowConfig,
    frame_buffer: FrameBuffer,
    keyboard_handler: KeyboardHandler,
    controller_io: ControllerIO,
    close_requested: bool,
}

impl DisplayBridge {
    /// Create a new display bridge.
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            frame_buffer: FrameBuffer::new(),
            keyboard_handler: KeyboardHandler::new(),
            controller_io: ControllerIO::new(),
            close_requested: false,
        }
    }

    /// Get the window configuration
    pub fn config(&self) -> WindowConfig {
        self.config
    }

    /// Get a reference to the frame buffer
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Get a mutable reference to the frame buffer
    pub fn frame_buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame_buffer
    }

    /// Get a reference to the keyboard handler
    pub fn keyboard_handler(&self) -> &KeyboardHandler {
        &self.keyboard_handler
    }

    /// Get a reference to the controller I/O
    pub fn controller_io(&self) -> &ControllerIO {
        &self.controller_io
    }

    /// Get a mutable reference to the controller I/O
    pub fn controller_io_mut(&mut self) -> &mut ControllerIO {
        &mut self.controller_io
    }

    /// Whether a `CloseRequested` event has been observed.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Fold one window event into keyboard/controller state.
    pub fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::KeyPressed(key) => self.keyboard_handler.handle_key_press(key),
            WindowEvent::KeyReleased(key) => self.keyboard_handler.handle_key_release(key),
        }
        self.update_controllers();
    }

    /// Present the current frame buffer to a collaborator's window.
    pub fn present<W: DisplayWindow>(&self, window: &mut W) {
        window.present(&self.frame_buffer);
    }

    fn update_controllers(&mut self) {
        let controller1 = self.keyboard_handler.get_controller_state(Player::One);
        let controller2 = self.keyboard_handler.get_controller_state(Player::Two);

        self.controller_io.set_controller1(controller1);
        self.controller_io.set_controller2(controller2);
    }
}
