// Display module - frame buffer and the window contract a collaborator
// implements to present it.
//
// This module provides:
// - NES color palette (52 unique colors)
// - Frame buffer (256x240 pixels)
// - A backend-agnostic `DisplayWindow` trait + `WindowEvent` enum
// - A `DisplayBridge` that folds window events into controller state

pub mod framebuffer;
pub mod integration;
pub mod palette;
pub mod window;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use integration::copy_ppu_to_display;
pub use palette::{palette_to_rgb, palette_to_rgba, NES_PALETTE};
pub use window::{DisplayBridge, DisplayWindow, WindowConfig, WindowEvent};
