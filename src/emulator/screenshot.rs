// Screenshot functionality
//
// Converts the PPU frame buffer (palette indices) to RGBA8 bytes. Encoding
// that to a PNG (or any other format) and writing it to disk is a
// collaborator's job, not the core's.

use crate::display::palette::palette_to_rgba;

/// Convert a PPU frame buffer (palette indices, 256x240) into RGBA8 bytes.
///
/// # Example
///
/// ```no_run
/// use nes_core::emulator::capture_screenshot;
/// use nes_core::ppu::Ppu;
///
/// let ppu = Ppu::new();
/// let rgba = capture_screenshot(ppu.frame());
/// // A collaborator encodes `rgba` to PNG and writes it wherever it likes.
/// ```
pub fn capture_screenshot(frame_buffer: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(frame_buffer.len() * 4);
    for &index in frame_buffer {
        rgba.extend_from_slice(&palette_to_rgba(index));
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_screenshot_size() {
        let indices = vec![0u8; 256 * 240];
        let rgba = capture_screenshot(&indices);
        assert_eq!(rgba.len(), 256 * 240 * 4);
    }

    #[test]
    fn test_capture_screenshot_pixel_values() {
        let indices = vec![0x00u8, 0x01, 0x02, 0x03];
        let rgba = capture_screenshot(&indices);
        assert_eq!(rgba.len(), 16);
        // First pixel (palette index 0, dark gray 0x666666) has full alpha.
        assert_eq!(&rgba[0..4], &[0x66, 0x66, 0x66, 0xFF]);
    }
}
