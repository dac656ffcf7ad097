// Save state functionality
//
// Persists the loaded cartridge's battery-backed PRG RAM to a file slot.
// Full whole-machine snapshotting (CPU/PPU/APU registers, VRAM, OAM) is out
// of scope; the `.sav`-sidecar-style battery RAM persistence this narrows to
// is what `Emulator::autosave_prg_ram` also uses.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during save state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),

    /// The loaded cartridge has no battery-backed PRG RAM to save/restore
    NoBatteryBackedRam,

    /// No ROM loaded
    NoRomLoaded,
}

impl std::fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::NoBatteryBackedRam => {
                write!(f, "cartridge has no battery-backed PRG RAM")
            }
            SaveStateError::NoRomLoaded => write!(f, "No ROM loaded"),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

/// A save state: the cartridge's battery-backed PRG RAM at a point in time.
#[derive(Debug, Clone)]
pub struct SaveState {
    prg_ram: Vec<u8>,
}

impl SaveState {
    /// Capture the current PRG RAM of a battery-backed cartridge.
    pub fn from_emulator(emulator: &super::Emulator) -> Result<Self, SaveStateError> {
        let bus = emulator.bus();
        if !bus.mapper_has_battery() {
            return Err(SaveStateError::NoBatteryBackedRam);
        }
        let prg_ram = bus.mapper_prg_ram().ok_or(SaveStateError::NoBatteryBackedRam)?;
        Ok(SaveState { prg_ram })
    }

    /// Restore this save state's PRG RAM into the emulator's mapper.
    pub fn restore_to_emulator(
        &self,
        emulator: &mut super::Emulator,
    ) -> Result<(), SaveStateError> {
        let bus = emulator.bus_mut();
        if !bus.mapper_has_battery() {
            return Err(SaveStateError::NoBatteryBackedRam);
        }
        bus.mapper_load_prg_ram(&self.prg_ram);
        Ok(())
    }

    /// Save this save state to a file
    ///
    /// # Arguments
    ///
    /// * `slot` - Save slot number (0-9)
    /// * `rom_path` - Optional path to the currently loaded ROM (for naming)
    pub fn save_to_file(&self, slot: u8, rom_path: Option<&Path>) -> Result<(), SaveStateError> {
        let save_dir = Self::get_save_directory(rom_path);
        fs::create_dir_all(&save_dir)?;

        let file_path = save_dir.join(format!("slot_{}.state", slot));
        fs::write(file_path, &self.prg_ram)?;

        Ok(())
    }

    /// Load a save state from a file
    ///
    /// # Arguments
    ///
    /// * `slot` - Save slot number (0-9)
    /// * `rom_path` - Optional path to the currently loaded ROM (for naming)
    pub fn load_from_file(slot: u8, rom_path: Option<&Path>) -> Result<Self, SaveStateError> {
        let save_dir = Self::get_save_directory(rom_path);
        let file_path = save_dir.join(format!("slot_{}.state", slot));

        let prg_ram = fs::read(file_path)?;
        Ok(SaveState { prg_ram })
    }

    /// Get the save directory for the current ROM
    ///
    /// Creates a directory structure like: saves/<rom_name>/
    fn get_save_directory(rom_path: Option<&Path>) -> PathBuf {
        let base_dir = PathBuf::from("saves");

        if let Some(rom_path) = rom_path {
            if let Some(rom_name) = rom_path.file_stem() {
                return base_dir.join(rom_name);
            }
        }

        base_dir.join("default")
    }
}
