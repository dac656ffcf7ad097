// Emulator module - Main emulator coordinator
//
// This module provides the main emulator interface that coordinates all NES components
// (CPU, PPU, APU, Bus) and implements quality-of-life features like save states,
// screenshots, speed control, and configuration management.

mod config;
mod recent_roms;
mod save_state;
mod screenshot;

pub use config::{EmulatorConfig, SpeedMode};
pub use recent_roms::RecentRomsList;
pub use save_state::{SaveState, SaveStateError};
pub use screenshot::capture_screenshot;

use crate::bus::Bus;
use crate::cartridge::mappers::create_mapper;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

/// How many completed frames between PRG RAM autosaves for battery-backed
/// cartridges.
const AUTOSAVE_FRAME_INTERVAL: u64 = 600;

/// Main emulator structure
///
/// Coordinates all NES components and provides high-level functionality
/// for running games, saving/loading states, and managing configuration.
pub struct Emulator {
    /// CPU (6502 processor)
    cpu: Cpu,

    /// Bus (connects all components)
    bus: Bus,

    /// Frames completed since the last PRG RAM autosave attempt
    frames_since_autosave: u64,

    /// Configuration
    config: EmulatorConfig,

    /// Currently loaded ROM path
    rom_path: Option<PathBuf>,

    /// Paused state
    paused: bool,

    /// Speed mode
    speed_mode: SpeedMode,

    /// Frame timing for speed control
    #[allow(dead_code)]
    last_frame_time: Option<Instant>,
}

impl Emulator {
    /// Create a new emulator instance
    ///
    /// Initializes all components to their power-on state.
    ///
    /// # Returns
    ///
    /// A new emulator instance
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// ```
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
            frames_since_autosave: 0,
            config: EmulatorConfig::load_or_default(),
            rom_path: None,
            paused: false,
            speed_mode: SpeedMode::Normal,
            last_frame_time: None,
        }
    }

    /// Load a ROM file
    ///
    /// Loads a ROM from the specified path and initializes the emulator state.
    /// Adds the ROM to the recent ROMs list.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ROM file (.nes)
    ///
    /// # Returns
    ///
    /// Result indicating success or error
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.nes").expect("Failed to load ROM");
    /// ```
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        let mapper = create_mapper(cartridge)?;

        self.bus.load_mapper(Rc::new(RefCell::new(mapper)));
        self.rom_path = Some(path.to_path_buf());
        self.frames_since_autosave = 0;

        if self.bus.mapper_has_battery() {
            if let Some(saved) = Self::read_sav_sidecar(path) {
                self.bus.mapper_load_prg_ram(&saved);
            }
        }

        // Add to recent ROMs list
        let mut recent_roms = RecentRomsList::load_or_default();
        recent_roms.add(path);
        recent_roms.save()?;

        // Reset the emulator
        self.reset();

        Ok(())
    }

    /// Path to the `.sav` sidecar file next to a ROM.
    fn sav_sidecar_path(rom_path: &Path) -> PathBuf {
        rom_path.with_extension("sav")
    }

    fn read_sav_sidecar(rom_path: &Path) -> Option<Vec<u8>> {
        fs::read(Self::sav_sidecar_path(rom_path)).ok()
    }

    /// Persist the mapper's battery-backed PRG RAM to its `.sav` sidecar,
    /// if the loaded cartridge has any. Writes to a temp file in the same
    /// directory and renames it into place so a crash mid-write can never
    /// leave a half-written `.sav` behind.
    pub fn autosave_prg_ram(&self) -> std::io::Result<()> {
        let Some(rom_path) = self.rom_path.as_deref() else {
            return Ok(());
        };
        if !self.bus.mapper_has_battery() {
            return Ok(());
        }
        let Some(prg_ram) = self.bus.mapper_prg_ram() else {
            return Ok(());
        };

        let sav_path = Self::sav_sidecar_path(rom_path);
        let tmp_path = sav_path.with_extension("sav.tmp");
        fs::write(&tmp_path, &prg_ram)?;
        fs::rename(&tmp_path, &sav_path)?;

        Ok(())
    }

    /// Reset the emulator
    ///
    /// Resets all components to their power-on state, as if pressing the reset button.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.reset();
    /// ```
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.frames_since_autosave = 0;
        self.paused = false;
    }

    /// Advance emulation by one full frame.
    ///
    /// Runs the CPU/PPU/APU in lockstep at the NES's native 1:3:1 clock
    /// ratio until the PPU signals that a frame has completed, polling the
    /// NMI and IRQ lines after every CPU cycle. Every
    /// [`AUTOSAVE_FRAME_INTERVAL`] completed frames, battery-backed PRG RAM
    /// is flushed to its `.sav` sidecar.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.nes").expect("Failed to load ROM");
    /// emulator.step_frame();
    /// ```
    pub fn step_frame(&mut self) {
        loop {
            if self.tick() {
                break;
            }
        }

        self.frames_since_autosave += 1;
        if self.frames_since_autosave >= AUTOSAVE_FRAME_INTERVAL {
            self.frames_since_autosave = 0;
            let _ = self.autosave_prg_ram();
        }
    }

    /// Advance emulation by exactly `n` CPU cycles.
    ///
    /// Used by debugging/stepping tools that need finer granularity than a
    /// whole frame. Does not participate in the autosave schedule.
    pub fn run_cycles(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Run one CPU step (one instruction, one interrupt service, or a chunk
    /// of a DMA/DMC stall), its matching three-PPU-cycles-per-CPU-cycle and
    /// one-APU-cycle-per-CPU-cycle, then poll the interrupt lines. Returns
    /// `true` if the PPU completed a frame during this tick.
    fn tick(&mut self) -> bool {
        let cpu_cycles = self.cpu.step(&mut self.bus);

        let mut frame_done = false;
        for _ in 0..cpu_cycles {
            for _ in 0..3 {
                if self.bus.ppu_mut().step() {
                    frame_done = true;
                }
            }
            self.bus.apu_mut().clock();
        }

        if self.bus.ppu_mut().nmi_pending() {
            self.bus.ppu_mut().clear_nmi();
            self.cpu.request_nmi();
        }

        let irq_asserted = self.bus.apu().frame_irq_pending()
            || self.bus.apu().dmc_irq_pending()
            || self.bus.mapper_irq_pending();
        self.cpu.set_irq_line(irq_asserted);

        frame_done
    }

    /// Save state to a file
    ///
    /// Saves the complete emulator state to a file slot.
    ///
    /// # Arguments
    ///
    /// * `slot` - Save slot number (0-9)
    ///
    /// # Returns
    ///
    /// Result indicating success or error
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.save_state(0).expect("Failed to save state");
    /// ```
    pub fn save_state(&self, slot: u8) -> Result<(), SaveStateError> {
        let save_state = SaveState::from_emulator(self)?;
        save_state.save_to_file(slot, self.rom_path.as_deref())
    }

    /// Quick save to slot 0
    ///
    /// Convenience method for quick save (F5 hotkey).
    ///
    /// # Returns
    ///
    /// Result indicating success or error
    pub fn quick_save(&self) -> Result<(), SaveStateError> {
        self.save_state(0)
    }

    /// Load state from a file
    ///
    /// Loads the complete emulator state from a file slot.
    ///
    /// # Arguments
    ///
    /// * `slot` - Save slot number (0-9)
    ///
    /// # Returns
    ///
    /// Result indicating success or error
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_state(0).expect("Failed to load state");
    /// ```
    pub fn load_state(&mut self, slot: u8) -> Result<(), SaveStateError> {
        let save_state = SaveState::load_from_file(slot, self.rom_path.as_deref())?;
        save_state.restore_to_emulator(self)
    }

    /// Quick load from slot 0
    ///
    /// Convenience method for quick load (F7 hotkey).
    ///
    /// # Returns
    ///
    /// Result indicating success or error
    pub fn quick_load(&mut self) -> Result<(), SaveStateError> {
        self.load_state(0)
    }

    /// Take a screenshot
    ///
    /// Captures the current frame buffer as RGBA8 bytes. Encoding that to a
    /// file format and writing it to disk is left to the caller.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let emulator = Emulator::new();
    /// let rgba = emulator.screenshot();
    /// ```
    pub fn screenshot(&self) -> Vec<u8> {
        screenshot::capture_screenshot(self.bus.ppu().frame())
    }

    /// Drain the mixed analog audio samples produced since the last call.
    ///
    /// One sample is produced per CPU cycle. A collaborator feeds these into
    /// [`crate::audio::AudioSystem`] for downsampling, buffering, and
    /// playback.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// let samples = emulator.take_audio_samples();
    /// ```
    pub fn take_audio_samples(&mut self) -> Vec<f32> {
        self.bus.apu_mut().take_samples()
    }

    /// Set speed mode
    ///
    /// Controls emulation speed (normal, fast forward, slow motion).
    ///
    /// # Arguments
    ///
    /// * `mode` - The speed mode to set
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::{Emulator, SpeedMode};
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.set_speed_mode(SpeedMode::FastForward2x);
    /// ```
    pub fn set_speed_mode(&mut self, mode: SpeedMode) {
        self.speed_mode = mode;
    }

    /// Get current speed mode
    ///
    /// # Returns
    ///
    /// The current speed mode
    pub fn speed_mode(&self) -> SpeedMode {
        self.speed_mode
    }

    /// Pause the emulator
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.pause();
    /// ```
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the emulator
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.resume();
    /// ```
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.toggle_pause();
    /// ```
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Check if emulator is paused
    ///
    /// # Returns
    ///
    /// true if paused, false otherwise
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get reference to CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get mutable reference to CPU
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Get reference to Bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to Bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Get reference to configuration
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Get mutable reference to configuration
    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    /// Get the currently loaded ROM path
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
