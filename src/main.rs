// NES Emulator - Main Entry Point
//
// A minimal headless CLI: load a ROM and run it for a fixed number of
// frames, reporting progress. Real video/audio/input playback is a
// collaborator's job (see `nes_core::display`, `nes_core::audio`,
// `nes_core::input::keyboard`) - this binary only drives the emulator core.

use nes_core::emulator::Emulator;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("NES Emulator (nes-core) v0.1.0");
    println!("================================");
    println!();

    let mut args = env::args().skip(1);
    let Some(rom_path) = args.next() else {
        eprintln!("Usage: nes-core <rom.nes> [frames]");
        return ExitCode::FAILURE;
    };
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let mut emulator = Emulator::new();
    if let Err(err) = emulator.load_rom(&rom_path) {
        eprintln!("Failed to load '{}': {}", rom_path, err);
        return ExitCode::FAILURE;
    }
    println!("Loaded '{}'", rom_path);

    for _ in 0..frames {
        emulator.step_frame();
    }
    println!("Ran {} frames.", frames);

    if let Err(err) = emulator.autosave_prg_ram() {
        eprintln!("Warning: failed to autosave battery RAM: {}", err);
    }

    ExitCode::SUCCESS
}
