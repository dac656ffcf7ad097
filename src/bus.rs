// Bus module - Memory bus implementation
//
// This module implements the main memory bus that connects the CPU to all memory-mapped
// components in the NES system. It handles address routing, memory mirroring, and
// owns the RAM, PPU, APU, controller ports, and the cartridge mapper.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4013, $4015: APU Registers
// $4014: OAM DMA trigger
// $4016: Controller 1 (strobe write, shift-register read)
// $4017: Controller 2 read / APU frame counter write
// $4018-$401F: APU and I/O test functionality (usually disabled)
// $4020-$FFFF: Cartridge space (PRG-ROM, PRG-RAM, and mapper registers)
// ```
//
// Registers and register reads on the PPU and APU have side effects (PPUSTATUS
// clears vblank on read, PPUDATA read-buffers, controller reads shift a bit out),
// so `MemoryMappedDevice::read` takes `&mut self`. The Bus itself stays usable
// through a shared `&self` by keeping its devices behind `RefCell`, the same
// pattern the PPU already uses for its `Rc<RefCell<Box<dyn Mapper>>>`.

use crate::apu::Apu;
use crate::cartridge::Mapper;
use crate::input::ControllerIO;
use crate::ppu::Ppu;
use crate::ram::Ram;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Trait for memory-mapped components
///
/// Components implementing this trait can handle read and write operations for
/// their specific memory ranges. Reads take `&mut self` because several
/// registers (PPU, APU, controllers) mutate internal state as a side effect of
/// being read.
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    fn write(&mut self, addr: u16, data: u8);
}

/// Main memory bus structure
///
/// The Bus connects the CPU to all memory-mapped components in the NES system:
/// internal RAM, the PPU, the APU, both controller ports, and the cartridge
/// mapper. It handles address decoding and mirroring and routes read/write
/// operations to the appropriate component.
pub struct Bus {
    ram: RefCell<Ram>,
    ppu: RefCell<Ppu>,
    apu: RefCell<Apu>,
    controllers: RefCell<ControllerIO>,
    mapper: Option<Rc<RefCell<Box<dyn Mapper>>>>,

    /// Set when a write to $4014 has kicked off an OAM DMA copy. The CPU
    /// drains this after the current instruction to add the stall cycles
    /// (513, or 514 on an odd cycle) since the Bus has no way to reach back
    /// into the CPU itself.
    oam_dma_pending: bool,

    /// CPU cycle count as of the start of the instruction currently being
    /// executed, set by the CPU before each fetch/execute step. Forwarded
    /// to the mapper on cartridge-space writes so MMC1 can detect its
    /// same-cycle double-write quirk.
    cpu_cycle_hint: u64,
}

impl Bus {
    /// Create a new bus instance with freshly reset components and no
    /// cartridge mapper loaded.
    ///
    /// # Example
    /// ```
    /// use nes_core::Bus;
    /// let bus = Bus::new();
    /// ```
    pub fn new() -> Self {
        Bus {
            ram: RefCell::new(Ram::new()),
            ppu: RefCell::new(Ppu::new()),
            apu: RefCell::new(Apu::new()),
            controllers: RefCell::new(ControllerIO::new()),
            mapper: None,
            oam_dma_pending: false,
            cpu_cycle_hint: 0,
        }
    }

    /// Record the CPU's total cycle count as of the start of the instruction
    /// about to execute. Called by [`crate::cpu::Cpu::step`] before fetching
    /// each opcode.
    pub fn set_cpu_cycle(&mut self, cycle: u64) {
        self.cpu_cycle_hint = cycle;
    }

    /// Install a cartridge mapper, sharing it with the PPU so that CHR
    /// pattern-table fetches and CPU program-space reads see the same
    /// banking state.
    pub fn load_mapper(&mut self, mapper: Rc<RefCell<Box<dyn Mapper>>>) {
        self.ppu.borrow_mut().set_mapper(Rc::clone(&mapper));
        self.mapper = Some(mapper);
    }

    /// Reset RAM-adjacent state and cascade the reset to the PPU and APU.
    /// The cartridge mapper is left untouched - mappers reset via their own
    /// power-on state when reconstructed, not through this call.
    pub fn reset(&mut self) {
        self.ppu.borrow_mut().reset();
        self.apu.borrow_mut().reset();
        self.oam_dma_pending = false;
    }

    /// Borrow the PPU immutably, e.g. to read the completed frame buffer.
    pub fn ppu(&self) -> Ref<'_, Ppu> {
        self.ppu.borrow()
    }

    /// Borrow the PPU mutably.
    pub fn ppu_mut(&self) -> RefMut<'_, Ppu> {
        self.ppu.borrow_mut()
    }

    /// Borrow the APU immutably, e.g. to pull mixed audio samples.
    pub fn apu(&self) -> Ref<'_, Apu> {
        self.apu.borrow()
    }

    /// Borrow the APU mutably.
    pub fn apu_mut(&self) -> RefMut<'_, Apu> {
        self.apu.borrow_mut()
    }

    /// Borrow the controller ports mutably, e.g. to update button state
    /// before the next frame.
    pub fn controllers_mut(&self) -> RefMut<'_, ControllerIO> {
        self.controllers.borrow_mut()
    }

    /// Returns true and clears the flag if an OAM DMA transfer happened
    /// since the last time this was called. The caller (the CPU, via its
    /// `step` loop) is responsible for adding the resulting stall cycles.
    pub fn take_oam_dma_request(&mut self) -> bool {
        std::mem::take(&mut self.oam_dma_pending)
    }

    /// Whether the loaded mapper currently asserts its IRQ line (e.g. an
    /// MMC3 scanline counter reaching zero).
    pub fn mapper_irq_pending(&self) -> bool {
        match &self.mapper {
            Some(mapper) => mapper.borrow().irq_pending(),
            None => false,
        }
    }

    /// Whether the loaded mapper has battery-backed PRG RAM worth
    /// persisting to a `.sav` sidecar.
    pub fn mapper_has_battery(&self) -> bool {
        match &self.mapper {
            Some(mapper) => mapper.borrow().has_battery(),
            None => false,
        }
    }

    /// Snapshot of the mapper's PRG RAM, if it has any.
    pub fn mapper_prg_ram(&self) -> Option<Vec<u8>> {
        let mapper = self.mapper.as_ref()?;
        mapper.borrow().prg_ram().map(|ram| ram.to_vec())
    }

    /// Restore the mapper's PRG RAM from a `.sav` sidecar, if it has any.
    pub fn mapper_load_prg_ram(&mut self, data: &[u8]) {
        if let Some(mapper) = &self.mapper {
            let mut mapper = mapper.borrow_mut();
            if let Some(ram) = mapper.prg_ram_mut() {
                let len = ram.len().min(data.len());
                ram[..len].copy_from_slice(&data[..len]);
                mapper.on_prg_ram_loaded();
            }
        }
    }

    /// Perform the 256-byte OAM DMA copy from CPU page `page` (i.e.
    /// `page << 8` through `page << 8 | 0xFF`) into PPU OAM starting at the
    /// PPU's current OAMADDR, and flag the pending stall for the CPU.
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let start = self.ppu.borrow().oam_addr;
        for i in 0..=255u8 {
            let value = self.read(base.wrapping_add(i as u16));
            self.ppu.borrow_mut().write_oam(start.wrapping_add(i), value);
        }
        self.oam_dma_pending = true;
    }

    /// Read a byte from the bus
    ///
    /// Routes the read operation to the appropriate memory region or device
    /// based on the address, applying the mirroring rules of the NES memory map.
    ///
    /// # Example
    /// ```
    /// use nes_core::Bus;
    /// let bus = Bus::new();
    /// let value = bus.read(0x0000); // Read from RAM
    /// ```
    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.borrow_mut().read(addr),

            0x2000..=0x3FFF => self.ppu.borrow_mut().read(addr),

            0x4016 => self.controllers.borrow_mut().read(addr),
            0x4017 => self.controllers.borrow_mut().read(addr),

            0x4000..=0x4015 => self.apu.borrow_mut().read(addr),

            // APU/I/O Test Mode: usually disabled on retail hardware, open bus.
            0x4018..=0x401F => 0,

            0x4020..=0xFFFF => match &self.mapper {
                Some(mapper) => mapper.borrow().cpu_read(addr),
                None => 0,
            },
        }
    }

    /// Write a byte to the bus
    ///
    /// Routes the write operation to the appropriate memory region or device
    /// based on the address. $4014 triggers an immediate OAM DMA transfer;
    /// $4017 writes go to the APU frame counter rather than the controller
    /// port that owns $4017 reads.
    ///
    /// # Example
    /// ```
    /// use nes_core::Bus;
    /// let mut bus = Bus::new();
    /// bus.write(0x0000, 0x42); // Write to RAM
    /// ```
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.borrow_mut().write(addr, data),

            0x2000..=0x3FFF => self.ppu.borrow_mut().write(addr, data),

            0x4014 => self.oam_dma(data),

            0x4016 => self.controllers.borrow_mut().write(addr, data),

            // $4017 write is the APU frame counter, not the controller port.
            0x4017 => self.apu.borrow_mut().write(addr, data),

            0x4000..=0x4013 | 0x4015 => self.apu.borrow_mut().write(addr, data),

            0x4018..=0x401F => {}

            0x4020..=0xFFFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().cpu_write_at(addr, data, self.cpu_cycle_hint);
                }
            }
        }
    }

    /// Read a 16-bit word from the bus (little-endian)
    ///
    /// # Example
    /// ```
    /// use nes_core::Bus;
    /// let mut bus = Bus::new();
    /// bus.write(0x0000, 0x34);
    /// bus.write(0x0001, 0x12);
    /// assert_eq!(bus.read_u16(0x0000), 0x1234);
    /// ```
    pub fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write a 16-bit word to the bus (little-endian)
    pub fn write_u16(&mut self, addr: u16, data: u16) {
        let lo = (data & 0xFF) as u8;
        let hi = (data >> 8) as u8;
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
