// APU module - Audio Processing Unit implementation
//
// This module contains the APU emulation for the NES (Ricoh 2A03): two pulse
// channels, a triangle channel, a noise channel, and a delta-modulation
// sample channel (DMC), all driven by a shared frame sequencer.
//
// ## Register Map
//
// ### Pulse 1 ($4000-$4003) / Pulse 2 ($4004-$4007)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4000/4 | Duty cycle, envelope                  |
// | $4001/5 | Sweep unit                            |
// | $4002/6 | Timer low byte                        |
// | $4003/7 | Length counter, timer high bits       |
//
// ### Triangle ($4008-$400B)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4008   | Linear counter                        |
// | $4009   | Unused                                |
// | $400A   | Timer low byte                        |
// | $400B   | Length counter, timer high bits       |
//
// ### Noise ($400C-$400F)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $400C   | Envelope                              |
// | $400D   | Unused                                |
// | $400E   | Mode, period                          |
// | $400F   | Length counter                        |
//
// ### DMC ($4010-$4013)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4010   | Flags, rate                           |
// | $4011   | Direct load                           |
// | $4012   | Sample address                        |
// | $4013   | Sample length                         |
//
// ### Control ($4015, $4017)
// | Address | Description                           |
// |---------|---------------------------------------|
// | $4015   | Status/Control (R/W)                  |
// | $4017   | Frame counter (W)                     |

pub mod channels;
pub mod components;
pub mod constants;

use crate::bus::MemoryMappedDevice;
use channels::{DmcChannel, NoiseChannel, PulseChannel, TriangleChannel};
use components::{FrameCounter, FrameEvent};

/// APU structure representing the Audio Processing Unit state
pub struct Apu {
    /// Pulse channel 1
    pulse1: PulseChannel,
    /// Pulse channel 2
    pulse2: PulseChannel,
    /// Triangle channel
    triangle: TriangleChannel,
    /// Noise channel
    noise: NoiseChannel,
    /// DMC (sample playback) channel
    dmc: DmcChannel,

    /// Frame sequencer driving quarter/half-frame clocks and the frame IRQ
    sequencer: FrameCounter,

    // ========================================
    // Raw register mirrors
    //
    // DMC is kept at register-mirror fidelity for these four bytes in
    // addition to driving the real `DmcChannel` above, since callers poke
    // at the raw iNES register values directly.
    // ========================================
    /// $4010: DMC - Flags and rate
    dmc_flags_rate: u8,
    /// $4011: DMC - Direct load
    dmc_direct_load: u8,
    /// $4012: DMC - Sample address
    dmc_sample_address: u8,
    /// $4013: DMC - Sample length
    dmc_sample_length: u8,
    /// $4015: last value written to Status/Control
    status_control: u8,
    /// $4017: last value written to Frame Counter
    frame_counter: u8,

    /// Mixed analog samples produced by [`Apu::clock`], awaiting collection
    /// by [`Apu::take_samples`]. One sample per CPU cycle.
    sample_buffer: Vec<f32>,
}

impl Apu {
    /// Create a new APU instance with default state
    pub fn new() -> Self {
        Apu {
            pulse1: PulseChannel::new(1),
            pulse2: PulseChannel::new(2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(),
            dmc: DmcChannel::new(),

            sequencer: FrameCounter::new(),

            dmc_flags_rate: 0x00,
            dmc_direct_load: 0x00,
            dmc_sample_address: 0x00,
            dmc_sample_length: 0x00,
            status_control: 0x00,
            frame_counter: 0x00,
            sample_buffer: Vec::new(),
        }
    }

    /// Reset APU to power-on state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Clock every channel timer and the frame sequencer by one CPU cycle
    pub fn clock(&mut self) {
        let events = self.sequencer.clock();
        self.dispatch_frame_events(&events);

        self.pulse1.clock_timer();
        self.pulse2.clock_timer();
        self.triangle.clock_timer();
        self.noise.clock_timer();
        self.dmc.clock_timer();

        self.sample_buffer.push(self.mixer_sample());
    }

    fn dispatch_frame_events(&mut self, events: &[FrameEvent]) {
        for event in events {
            match event {
                FrameEvent::QuarterFrame => self.clock_quarter_frame(),
                FrameEvent::HalfFrame => self.clock_half_frame(),
                FrameEvent::SetIrq => {}
            }
        }
    }

    /// Clock envelopes and the triangle's linear counter
    pub fn clock_quarter_frame(&mut self) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.triangle.clock_linear_counter();
        self.noise.clock_envelope();
    }

    /// Clock envelopes, linear counter, length counters, and sweep units
    pub fn clock_half_frame(&mut self) {
        self.clock_quarter_frame();

        self.pulse1.clock_length_counter();
        self.pulse1.clock_sweep();
        self.pulse2.clock_length_counter();
        self.pulse2.clock_sweep();
        self.triangle.clock_length_counter();
        self.noise.clock_length_counter();
    }

    /// Simple saturating mix of the two pulse channels (0-30)
    pub fn output(&self) -> u8 {
        self.pulse1.output().saturating_add(self.pulse2.output())
    }

    /// Output from pulse channel 1
    pub fn pulse1_output(&self) -> u8 {
        self.pulse1.output()
    }

    /// Output from pulse channel 2
    pub fn pulse2_output(&self) -> u8 {
        self.pulse2.output()
    }

    /// Output from the triangle channel
    pub fn triangle_output(&self) -> u8 {
        self.triangle.output()
    }

    /// Output from the noise channel
    pub fn noise_output(&self) -> u8 {
        self.noise.output()
    }

    /// Output from the DMC channel
    pub fn dmc_output(&self) -> u8 {
        self.dmc.output()
    }

    /// Mixed analog sample in roughly [0.0, 1.0), using the NES's non-linear
    /// mixing formulas rather than a simple linear sum.
    pub fn mixer_sample(&self) -> f32 {
        let p1 = self.pulse1.output() as f32;
        let p2 = self.pulse2.output() as f32;
        let pulse_out = if p1 + p2 > 0.0 {
            95.88 / ((8128.0 / (p1 + p2)) + 100.0)
        } else {
            0.0
        };

        let t = self.triangle.output() as f32;
        let n = self.noise.output() as f32;
        let d = self.dmc.output() as f32;
        let tnd_out = if t + n + d > 0.0 {
            159.79 / (1.0 / (t / 8227.0 + n / 12241.0 + d / 22638.0) + 100.0)
        } else {
            0.0
        };

        pulse_out + tnd_out
    }

    /// Drain the mixed samples accumulated since the last call.
    ///
    /// One sample is produced per [`Apu::clock`] call (i.e. once per CPU
    /// cycle). A collaborator feeds these into [`crate::audio::AudioSystem`]
    /// for downsampling, buffering, and playback.
    pub fn take_samples(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.sample_buffer)
    }

    /// Whether the frame sequencer's IRQ flag is currently set
    pub fn frame_irq_pending(&self) -> bool {
        self.sequencer.irq_pending()
    }

    /// Whether the DMC channel has a pending IRQ
    pub fn dmc_irq_pending(&self) -> bool {
        self.dmc.irq_pending()
    }

    /// If the DMC channel needs its sample buffer refilled, the CPU address
    /// to read from. The caller is expected to read the byte from the bus
    /// and feed it back via [`Apu::dmc_load_sample`], stalling the CPU for
    /// four cycles as real hardware does.
    pub fn dmc_needs_sample(&self) -> Option<u16> {
        self.dmc.needs_sample_read()
    }

    /// Feed a sample byte fetched on behalf of the DMC channel
    pub fn dmc_load_sample(&mut self, byte: u8) {
        self.dmc.load_sample_byte(byte);
    }

    /// Read from an APU register
    fn read_register(&mut self, addr: u16) -> u8 {
        match addr {
            // All channel registers are write-only
            0x4000..=0x4013 => 0,

            // $4014: OAM DMA - not part of the APU, handled by the bus
            0x4014 => 0,

            // $4015: Status/Control
            // Bit 0: Pulse 1 length counter > 0
            // Bit 1: Pulse 2 length counter > 0
            // Bit 2: Triangle length counter > 0
            // Bit 3: Noise length counter > 0
            // Bit 4: DMC active (bytes remaining > 0)
            // Bit 6: Frame interrupt flag (cleared by this read)
            // Bit 7: DMC interrupt flag
            0x4015 => {
                let mut status = 0u8;
                if self.pulse1.length_counter.is_active() {
                    status |= 0x01;
                }
                if self.pulse2.length_counter.is_active() {
                    status |= 0x02;
                }
                if self.triangle.length_counter.is_active() {
                    status |= 0x04;
                }
                if self.noise.length_counter.is_active() {
                    status |= 0x08;
                }
                if self.dmc.is_active() {
                    status |= 0x10;
                }
                if self.sequencer.irq_pending() {
                    status |= 0x40;
                }
                if self.dmc.irq_pending() {
                    status |= 0x80;
                }

                self.sequencer.clear_irq();

                status
            }

            // $4016: Controller 1 - not part of the APU
            0x4016 => 0,

            // $4017: Frame Counter - write only
            0x4017 => 0,

            _ => 0,
        }
    }

    /// Write to an APU register
    fn write_register(&mut self, addr: u16, data: u8) {
        match addr {
            0x4000 => self.pulse1.write_register_0(data),
            0x4001 => self.pulse1.write_register_1(data),
            0x4002 => self.pulse1.write_register_2(data),
            0x4003 => self.pulse1.write_register_3(data),

            0x4004 => self.pulse2.write_register_0(data),
            0x4005 => self.pulse2.write_register_1(data),
            0x4006 => self.pulse2.write_register_2(data),
            0x4007 => self.pulse2.write_register_3(data),

            0x4008 => self.triangle.write_register_0(data),
            0x4009 => self.triangle.write_register_1(data),
            0x400A => self.triangle.write_register_2(data),
            0x400B => self.triangle.write_register_3(data),

            0x400C => self.noise.write_register_0(data),
            0x400D => self.noise.write_register_1(data),
            0x400E => self.noise.write_register_2(data),
            0x400F => self.noise.write_register_3(data),

            0x4010 => {
                self.dmc_flags_rate = data;
                self.dmc.write_register_0(data);
            }
            0x4011 => {
                self.dmc_direct_load = data;
                self.dmc.write_register_1(data);
            }
            0x4012 => {
                self.dmc_sample_address = data;
                self.dmc.write_register_2(data);
            }
            0x4013 => {
                self.dmc_sample_length = data;
                self.dmc.write_register_3(data);
            }

            // $4014: OAM DMA - not part of the APU, handled by the bus
            0x4014 => {}

            // $4015: Status/Control - enable/disable channels
            // Bit 0: Enable Pulse 1
            // Bit 1: Enable Pulse 2
            // Bit 2: Enable Triangle
            // Bit 3: Enable Noise
            // Bit 4: Enable DMC
            0x4015 => {
                self.status_control = data;
                self.pulse1.set_enabled((data & 0x01) != 0);
                self.pulse2.set_enabled((data & 0x02) != 0);
                self.triangle.set_enabled((data & 0x04) != 0);
                self.noise.set_enabled((data & 0x08) != 0);
                self.dmc.set_enabled((data & 0x10) != 0);
            }

            // $4016: Controller 1 - not part of the APU
            0x4016 => {}

            // $4017: Frame Counter
            // Bit 6: IRQ inhibit flag
            // Bit 7: Sequencer mode (0 = 4-step, 1 = 5-step)
            0x4017 => {
                self.frame_counter = data;
                let events = self.sequencer.write_control(data);
                self.dispatch_frame_events(&events);
            }

            _ => {}
        }
    }
}

impl MemoryMappedDevice for Apu {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_register(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_register(addr, data);
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
