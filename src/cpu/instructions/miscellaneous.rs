// Miscellaneous instructions for 6502 CPU
// These instructions include NOP, BRK (software interrupt), and RTI (return from interrupt).

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::flags;
use crate::cpu::vectors;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Miscellaneous Instructions
    // ========================================

    /// NOP - No Operation
    ///
    /// Does nothing. This instruction is used for timing delays or as a placeholder.
    ///
    /// Operation: None
    ///
    /// Flags affected: None
    ///
    /// Cycles: 2 cycles
    ///
    /// # Arguments
    /// * `bus` - Unused (implied addressing mode)
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// NOP         ; Do nothing, wait 2 cycles
    /// ```
    pub fn nop(&mut self, _bus: &Bus, _addr_result: &AddressingResult) -> u8 {
        // Do nothing - this is the entire purpose of NOP
        0
    }

    /// BRK - Break / Software Interrupt
    ///
    /// Triggers a software interrupt (IRQ). This is used to invoke interrupt handlers
    /// or for debugging purposes.
    ///
    /// Operation:
    /// 1. PC is incremented by 2 (to skip the padding byte after BRK)
    /// 2. Push PC high byte to stack
    /// 3. Push PC low byte to stack
    /// 4. Push status flags with B flag set to stack
    /// 5. Set I (Interrupt Disable) flag
    /// 6. Load PC from IRQ vector at $FFFE-$FFFF
    ///
    /// Flags affected:
    /// - I: Set to 1 (disable interrupts)
    /// - B: Set to 1 in the pushed status (but not in the CPU status register)
    ///
    /// Cycles: 7 cycles
    ///
    /// # Arguments
    /// * `bus` - The memory bus for stack operations and reading IRQ vector
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// BRK         ; Trigger software interrupt
    /// ```
    ///
    /// # Implementation Note
    /// According to 6502 specification:
    /// - PC is incremented by 2 before being pushed (BRK has a padding byte)
    /// - The B flag is set to 1 in the pushed status register
    /// - The I flag is set after pushing status
    /// - The actual CPU status register's B flag is not modified
    /// - After BRK, execution continues from the address stored at $FFFE-$FFFF
    pub fn brk(&mut self, bus: &mut Bus, _addr_result: &AddressingResult) -> u8 {
        // Increment PC by 2 (BRK has a padding byte after it)
        self.pc = self.pc.wrapping_add(2);

        // Push PC to stack (high byte first, then low byte)
        self.stack_push_u16(bus, self.pc);

        // Push status flags with B flag and UNUSED flag set
        // According to 6502 spec, when BRK pushes status, B flag is set
        let status_to_push = self.status | flags::BREAK | flags::UNUSED;
        self.stack_push(bus, status_to_push);

        // Set the Interrupt Disable flag
        self.set_interrupt_disable(true);

        // Interrupt hijacking: if NMI is latched while BRK fetches its
        // vector, the NMI vector wins and the latch is consumed.
        let vector = if self.nmi_is_pending() {
            self.clear_nmi_pending();
            vectors::NMI
        } else {
            vectors::IRQ
        };
        let lo = bus.read(vector) as u16;
        let hi = bus.read(vector.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;

        0
    }

    /// RTI - Return from Interrupt
    ///
    /// Returns from an interrupt handler (NMI or IRQ).
    /// Restores the processor status and program counter from the stack.
    ///
    /// Operation:
    /// 1. Pull status flags from stack
    /// 2. Pull PC low byte from stack
    /// 3. Pull PC high byte from stack
    ///
    /// Flags affected:
    /// All flags are restored from the stack:
    /// - C: Carry
    /// - Z: Zero
    /// - I: Interrupt Disable
    /// - D: Decimal (unused in NES)
    /// - V: Overflow
    /// - N: Negative
    ///
    /// Cycles: 6 cycles
    ///
    /// # Arguments
    /// * `bus` - The memory bus for stack operations
    /// * `addr_result` - Unused (implied addressing mode)
    ///
    /// # Returns
    /// Always returns 0 (no additional cycles)
    ///
    /// # Example
    /// ```text
    /// ; Inside an interrupt handler:
    /// ; ... handle interrupt ...
    /// RTI         ; Return from interrupt
    /// ```
    ///
    /// # Implementation Note
    /// Like PLP (Pull Processor Status), RTI ignores the B flag from the stack.
    /// The B flag is not a real flag in the 6502 - it's only set when pushing status
    /// to distinguish between BRK (B=1) and hardware interrupts IRQ/NMI (B=0).
    ///
    /// The UNUSED flag (bit 5) is always set to 1 in the status register after pulling.
    pub fn rti(&mut self, bus: &Bus, _addr_result: &AddressingResult) -> u8 {
        // Pull status flags from stack
        let status_from_stack = self.stack_pop(bus);

        // Save the current B flag before updating status
        let current_b_flag = self.get_flag(flags::BREAK);

        // Set status from stack, forcing UNUSED flag (bit 5) to 1
        self.status = status_from_stack | flags::UNUSED;

        // Restore the B flag to its previous value (ignore B flag from stack)
        self.update_flag(flags::BREAK, current_b_flag);

        // Pull PC from stack (low byte first, then high byte)
        self.pc = self.stack_pop_u16(bus);

        0
    }
}
