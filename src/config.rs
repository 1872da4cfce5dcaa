//! Boot-time policy for the kernel.
//!
//! Hardware topology (controller ports, vector offsets, ICWs) lives next to the
//! code that drives it in `sys::interrupts::pic`. This module only holds the
//! knobs a board bring-up is expected to change.

use crate::log::LogLevel;
use crate::sys::interrupts::pic::PicMasks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Which IRQ lines are unmasked right after the PIC remap.
    pub pic_masks: PicMasks,
    /// Messages below this level are dropped.
    pub log_level: LogLevel,
}

/// I/O base of the console UART (COM1). The `SERIAL` static is built from it at
/// compile time, so it is a constant rather than part of `KernelConfig`.
pub const SERIAL_BASE: u16 = 0x3F8;

impl KernelConfig {
    /// Timer and keyboard only; everything else, the cascade included, stays masked.
    pub const DEFAULT: Self = Self {
        pic_masks: PicMasks::BOOT,
        log_level: LogLevel::Info,
    };
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::interrupts::irq::IrqLine;

    #[test]
    fn default_masks_unmask_timer_and_keyboard() {
        let cfg = KernelConfig::default();
        assert_eq!(cfg.pic_masks.master, 0xFC);
        assert_eq!(cfg.pic_masks.slave, 0xFF);
        assert_eq!(cfg.pic_masks, PicMasks::unmasking(&[IrqLine::TIMER, IrqLine::KEYBOARD]));
    }

    #[test]
    fn console_on_com1() {
        assert_eq!(SERIAL_BASE, 0x3F8);
    }
}
