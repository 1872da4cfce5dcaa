//! # Programmable Interrupt Controller (8259 PIC)
//!
//! Configures the legacy 8259 pair for interrupt routing and acknowledges
//! interrupts on their behalf.
//!
//! ## PIC Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │   PIC 1     │◀────│   PIC 2     │
//! │  (Master)   │ IR2 │  (Slave)    │
//! │ IRQ 0-7     │     │ IRQ 8-15    │
//! └─────────────┘     └─────────────┘
//!       │
//!       ▼
//!     CPU
//! ```
//!
//! ## Vector Remapping
//!
//! Out of reset the master delivers IRQ 0-7 on vectors 8-15, right on top of
//! the CPU exceptions (IRQ0 would look like a double fault). [`remap`] moves
//! them:
//! - PIC 1: vectors 32-39 (IRQ 0-7)
//! - PIC 2: vectors 40-47 (IRQ 8-15)
//!
//! ## Interrupt Assignments
//!
//! | IRQ | Vector | Device    |
//! |-----|--------|-----------|
//! | 0   | 32     | Timer     |
//! | 1   | 33     | Keyboard  |
//! | 2   | 34     | Cascade   |

use core::sync::atomic::{AtomicBool, Ordering};

use super::irq::{IrqLine, IrqVector};
use super::port::PortWriter;

pub const PIC_1_OFFSET: u8 = 32; // Primary PIC handles IRQs 0-7
pub const PIC_2_OFFSET: u8 = 40; // Secondary PIC handles IRQs 8-15

/// ICW1: start initialization, cascade mode, ICW4 follows.
const ICW1_INIT: u8 = 0x11;
/// ICW3 on the master: slave present on input 2.
const ICW3_MASTER_HAS_SLAVE_ON_IR2: u8 = 0x04;
/// ICW3 on the slave: its cascade identity is 2.
const ICW3_SLAVE_ID: u8 = 0x02;
/// ICW4: 8086/88 mode, normal EOI.
const ICW4_8086: u8 = 0x01;

const CMD_END_OF_INTERRUPT: u8 = 0x20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pic {
    Master,
    Slave,
}

impl Pic {
    pub const fn command_port(self) -> u16 {
        match self {
            Pic::Master => 0x20,
            Pic::Slave => 0xA0,
        }
    }

    pub const fn data_port(self) -> u16 {
        self.command_port() + 1
    }

    pub const fn offset(self) -> u8 {
        match self {
            Pic::Master => PIC_1_OFFSET,
            Pic::Slave => PIC_2_OFFSET,
        }
    }

    const fn cascade_word(self) -> u8 {
        match self {
            Pic::Master => ICW3_MASTER_HAS_SLAVE_ON_IR2,
            Pic::Slave => ICW3_SLAVE_ID,
        }
    }
}

/// Interrupt mask registers loaded at the end of [`remap`]. A set bit masks
/// the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PicMasks {
    pub master: u8,
    pub slave: u8,
}

impl PicMasks {
    pub const ALL_MASKED: Self = Self { master: 0xFF, slave: 0xFF };

    /// Timer (IRQ0) and keyboard (IRQ1) only.
    pub const BOOT: Self = Self::unmasking(&[IrqLine::TIMER, IrqLine::KEYBOARD]);

    /// Masks with exactly `lines` open. Any slave line also opens the cascade
    /// input on the master, otherwise it could never be delivered.
    pub const fn unmasking(lines: &[IrqLine]) -> Self {
        let mut masks = Self::ALL_MASKED;
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            match line.pic() {
                Pic::Master => masks.master &= !line.mask_bit(),
                Pic::Slave => {
                    masks.slave &= !line.mask_bit();
                    masks.master &= !IrqLine::CASCADE.mask_bit();
                }
            }
            i += 1;
        }
        masks
    }

    pub const fn for_pic(&self, pic: Pic) -> u8 {
        match pic {
            Pic::Master => self.master,
            Pic::Slave => self.slave,
        }
    }
}

impl Default for PicMasks {
    fn default() -> Self {
        Self::BOOT
    }
}

/// Proof that [`remap`] ran. IRQ gates may only be loaded while holding one.
#[derive(Debug)]
pub struct Remapped {
    _private: (),
}

/// Runs the ICW1-ICW4 initialization on both controllers, then loads `masks`.
///
/// Write order is fixed: each step goes to the master first, then the slave.
pub fn remap<P: PortWriter>(ports: &mut P, masks: PicMasks) -> Remapped {
    for pic in [Pic::Master, Pic::Slave] {
        ports.write_u8(pic.command_port(), ICW1_INIT);
    }
    for pic in [Pic::Master, Pic::Slave] {
        ports.write_u8(pic.data_port(), pic.offset());
    }
    for pic in [Pic::Master, Pic::Slave] {
        ports.write_u8(pic.data_port(), pic.cascade_word());
    }
    for pic in [Pic::Master, Pic::Slave] {
        ports.write_u8(pic.data_port(), ICW4_8086);
    }
    for pic in [Pic::Master, Pic::Slave] {
        ports.write_u8(pic.data_port(), masks.for_pic(pic));
    }
    Remapped { _private: () }
}

static REMAPPED: AtomicBool = AtomicBool::new(false);

/// [`remap`] against the real controllers, at most once per boot.
///
/// # Safety
///
/// Must run at ring 0 with interrupts disabled.
pub unsafe fn remap_once(masks: PicMasks) -> Option<Remapped> {
    if REMAPPED.swap(true, Ordering::SeqCst) {
        crate::log_warn!("pic", "remap requested twice, ignoring");
        return None;
    }
    let mut ports = super::port::HardwarePorts::new();
    crate::log_info!(
        "pic",
        "remapping to {}/{} (masks {:#04x}/{:#04x})",
        PIC_1_OFFSET,
        PIC_2_OFFSET,
        masks.master,
        masks.slave
    );
    Some(remap(&mut ports, masks))
}

/// End-of-interrupt for `vector`: slave first when it came through the slave,
/// then always the master, which saw it on IR2 either way.
pub fn acknowledge<P: PortWriter>(ports: &mut P, vector: IrqVector) {
    if vector.is_slave() {
        ports.write_u8(Pic::Slave.command_port(), CMD_END_OF_INTERRUPT);
    }
    ports.write_u8(Pic::Master.command_port(), CMD_END_OF_INTERRUPT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::interrupts::port::RecordingPorts;

    #[test]
    fn remap_write_sequence() {
        let mut ports = RecordingPorts::new();
        remap(&mut ports, PicMasks { master: 0xFC, slave: 0xFF });
        assert_eq!(
            ports.writes,
            [
                (0x20, 0x11),
                (0xA0, 0x11),
                (0x21, 0x20),
                (0xA1, 0x28),
                (0x21, 0x04),
                (0xA1, 0x02),
                (0x21, 0x01),
                (0xA1, 0x01),
                (0x21, 0xFC),
                (0xA1, 0xFF),
            ]
        );
    }

    #[test]
    fn remap_uses_configured_masks() {
        let mut ports = RecordingPorts::new();
        remap(&mut ports, PicMasks { master: 0x12, slave: 0x34 });
        let tail = &ports.writes[ports.writes.len() - 2..];
        assert_eq!(tail, [(0x21, 0x12), (0xA1, 0x34)]);
    }

    #[test]
    fn slave_eoi_precedes_master() {
        for v in 40..48 {
            let mut ports = RecordingPorts::new();
            acknowledge(&mut ports, IrqVector::new(v).unwrap());
            assert_eq!(ports.writes, [(0xA0, 0x20), (0x20, 0x20)], "vector {}", v);
        }
    }

    #[test]
    fn master_only_eoi() {
        for v in 32..40 {
            let mut ports = RecordingPorts::new();
            acknowledge(&mut ports, IrqVector::new(v).unwrap());
            assert_eq!(ports.writes, [(0x20, 0x20)], "vector {}", v);
            assert!(ports.to_port(0xA0).is_empty());
        }
    }

    #[test]
    fn unmasking_opens_cascade_for_slave_lines() {
        let masks = PicMasks::unmasking(&[IrqLine::new(12).unwrap()]);
        assert_eq!(masks, PicMasks { master: 0xFB, slave: 0xEF });
        assert_eq!(PicMasks::unmasking(&[]), PicMasks::ALL_MASKED);
    }

    #[test]
    fn boot_masks_open_timer_and_keyboard() {
        assert_eq!(PicMasks::BOOT, PicMasks { master: 0xFC, slave: 0xFF });
    }
}
