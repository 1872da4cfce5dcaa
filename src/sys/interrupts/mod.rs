//! # Interrupt Handling Module
//!
//! Legacy 8259 interrupt path for the kernel:
//!
//! - **GDT**: Global Descriptor Table with TSS for the double-fault stack
//! - **PIC**: remap of IRQ 0-15 onto vectors 32-47, EOI protocol
//! - **IDT**: exception handlers plus one gate per IRQ stub
//! - **IRQ table**: 16 registration slots drivers install handlers into
//! - **Dispatch**: acknowledge, then run the slot's handler
//!
//! ## Interrupt Vector Layout
//!
//! | Vector | Type                   | Handler                    |
//! |--------|------------------------|----------------------------|
//! | 0-31   | CPU Exceptions         | divide, page fault, etc.   |
//! | 32-47  | IRQ 0-15               | `irq0`..`irq15` → dispatch |
//!
//! ## Usage
//!
//! ```ignore
//! use kernel::sys::interrupts;
//! interrupts::init(PicMasks::BOOT)?; // GDT, PIC remap, IDT
//! interrupts::irq::install(IrqLine::TIMER, handler);
//! x86_64::instructions::interrupts::enable();
//! ```

pub mod context;
pub mod diagnostics;
pub mod dispatch;
pub mod gdt;
pub mod idt;
pub mod irq;
pub mod pic;
pub mod port;
mod stubs;
pub mod timer;

use pic::PicMasks;

/// GDT, then the PIC remap, then the IDT. Interrupts stay disabled; enabling
/// them is the caller's last step once handlers are registered.
pub fn init(masks: PicMasks) -> Result<(), &'static str> {
    gdt::init();
    let remapped = unsafe { pic::remap_once(masks) }.ok_or("PIC already remapped")?;
    idt::init(&remapped);
    Ok(())
}

pub fn enable() {
    x86_64::instructions::interrupts::enable();
}
