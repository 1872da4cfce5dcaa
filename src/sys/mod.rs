//! # Core Kernel Module
//!
//! Fundamental kernel infrastructure: the interrupt subsystem and the boot
//! sequence that brings it up.
//!
//! ## Submodules
//!
//! - `interrupts`: GDT, IDT, PIC remap, IRQ dispatch table, trap stubs
//! - `kernel`: boot phases and component status tracking
//!
//! ## Initialization Order
//!
//! 1. GDT (Global Descriptor Table) - segments and TSS
//! 2. PIC remap - IRQ 0-15 moved onto vectors 32-47
//! 3. IDT (Interrupt Descriptor Table) - exceptions plus the 16 IRQ gates
//! 4. Handler registration, then `sti`

pub mod interrupts;
pub mod kernel;
