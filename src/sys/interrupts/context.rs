//! Saved CPU state handed to IRQ handlers.

use x86_64::registers::rflags::RFlags;
use x86_64::structures::idt::InterruptStackFrameValue;
use x86_64::VirtAddr;

use super::irq::IrqVector;

/// Snapshot of the hardware interrupt frame plus the vector that raised it.
///
/// Built by a trap stub on its own stack and lent to the dispatcher for the
/// duration of one interrupt. Changes to `instruction_pointer`, `cpu_flags`
/// or `stack_pointer` are written back to the frame before `iretq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptContext {
    pub vector: IrqVector,
    pub instruction_pointer: u64,
    pub code_segment: u16,
    pub cpu_flags: u64,
    pub stack_pointer: u64,
    pub stack_segment: u16,
}

impl InterruptContext {
    pub const fn new(vector: IrqVector) -> Self {
        Self {
            vector,
            instruction_pointer: 0,
            code_segment: 0,
            cpu_flags: 0,
            stack_pointer: 0,
            stack_segment: 0,
        }
    }

    pub fn from_frame(vector: IrqVector, frame: &InterruptStackFrameValue) -> Self {
        Self {
            vector,
            instruction_pointer: frame.instruction_pointer.as_u64(),
            code_segment: frame.code_segment.0,
            cpu_flags: frame.cpu_flags.bits(),
            stack_pointer: frame.stack_pointer.as_u64(),
            stack_segment: frame.stack_segment.0,
        }
    }

    /// Whether any field that is written back differs from `saved`.
    pub fn resumes_differently(&self, saved: &Self) -> bool {
        self.instruction_pointer != saved.instruction_pointer
            || self.cpu_flags != saved.cpu_flags
            || self.stack_pointer != saved.stack_pointer
    }

    /// Segments are left alone; a handler has no business switching privilege.
    pub fn apply_to(&self, frame: &mut InterruptStackFrameValue) {
        frame.instruction_pointer = VirtAddr::new_truncate(self.instruction_pointer);
        frame.cpu_flags = RFlags::from_bits_truncate(self.cpu_flags);
        frame.stack_pointer = VirtAddr::new_truncate(self.stack_pointer);
    }
}
