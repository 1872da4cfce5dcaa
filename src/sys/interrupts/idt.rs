//! # Interrupt Descriptor Table
//!
//! ## Exception Handlers
//!
//! | Exception              | Action                              |
//! |------------------------|-------------------------------------|
//! | Breakpoint (#BP)       | Log the frame, continue             |
//! | Page Fault (#PF)       | Diagnostic output, then panic       |
//! | Divide Error (#DE)     | Panic                               |
//! | Invalid Opcode (#UD)   | Panic                               |
//! | General Protection     | Panic with error code               |
//! | Double Fault (#DF)     | Panic (uses IST stack)              |
//!
//! ## Hardware Interrupts
//!
//! Vectors 32-47 point at the `irq0`..`irq15` stubs. Each gate is a present,
//! ring 0 interrupt gate on the kernel code selector (`0x8E`), so IF is clear
//! for the whole dispatch.

use spin::Once;
use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame, PageFaultErrorCode};

use super::gdt;
use super::irq::IrqLine;
use super::pic::Remapped;
use super::stubs::IRQ_STUBS;

static IDT: Once<InterruptDescriptorTable> = Once::new();

fn build() -> InterruptDescriptorTable {
    let mut idt = InterruptDescriptorTable::new();

    // CPU EXCEPTIONS (0-31)
    idt.breakpoint.set_handler_fn(breakpoint_handler);
    idt.page_fault.set_handler_fn(page_fault_handler);
    idt.divide_error.set_handler_fn(divide_error_handler);
    idt.invalid_opcode.set_handler_fn(invalid_opcode_handler);
    idt.general_protection_fault.set_handler_fn(general_protection_fault_handler);
    unsafe {
        idt.double_fault
            .set_handler_fn(double_fault_handler)
            .set_stack_index(gdt::DOUBLE_FAULT_IST_INDEX);
    }

    // HARDWARE INTERRUPTS (32-47 after remapping)
    for line in IrqLine::ALL {
        idt[line.vector().as_u8()].set_handler_fn(IRQ_STUBS[line.index()]);
    }

    idt
}

/// Loads the IDT. Taking `Remapped` keeps the IRQ gates from going live while
/// the PICs still deliver on the exception vectors.
pub fn init(_remapped: &Remapped) {
    IDT.call_once(build).load();
    crate::log_info!(
        "idt",
        "gates {}-{} installed on selector {:#x}",
        IrqLine::ALL[0].vector().as_u8(),
        IrqLine::ALL[15].vector().as_u8(),
        gdt::kernel_code_selector().0
    );
}

extern "x86-interrupt" fn breakpoint_handler(stack_frame: InterruptStackFrame) {
    crate::log_warn!("idt", "EXCEPTION: BREAKPOINT\n{:#?}", stack_frame);
}

extern "x86-interrupt" fn divide_error_handler(stack_frame: InterruptStackFrame) {
    panic!("EXCEPTION: DIVIDE BY ZERO\n{:#?}", stack_frame);
}

extern "x86-interrupt" fn invalid_opcode_handler(stack_frame: InterruptStackFrame) {
    panic!("EXCEPTION: INVALID OPCODE\n{:#?}", stack_frame);
}

extern "x86-interrupt" fn general_protection_fault_handler(stack_frame: InterruptStackFrame, error_code: u64) {
    panic!("EXCEPTION: GENERAL PROTECTION FAULT (error code: {})\n{:#?}", error_code, stack_frame);
}

// An IRQ landing here usually means the PICs were never remapped.
extern "x86-interrupt" fn double_fault_handler(stack_frame: InterruptStackFrame, error_code: u64) -> ! {
    panic!("EXCEPTION: DOUBLE FAULT\n{stack_frame:#?}\n CODE{error_code}");
}

extern "x86-interrupt" fn page_fault_handler(stack_frame: InterruptStackFrame, error_code: PageFaultErrorCode) {
    use x86_64::registers::control::Cr2;

    crate::log_error!("idt", "EXCEPTION: PAGE FAULT");
    match Cr2::read() {
        Ok(addr) => crate::log_error!("idt", "Accessed Address: {:?}", addr),
        Err(e) => crate::log_error!("idt", "Failed to read CR2: {:?}", e),
    }
    crate::log_error!("idt", "Error Code: {:?}", error_code);
    panic!("Page fault!\n{:#?}", stack_frame);
}
