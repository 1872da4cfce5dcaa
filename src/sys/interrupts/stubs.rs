//! The sixteen IRQ entry points, `irq0` through `irq15`.
//!
//! Each one is an `x86-interrupt` function: the compiler saves and restores the
//! scratch registers, the CPU pushes the frame, and `iretq` resumes. All the
//! stub itself does is lift the frame into an [`InterruptContext`] tagged with
//! its fixed vector and pass it to the dispatcher.

use x86_64::structures::idt::{HandlerFunc, InterruptStackFrame};

use super::context::InterruptContext;
use super::dispatch::handle_interrupt;
use super::irq::{IrqLine, IrqVector, IRQ_LINES};

fn trap_entry(vector: IrqVector, frame: &mut InterruptStackFrame) {
    let saved = InterruptContext::from_frame(vector, frame);
    let mut ctx = saved;

    handle_interrupt(&mut ctx);

    if ctx.resumes_differently(&saved) {
        unsafe {
            frame.as_mut().update(|value| ctx.apply_to(value));
        }
    }
}

macro_rules! irq_stubs {
    ($($name:ident => $line:literal),* $(,)?) => {
        $(
            extern "x86-interrupt" fn $name(mut frame: InterruptStackFrame) {
                trap_entry(IrqLine::ALL[$line].vector(), &mut frame);
            }
        )*

        /// Entry points indexed by IRQ line.
        pub static IRQ_STUBS: [HandlerFunc; IRQ_LINES] = [$($name),*];
    };
}

irq_stubs! {
    irq0 => 0,
    irq1 => 1,
    irq2 => 2,
    irq3 => 3,
    irq4 => 4,
    irq5 => 5,
    irq6 => 6,
    irq7 => 7,
    irq8 => 8,
    irq9 => 9,
    irq10 => 10,
    irq11 => 11,
    irq12 => 12,
    irq13 => 13,
    irq14 => 14,
    irq15 => 15,
}
