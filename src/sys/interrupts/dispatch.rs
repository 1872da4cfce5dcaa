//! Common path for every hardware IRQ: acknowledge, look up, invoke.

use core::fmt;

use spin::Mutex;

use super::context::InterruptContext;
use super::irq::{InterruptVectorTable, IRQ_TABLE};
use super::pic;
use super::port::{HardwarePorts, PortWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    Unhandled,
}

/// Acknowledges the controller(s) for `ctx.vector`, then runs the registered
/// handler. The EOI goes out before the handler so a driver that kicks its
/// device again is not racing an unacknowledged PIC.
///
/// A line with no handler is reported on `sink` and otherwise ignored.
pub fn dispatch<P, W>(
    table: &Mutex<InterruptVectorTable>,
    ports: &mut P,
    sink: &mut W,
    ctx: &mut InterruptContext,
) -> Outcome
where
    P: PortWriter,
    W: fmt::Write,
{
    let line = ctx.vector.line();

    pic::acknowledge(ports, ctx.vector);

    // Copy the slot out so the handler runs without the table locked.
    let handler = table.lock().handler(line);
    match handler {
        Some(handler) => {
            handler(ctx);
            Outcome::Handled
        }
        None => {
            let _ = writeln!(sink, "no handler installed for IRQ {}", line.as_u8());
            Outcome::Unhandled
        }
    }
}

/// Serial console as a diagnostic sink.
pub struct ConsoleSink;

impl fmt::Write for ConsoleSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        crate::print!("{}", s);
        Ok(())
    }
}

/// Entry from the trap stubs. Runs with interrupts disabled by the gate.
pub fn handle_interrupt(ctx: &mut InterruptContext) -> Outcome {
    let mut ports = unsafe { HardwarePorts::new() };
    dispatch(&IRQ_TABLE, &mut ports, &mut ConsoleSink, ctx)
}
