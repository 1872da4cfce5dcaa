//! # IRQ Dispatch Table
//!
//! Sixteen slots, one per 8259 input line. A slot is either empty or holds the
//! handler a driver registered for that line.
//!
//! ## Line / vector numbering
//!
//! | IRQ   | Vector | Controller |
//! |-------|--------|------------|
//! | 0-7   | 32-39  | master     |
//! | 8-15  | 40-47  | slave      |
//!
//! [`IrqLine`] and [`IrqVector`] can only hold values from those ranges, so
//! registration and dispatch never need a bounds check.
//!
//! ## Locking
//!
//! `IRQ_TABLE` is read from interrupt context. Every access from normal
//! context goes through the free functions below, which hold the lock with
//! interrupts masked; the dispatcher only copies a slot out and releases the
//! lock before calling the handler.

use spin::Mutex;
use x86_64::instructions::interrupts::without_interrupts;

use super::context::InterruptContext;
use super::diagnostics::InstalledLines;
use super::pic::{Pic, PIC_1_OFFSET, PIC_2_OFFSET};

pub const IRQ_LINES: usize = 16;

/// An 8259 input line, 0 through 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqLine(u8);

impl IrqLine {
    pub const TIMER: Self = Self(0);
    pub const KEYBOARD: Self = Self(1);
    /// Master input the slave controller is wired into.
    pub const CASCADE: Self = Self(2);

    pub const ALL: [Self; IRQ_LINES] = {
        let mut all = [Self(0); IRQ_LINES];
        let mut i = 0;
        while i < IRQ_LINES {
            all[i] = Self(i as u8);
            i += 1;
        }
        all
    };

    pub const fn new(line: u8) -> Option<Self> {
        if (line as usize) < IRQ_LINES {
            Some(Self(line))
        } else {
            None
        }
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn vector(self) -> IrqVector {
        IrqVector(self.0 + PIC_1_OFFSET)
    }

    pub const fn pic(self) -> Pic {
        if self.0 < 8 {
            Pic::Master
        } else {
            Pic::Slave
        }
    }

    /// Bit for this line inside its own controller's mask register.
    pub const fn mask_bit(self) -> u8 {
        1 << (self.0 % 8)
    }
}

/// IDT vector of a remapped IRQ, 32 through 47.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqVector(u8);

impl IrqVector {
    pub const fn new(vector: u8) -> Option<Self> {
        if vector >= PIC_1_OFFSET && vector < PIC_1_OFFSET + IRQ_LINES as u8 {
            Some(Self(vector))
        } else {
            None
        }
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn line(self) -> IrqLine {
        IrqLine(self.0 - PIC_1_OFFSET)
    }

    /// Raised through the slave, so both controllers need an EOI.
    pub const fn is_slave(self) -> bool {
        self.0 >= PIC_2_OFFSET
    }
}

pub type IrqHandler = fn(&mut InterruptContext);

#[derive(Debug, Clone, Copy)]
pub enum Slot {
    Empty,
    Handler(IrqHandler),
}

impl Slot {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub const fn handler(self) -> Option<IrqHandler> {
        match self {
            Slot::Empty => None,
            Slot::Handler(handler) => Some(handler),
        }
    }
}

#[derive(Debug)]
pub struct InterruptVectorTable {
    slots: [Slot; IRQ_LINES],
}

impl InterruptVectorTable {
    pub const fn new() -> Self {
        Self {
            slots: [Slot::Empty; IRQ_LINES],
        }
    }

    /// Last registration wins; a previous handler is dropped silently.
    pub fn install(&mut self, line: IrqLine, handler: IrqHandler) {
        self.slots[line.index()] = Slot::Handler(handler);
    }

    pub fn uninstall(&mut self, line: IrqLine) {
        self.slots[line.index()] = Slot::Empty;
    }

    pub fn slot(&self, line: IrqLine) -> Slot {
        self.slots[line.index()]
    }

    pub fn handler(&self, line: IrqLine) -> Option<IrqHandler> {
        self.slot(line).handler()
    }

    pub fn installed_lines(&self) -> InstalledLines {
        IrqLine::ALL
            .iter()
            .filter(|line| !self.slot(**line).is_empty())
            .fold(InstalledLines::empty(), |set, line| set.with(*line))
    }
}

impl Default for InterruptVectorTable {
    fn default() -> Self {
        Self::new()
    }
}

pub static IRQ_TABLE: Mutex<InterruptVectorTable> = Mutex::new(InterruptVectorTable::new());

pub fn install(line: IrqLine, handler: IrqHandler) {
    without_interrupts(|| IRQ_TABLE.lock().install(line, handler));
}

pub fn uninstall(line: IrqLine) {
    without_interrupts(|| IRQ_TABLE.lock().uninstall(line));
}

pub fn installed_lines() -> InstalledLines {
    without_interrupts(|| IRQ_TABLE.lock().installed_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::sync::atomic::{AtomicUsize, Ordering};

    static FIRST: AtomicUsize = AtomicUsize::new(0);
    static SECOND: AtomicUsize = AtomicUsize::new(0);

    fn noop(_: &mut InterruptContext) {}
    fn first(_: &mut InterruptContext) {
        FIRST.fetch_add(1, Ordering::SeqCst);
    }
    fn second(_: &mut InterruptContext) {
        SECOND.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn line_and_vector_ranges() {
        assert_eq!(IrqLine::new(15).map(IrqLine::as_u8), Some(15));
        assert!(IrqLine::new(16).is_none());
        assert!(IrqVector::new(31).is_none());
        assert!(IrqVector::new(48).is_none());
        assert_eq!(IrqVector::new(47).map(|v| v.line()), IrqLine::new(15));
        for line in IrqLine::ALL {
            assert_eq!(line.vector().as_u8(), line.as_u8() + 32);
            assert_eq!(line.vector().line(), line);
            assert_eq!(line.vector().is_slave(), line.pic() == Pic::Slave);
        }
    }

    #[test]
    fn starts_empty() {
        let table = InterruptVectorTable::new();
        assert!(table.installed_lines().is_empty());
        assert!(IrqLine::ALL.iter().all(|l| table.slot(*l).is_empty()));
    }

    #[test]
    fn install_overwrites() {
        let mut table = InterruptVectorTable::new();
        table.install(IrqLine::TIMER, first);
        table.install(IrqLine::TIMER, second);
        let handler = table.handler(IrqLine::TIMER).unwrap();
        handler(&mut InterruptContext::new(IrqLine::TIMER.vector()));
        assert_eq!(FIRST.load(Ordering::SeqCst), 0);
        assert_eq!(SECOND.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn uninstall_is_idempotent() {
        let mut table = InterruptVectorTable::new();
        let line = IrqLine::new(7).unwrap();
        table.install(line, noop);
        table.uninstall(line);
        let once = table.installed_lines();
        table.uninstall(line);
        assert_eq!(table.installed_lines(), once);
        assert!(table.slot(line).is_empty());
    }

    #[test]
    fn installed_lines_ascending() {
        let mut table = InterruptVectorTable::new();
        for n in [9, 2, 5] {
            table.install(IrqLine::new(n).unwrap(), noop);
        }
        table.uninstall(IrqLine::new(5).unwrap());
        let lines: Vec<u8> = table.installed_lines().iter().map(IrqLine::as_u8).collect();
        assert_eq!(lines, [2, 9]);
    }
}
