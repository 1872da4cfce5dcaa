//! Which IRQ lines have a handler, for the boot log and the shell's `irq` dump.

use core::fmt;

use super::irq::{IrqLine, IRQ_LINES};

/// Set of occupied lines, one bit per IRQ. Iterates in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstalledLines(u16);

impl InstalledLines {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn with(self, line: IrqLine) -> Self {
        Self(self.0 | (1 << line.as_u8()))
    }

    pub const fn contains(&self, line: IrqLine) -> bool {
        self.0 & (1 << line.as_u8()) != 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = IrqLine> + '_ {
        IrqLine::ALL.into_iter().filter(move |line| self.contains(*line))
    }
}

impl fmt::Display for InstalledLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.iter() {
            write!(f, "irq {}\t", line.as_u8())?;
        }
        Ok(())
    }
}

const _: () = assert!(IRQ_LINES <= u16::BITS as usize);

/// Writes the occupied lines as a single newline-terminated row.
pub fn report_installed_lines<W: fmt::Write>(lines: InstalledLines, sink: &mut W) -> fmt::Result {
    writeln!(sink, "{}", lines)
}

/// Dump the live table to the serial console.
pub fn dump_irq_routines() {
    let lines = super::irq::installed_lines();
    crate::log_info!("irq", "{} line(s) with handlers", lines.len());
    crate::println!("{}", lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::interrupts::irq::InterruptVectorTable;
    use crate::sys::interrupts::context::InterruptContext;

    fn noop(_: &mut InterruptContext) {}

    #[test]
    fn renders_ascending_lines() {
        let mut table = InterruptVectorTable::new();
        for n in [12, 0, 1] {
            table.install(IrqLine::new(n).unwrap(), noop);
        }
        let mut out = String::new();
        report_installed_lines(table.installed_lines(), &mut out).unwrap();
        assert_eq!(out, "irq 0\tirq 1\tirq 12\t\n");
    }

    #[test]
    fn empty_table_renders_bare_newline() {
        let mut out = String::new();
        report_installed_lines(InterruptVectorTable::new().installed_lines(), &mut out).unwrap();
        assert_eq!(out, "\n");
    }

    #[test]
    fn set_operations() {
        let set = InstalledLines::empty().with(IrqLine::CASCADE).with(IrqLine::TIMER);
        assert_eq!(set.len(), 2);
        assert!(set.contains(IrqLine::CASCADE));
        assert!(!set.contains(IrqLine::KEYBOARD));
    }
}
