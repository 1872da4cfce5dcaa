//! IRQ0 tick counter.

use core::sync::atomic::{AtomicU64, Ordering};

use super::context::InterruptContext;
use super::irq::{self, IrqLine};

pub static TIMER_TICKS: AtomicU64 = AtomicU64::new(0);

pub fn tick(_ctx: &mut InterruptContext) {
    TIMER_TICKS.fetch_add(1, Ordering::Relaxed);
}

pub fn ticks() -> u64 {
    TIMER_TICKS.load(Ordering::Relaxed)
}

pub fn init() {
    irq::install(IrqLine::TIMER, tick);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_counter() {
        let before = ticks();
        tick(&mut InterruptContext::new(IrqLine::TIMER.vector()));
        assert!(ticks() > before);
    }
}
