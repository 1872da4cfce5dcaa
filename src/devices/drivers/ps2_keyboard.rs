//! PS/2 keyboard on IRQ1.
//!
//! The interrupt handler only pulls the scancode off port 0x60 and queues it;
//! decoding happens in the idle loop. The queue is single-producer (IRQ1) /
//! single-consumer (kernel main loop) and lock-free, so the handler can never
//! block on it.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use x86_64::instructions::port::Port;

use crate::sys::interrupts::context::InterruptContext;
use crate::sys::interrupts::irq::{self, IrqLine};

const DATA_PORT: u16 = 0x60;
const BUFFER_SIZE: usize = 256;

pub struct ScancodeQueue {
    buf: [AtomicU8; BUFFER_SIZE],
    head: AtomicUsize,
    tail: AtomicUsize,
}

impl ScancodeQueue {
    pub const fn new() -> Self {
        Self {
            buf: [const { AtomicU8::new(0) }; BUFFER_SIZE],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Drops the scancode when full.
    pub fn push(&self, scancode: u8) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) % BUFFER_SIZE;
        if next == self.tail.load(Ordering::Acquire) {
            return false;
        }
        self.buf[head].store(scancode, Ordering::Relaxed);
        self.head.store(next, Ordering::Release);
        true
    }

    pub fn pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }
        let scancode = self.buf[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) % BUFFER_SIZE, Ordering::Release);
        Some(scancode)
    }
}

static SCANCODES: ScancodeQueue = ScancodeQueue::new();

pub fn keyboard_interrupt(_ctx: &mut InterruptContext) {
    let scancode: u8 = unsafe { Port::new(DATA_PORT).read() };
    SCANCODES.push(scancode);
}

pub fn dequeue_scancode() -> Option<u8> {
    SCANCODES.pop()
}

pub fn init() {
    irq::install(IrqLine::KEYBOARD, keyboard_interrupt);
}
