//! # PIC Kernel Library
//!
//! Everything the kernel binary needs to bring up the legacy 8259 interrupt
//! path: serial logging, boot configuration, the GDT/IDT, the PIC remapper and
//! the IRQ dispatch table.
//!
//! The crate is `no_std` on the target. Unit tests run on the host, where the
//! hardware ports are replaced by a recording double.

#![cfg_attr(not(test), no_std)]
#![feature(abi_x86_interrupt)]

pub mod config;
pub mod devices;
pub mod log;
pub mod sys;

use spin::Mutex;
use uart_16550::SerialPort;

pub static SERIAL: Mutex<SerialPort> =
    Mutex::new(unsafe { SerialPort::new(config::SERIAL_BASE) });

#[doc(hidden)]
pub fn _print(args: ::core::fmt::Arguments) {
    use ::core::fmt::Write;

    // Interrupt context prints too; never spin on a lock the interrupted code holds.
    x86_64::instructions::interrupts::without_interrupts(|| {
        let _ = SERIAL.lock().write_fmt(args);
    });
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::_print(core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => {
        $crate::_print(core::format_args!("{}\n", core::format_args!($($arg)*)))
    };
}

/// Park the CPU until the next interrupt, forever.
pub fn hlt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}
