//! Leveled logging over the serial console.
//!
//! Every record is rendered as `[LEVEL] origin: message` so boot traces from
//! different subsystems stay greppable on the host side of the UART.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO ",
            LogLevel::Warn => "WARN ",
            LogLevel::Error => "ERROR",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

pub fn set_level(level: LogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn level() -> LogLevel {
    LogLevel::from_u8(CURRENT_LEVEL.load(Ordering::Relaxed))
}

pub fn enabled(level: LogLevel) -> bool {
    level >= self::level()
}

/// Renders one record into `out`. Split from `_log` so the format is testable.
pub fn write_record<W: fmt::Write>(
    out: &mut W,
    level: LogLevel,
    origin: &str,
    args: fmt::Arguments,
) -> fmt::Result {
    writeln!(out, "[{}] {}: {}", level, origin, args)
}

#[doc(hidden)]
pub fn _log(level: LogLevel, origin: &str, args: fmt::Arguments) {
    if !enabled(level) {
        return;
    }
    x86_64::instructions::interrupts::without_interrupts(|| {
        let mut serial = crate::SERIAL.lock();
        let _ = write_record(&mut *serial, level, origin, args);
    });
}

#[macro_export]
macro_rules! log_debug {
    ($origin:expr, $($arg:tt)*) => {
        $crate::log::_log($crate::log::LogLevel::Debug, $origin, core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($origin:expr, $($arg:tt)*) => {
        $crate::log::_log($crate::log::LogLevel::Info, $origin, core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($origin:expr, $($arg:tt)*) => {
        $crate::log::_log($crate::log::LogLevel::Warn, $origin, core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($origin:expr, $($arg:tt)*) => {
        $crate::log::_log($crate::log::LogLevel::Error, $origin, core::format_args!($($arg)*))
    };
}
