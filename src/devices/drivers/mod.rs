//! # Drivers
//!
//! | Driver         | IRQ | Data port |
//! |----------------|-----|-----------|
//! | `ps2_keyboard` | 1   | 0x60      |

pub mod ps2_keyboard;
