//! Device drivers that hang off the IRQ table.

pub mod drivers;
