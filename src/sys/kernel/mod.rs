//! # Kernel Initialization Module
//!
//! - `init`: boot sequence, one phase per subsystem
//! - `status`: per-component status tracking for the boot log

pub mod init;
pub mod status;

pub use init::init_kernel;
pub use status::{register_component, update_component_status, InitStatus};
