//! Boot sequence.

use crate::config::KernelConfig;
use crate::devices::drivers::ps2_keyboard;
use crate::sys::interrupts::{self, diagnostics, timer};
use crate::sys::kernel::status::{register_component, update_component_status, InitStatus};
use crate::{log, log_error, log_info};

const PHASES: [(&str, fn(&KernelConfig) -> Result<(), &'static str>); 3] = [
    ("Interrupt System", init_interrupts),
    ("Device Drivers", init_drivers),
    ("Interrupt Enable", enable_interrupts),
];

/// Bring the kernel up phase by phase; stops at the first failure.
pub fn init_kernel(config: &KernelConfig) -> Result<(), &'static str> {
    crate::SERIAL.lock().init();
    log::set_level(config.log_level);

    for (name, _) in PHASES {
        register_component(name);
    }
    log_info!("boot", "kernel initialization");

    for (index, (name, init_fn)) in PHASES.iter().enumerate() {
        init_phase(index + 1, *name, config, *init_fn)?;
    }

    diagnostics::dump_irq_routines();
    log_info!("boot", "kernel initialization complete");
    Ok(())
}

fn init_phase(
    index: usize,
    name: &'static str,
    config: &KernelConfig,
    init_fn: fn(&KernelConfig) -> Result<(), &'static str>,
) -> Result<(), &'static str> {
    update_component_status(name, InitStatus::InProgress);
    log_info!("boot", "[{}/{}] Initializing {}...", index, PHASES.len(), name);

    match init_fn(config) {
        Ok(()) => {
            update_component_status(name, InitStatus::Completed);
            log_info!("boot", "{} initialized successfully", name);
            Ok(())
        }
        Err(e) => {
            update_component_status(name, InitStatus::Failed(e));
            log_error!("boot", "{} failed: {}", name, e);
            Err(e)
        }
    }
}

fn init_interrupts(config: &KernelConfig) -> Result<(), &'static str> {
    interrupts::init(config.pic_masks)
}

// Every handler must be in the table before `sti`.
fn init_drivers(_config: &KernelConfig) -> Result<(), &'static str> {
    timer::init();
    ps2_keyboard::init();
    Ok(())
}

fn enable_interrupts(_config: &KernelConfig) -> Result<(), &'static str> {
    interrupts::enable();
    Ok(())
}
