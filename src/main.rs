#![no_std]
#![no_main]

extern crate rlibc;

use bootloader_api::{entry_point, BootInfo};
use core::panic::PanicInfo;

use kernel::config::KernelConfig;
use kernel::devices::drivers::ps2_keyboard;
use kernel::sys::kernel::{init_kernel, status};
use kernel::sys::interrupts::timer;
use kernel::{hlt_loop, log_info, log_warn, println};

entry_point!(kernel_main);

pub fn kernel_main(_boot_info: &'static mut BootInfo) -> ! {
    let config = KernelConfig::default();

    if init_kernel(&config).is_err() {
        println!("Kernel initialization failed!");
        hlt_loop();
    }
    if !status::all_components_ready() {
        log_warn!("boot", "some components did not report ready");
    }

    loop {
        while let Some(scancode) = ps2_keyboard::dequeue_scancode() {
            log_info!("kbd", "scancode {:#04x} at tick {}", scancode, timer::ticks());
        }
        x86_64::instructions::hlt();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    x86_64::instructions::interrupts::disable();
    println!("PANIC : {} | {:?}", info.message(), info.location());
    hlt_loop()
}
