//! Byte-wide port output, the only way the interrupt subsystem touches hardware.
//!
//! Keeping the PIC protocol behind [`PortWriter`] lets the remap and EOI
//! sequences be checked write-for-write on the host.

use x86_64::instructions::port::Port;

pub trait PortWriter {
    fn write_u8(&mut self, port: u16, value: u8);
}

/// Real `out` instructions.
pub struct HardwarePorts {
    _private: (),
}

impl HardwarePorts {
    /// # Safety
    ///
    /// The caller must be running at ring 0 and own the ports it will write:
    /// every write goes straight to the bus.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl PortWriter for HardwarePorts {
    fn write_u8(&mut self, port: u16, value: u8) {
        unsafe { Port::<u8>::new(port).write(value) }
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingPorts;

#[cfg(test)]
mod recording {
    use super::PortWriter;

    /// Test double that remembers every write in order.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPorts {
        pub writes: Vec<(u16, u8)>,
    }

    impl RecordingPorts {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn to_port(&self, port: u16) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(p, _)| *p == port)
                .map(|(_, v)| *v)
                .collect()
        }
    }

    impl PortWriter for RecordingPorts {
        fn write_u8(&mut self, port: u16, value: u8) {
            self.writes.push((port, value));
        }
    }
}
