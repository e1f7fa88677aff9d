//! Relay actuator driver.
//!
//! One boolean digital output per relay, re-driven unconditionally every
//! control cycle — writing the same level repeatedly is safe and expected.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

/// Driver for one actuator relay (pump or grow light).
pub struct RelayDriver {
    gpio: i32,
    on: bool,
}

impl RelayDriver {
    /// The GPIO must already be configured as an output and driven low
    /// by `hw_init::init_peripherals()`.
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    /// Drive the relay to the requested level.  Idempotent.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_commanded_level() {
        let mut relay = RelayDriver::new(19);
        assert!(!relay.is_on());
        relay.set(true);
        assert!(relay.is_on());
        relay.set(false);
        assert!(!relay.is_on());
    }

    #[test]
    fn repeated_writes_are_idempotent() {
        let mut relay = RelayDriver::new(5);
        for _ in 0..5 {
            relay.set(true);
            assert!(relay.is_on());
        }
    }
}
