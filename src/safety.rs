//! Fault supervisor.
//!
//! Runs **every cycle after the actuation policy** and escalates persistent
//! TDS sensor failure.  The policy already holds both pumps OFF on a single
//! unknown-TDS cycle; the supervisor adds the missing escalation path: after
//! N consecutive unknown cycles it forces *every* actuator OFF (grow light
//! included) and keeps them off until a valid TDS reading returns.
//!
//! ## Fault lifecycle
//!
//! 1. TDS comes back NaN — the streak counter increments.
//! 2. Streak reaches the configured limit — the supervisor latches, logs an
//!    error, and overrides the command with [`ActuatorCommand::OFF`].
//! 3. Any valid TDS reading clears the streak and the latch.
//!
//! A limit of 0 disables the shutdown entirely.

use log::{error, info};

use crate::conditioning::PhysicalReading;
use crate::config::SystemConfig;
use crate::policy::ActuatorCommand;

/// Escalates persistent unknown-TDS readings to a full actuator shutdown.
pub struct FaultSupervisor {
    /// Consecutive unknown-TDS cycles before shutdown; 0 disables.
    shutdown_after: u32,
    unknown_streak: u32,
    latched: bool,
}

impl FaultSupervisor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            shutdown_after: config.tds_fault_shutdown_cycles,
            unknown_streak: 0,
            latched: false,
        }
    }

    /// Track this cycle's reading and override the command if latched.
    pub fn apply(&mut self, reading: &PhysicalReading, command: ActuatorCommand) -> ActuatorCommand {
        if reading.tds_ppm.is_nan() {
            self.unknown_streak = self.unknown_streak.saturating_add(1);
            if self.shutdown_after > 0 && self.unknown_streak >= self.shutdown_after {
                if !self.latched {
                    error!(
                        "TDS unknown for {} consecutive cycles — forcing all actuators OFF",
                        self.unknown_streak
                    );
                }
                self.latched = true;
            }
        } else {
            if self.latched {
                info!("TDS reading recovered — releasing actuator shutdown");
            }
            self.unknown_streak = 0;
            self.latched = false;
        }

        if self.latched {
            ActuatorCommand::OFF
        } else {
            command
        }
    }

    /// Whether the shutdown latch is currently engaged.
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Current consecutive unknown-TDS cycle count.
    pub fn unknown_streak(&self) -> u32 {
        self.unknown_streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown_tds() -> PhysicalReading {
        PhysicalReading {
            air_temp_c: 25.0,
            humidity_pct: 60.0,
            water_temp_c: 22.0,
            ph: 6.5,
            tds_ppm: f32::NAN,
            light_raw: 1000,
        }
    }

    fn valid_tds() -> PhysicalReading {
        PhysicalReading {
            tds_ppm: 800.0,
            ..unknown_tds()
        }
    }

    fn light_on() -> ActuatorCommand {
        ActuatorCommand {
            clean_water_pump: false,
            nutrient_pump: false,
            grow_light: true,
        }
    }

    fn config_with_limit(cycles: u32) -> SystemConfig {
        SystemConfig {
            tds_fault_shutdown_cycles: cycles,
            ..SystemConfig::default()
        }
    }

    #[test]
    fn passes_commands_through_below_the_limit() {
        let mut sup = FaultSupervisor::new(&config_with_limit(3));
        for _ in 0..2 {
            let cmd = sup.apply(&unknown_tds(), light_on());
            assert!(cmd.grow_light);
            assert!(!sup.is_latched());
        }
    }

    #[test]
    fn latches_at_the_limit_and_forces_everything_off() {
        let mut sup = FaultSupervisor::new(&config_with_limit(3));
        sup.apply(&unknown_tds(), light_on());
        sup.apply(&unknown_tds(), light_on());
        let cmd = sup.apply(&unknown_tds(), light_on());
        assert_eq!(cmd, ActuatorCommand::OFF);
        assert!(sup.is_latched());

        // Stays latched while the fault persists.
        let cmd = sup.apply(&unknown_tds(), light_on());
        assert_eq!(cmd, ActuatorCommand::OFF);
    }

    #[test]
    fn valid_reading_clears_the_latch() {
        let mut sup = FaultSupervisor::new(&config_with_limit(2));
        sup.apply(&unknown_tds(), light_on());
        sup.apply(&unknown_tds(), light_on());
        assert!(sup.is_latched());

        let cmd = sup.apply(&valid_tds(), light_on());
        assert!(!sup.is_latched());
        assert!(cmd.grow_light);
        assert_eq!(sup.unknown_streak(), 0);
    }

    #[test]
    fn intermittent_faults_never_latch() {
        let mut sup = FaultSupervisor::new(&config_with_limit(3));
        for _ in 0..10 {
            sup.apply(&unknown_tds(), light_on());
            sup.apply(&unknown_tds(), light_on());
            let cmd = sup.apply(&valid_tds(), light_on());
            assert!(!sup.is_latched());
            assert!(cmd.grow_light);
        }
    }

    #[test]
    fn zero_limit_disables_the_shutdown() {
        let mut sup = FaultSupervisor::new(&config_with_limit(0));
        for _ in 0..100 {
            let cmd = sup.apply(&unknown_tds(), light_on());
            assert!(cmd.grow_light);
            assert!(!sup.is_latched());
        }
    }
}
