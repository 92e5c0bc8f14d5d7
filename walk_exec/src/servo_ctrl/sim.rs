//! Simulated actuators

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{cell::RefCell, rc::Rc};

use log::trace;
use serde::Serialize;

use super::{Actuator, ServoDriver, ServoError};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of channels on the simulated board, matching a PCA9685.
const SIM_BOARD_NUM_CHANNELS: u8 = 16;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An angle sent to a simulated servo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServoCommand {
    pub pin: u8,

    /// Units: degrees
    pub angle_deg: f64,
}

/// Shared record of every command sent to a group of simulated servos.
pub type CommandLog = Rc<RefCell<Vec<ServoCommand>>>;

/// A servo which only logs the angles it is sent.
#[derive(Debug)]
pub struct SimServo {
    pin: u8,
    angle_deg: Option<f64>,
    log: Option<CommandLog>,
}

/// A simulated PWM driver board which stores the last duty cycle of each
/// channel.
#[derive(Debug, Default)]
pub struct SimBoard {
    duty_cycles: [Option<f64>; SIM_BOARD_NUM_CHANNELS as usize],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimServo {
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            angle_deg: None,
            log: None,
        }
    }

    /// Create a servo which also appends every command to `log`.
    pub fn with_log(pin: u8, log: CommandLog) -> Self {
        Self {
            pin,
            angle_deg: None,
            log: Some(log),
        }
    }

    /// The last commanded angle, if any.
    pub fn angle_deg(&self) -> Option<f64> {
        self.angle_deg
    }
}

impl Actuator for SimServo {
    fn set_angle(&mut self, angle_deg: f64) -> Result<(), ServoError> {
        if !angle_deg.is_finite() {
            return Err(ServoError::InvalidAngle(angle_deg));
        }

        trace!("Servo on pin {} -> {} deg", self.pin, angle_deg);

        self.angle_deg = Some(angle_deg);
        if let Some(ref log) = self.log {
            log.borrow_mut().push(ServoCommand {
                pin: self.pin,
                angle_deg,
            });
        }

        Ok(())
    }

    fn pin(&self) -> u8 {
        self.pin
    }
}

impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last duty cycle set on `channel`.
    pub fn duty_cycle(&self, channel: u8) -> Option<f64> {
        self.duty_cycles.get(channel as usize).copied().flatten()
    }
}

impl ServoDriver for SimBoard {
    fn set_duty_cycle(&mut self, channel: u8, duty_cycle: f64) -> Result<(), ServoError> {
        // If the duty cycle is out of range return an error
        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(ServoError::InvalidDutyCycle(duty_cycle));
        }

        match self.duty_cycles.get_mut(channel as usize) {
            Some(slot) => {
                trace!("Board channel {} duty cycle {:.4}", channel, duty_cycle);
                *slot = Some(duty_cycle);
                Ok(())
            }
            None => Err(ServoError::InvalidChannel(channel)),
        }
    }

    fn num_channels(&self) -> u8 {
        SIM_BOARD_NUM_CHANNELS
    }
}
