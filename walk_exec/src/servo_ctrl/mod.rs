//! # Servo Controller Module
//!
//! Unified interface over the joint actuators. Each leg joint is driven by an
//! [`Actuator`] accepting an angle in degrees. Actuators may be simulated
//! ([`SimServo`]) or backed by a PWM [`ServoDriver`] board through a
//! [`DutyCycleServo`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod duty_cycle;
mod sim;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use duty_cycle::{DutyCycleServo, PulseParams};
pub use sim::{CommandLog, ServoCommand, SimBoard, SimServo};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A single joint actuator.
pub trait Actuator {
    /// Command the actuator to the given angle.
    ///
    /// Units: degrees
    fn set_angle(&mut self, angle_deg: f64) -> Result<(), ServoError>;

    /// The pin or channel the actuator is attached to, used in logs.
    fn pin(&self) -> u8;
}

/// Trait to provide a unified API for accessing servo driver boards.
pub trait ServoDriver {
    /// Set the duty cycle of a channel.
    ///
    /// ## Arguments
    /// - `channel` - The channel to set the duty cycle for
    /// - `duty_cycle` - The duty cycle to set. Must be a value between 0.0 and 1.0. Values outside
    ///   this range will be rejected.
    fn set_duty_cycle(&mut self, channel: u8, duty_cycle: f64) -> Result<(), ServoError>;

    /// Number of channels available on the board.
    fn num_channels(&self) -> u8;
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ServoError {
    #[error("Duty cycle must be between 0.0 and 1.0, got {0}")]
    InvalidDutyCycle(f64),

    #[error("Cannot command a non-finite angle ({0})")]
    InvalidAngle(f64),

    #[error("Channel {0} is not available on the driver board")]
    InvalidChannel(u8),

    #[error("The driver board reported a bus error: {0}")]
    Bus(String),
}
