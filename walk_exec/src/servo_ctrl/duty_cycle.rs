//! Positional servo driven through a channel of a PWM [`ServoDriver`] board

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{cell::RefCell, rc::Rc};

use log::debug;
use serde::Deserialize;
use util::maths::{clamp, lin_map};

use super::{Actuator, ServoDriver, ServoError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pulse width characteristics of a positional servo.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    /// Pulse width at 0 degrees.
    ///
    /// Units: microseconds
    pub min_pulse_us: f64,

    /// Pulse width at `max_angle_deg`.
    ///
    /// Units: microseconds
    pub max_pulse_us: f64,

    /// PWM period, 50 Hz for most hobby servos.
    ///
    /// Units: microseconds
    pub period_us: f64,

    /// Units: degrees
    pub max_angle_deg: f64,
}

/// A servo on one channel of a (possibly shared) driver board.
pub struct DutyCycleServo<D: ServoDriver> {
    board: Rc<RefCell<D>>,
    channel: u8,
    pulse: PulseParams,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            min_pulse_us: 544.0,
            max_pulse_us: 2400.0,
            period_us: 20_000.0,
            max_angle_deg: 180.0,
        }
    }
}

impl<D: ServoDriver> DutyCycleServo<D> {
    pub fn new(board: Rc<RefCell<D>>, channel: u8, pulse: PulseParams) -> Result<Self, ServoError> {
        if channel >= board.borrow().num_channels() {
            return Err(ServoError::InvalidChannel(channel));
        }

        Ok(Self {
            board,
            channel,
            pulse,
        })
    }

    /// Duty cycle which positions the servo at `angle_deg`.
    ///
    /// Angles outside of the servo's travel are saturated.
    fn duty_cycle(&self, angle_deg: f64) -> f64 {
        let angle_deg = clamp(angle_deg, 0.0, self.pulse.max_angle_deg);
        let pulse_us = lin_map(
            (0.0, self.pulse.max_angle_deg),
            (self.pulse.min_pulse_us, self.pulse.max_pulse_us),
            angle_deg,
        );

        pulse_us / self.pulse.period_us
    }
}

impl<D: ServoDriver> Actuator for DutyCycleServo<D> {
    fn set_angle(&mut self, angle_deg: f64) -> Result<(), ServoError> {
        if !angle_deg.is_finite() {
            return Err(ServoError::InvalidAngle(angle_deg));
        }

        if angle_deg < 0.0 || angle_deg > self.pulse.max_angle_deg {
            debug!(
                "Channel {}: {} deg is outside of the servo travel, saturating",
                self.channel, angle_deg
            );
        }

        let duty_cycle = self.duty_cycle(angle_deg);
        self.board.borrow_mut().set_duty_cycle(self.channel, duty_cycle)
    }

    fn pin(&self) -> u8 {
        self.channel
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::servo_ctrl::SimBoard;

    #[test]
    fn test_angle_to_duty_cycle() {
        let board = Rc::new(RefCell::new(SimBoard::new()));
        let mut hip = DutyCycleServo::new(board.clone(), 0, PulseParams::default()).unwrap();
        let mut knee = DutyCycleServo::new(board.clone(), 1, PulseParams::default()).unwrap();

        hip.set_angle(0.0).unwrap();
        knee.set_angle(90.0).unwrap();

        let b = board.borrow();
        assert!((b.duty_cycle(0).unwrap() - 0.0272).abs() < 1e-9);
        assert!((b.duty_cycle(1).unwrap() - 0.0736).abs() < 1e-9);
    }

    #[test]
    fn test_saturation() {
        let board = Rc::new(RefCell::new(SimBoard::new()));
        let mut servo = DutyCycleServo::new(board.clone(), 4, PulseParams::default()).unwrap();

        servo.set_angle(184.0).unwrap();
        assert!((board.borrow().duty_cycle(4).unwrap() - 0.12).abs() < 1e-9);

        servo.set_angle(-6.0).unwrap();
        assert!((board.borrow().duty_cycle(4).unwrap() - 0.0272).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_channel() {
        let board = Rc::new(RefCell::new(SimBoard::new()));

        assert!(matches!(
            DutyCycleServo::new(board, 16, PulseParams::default()),
            Err(ServoError::InvalidChannel(16))
        ));
    }
}
