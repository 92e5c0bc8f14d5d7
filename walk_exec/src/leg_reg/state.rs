//! Leg registry state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{trace, warn};

use super::{JointKind, JointParams, LegId, LegParams, LegRegError, NUM_LEGS};
use crate::{
    kin::AnglePair,
    servo_ctrl::{Actuator, ServoError},
    traj::Point,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Angle commanded to every joint when calibrating, before the offset.
///
/// Units: degrees
pub const CALIBRATION_ANGLE_DEG: f64 = 90.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A joint bound to its actuator.
pub struct Joint {
    actuator: Box<dyn Actuator>,
    offset_deg: f64,
    invert: bool,
}

/// A leg and its two joints.
pub struct Leg {
    pub id: LegId,
    pub label: String,
    pub origin: Point,
    hip: Joint,
    knee: Joint,
}

/// The four legs of the robot, in the fixed leg order.
pub struct LegRegistry {
    legs: Vec<Leg>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Joint {
    pub fn new(actuator: Box<dyn Actuator>, params: &JointParams) -> Self {
        Self {
            actuator,
            offset_deg: params.offset_deg,
            invert: params.invert,
        }
    }

    /// The angle actually sent to the actuator for a solved joint angle.
    pub fn commanded_angle(&self, angle_deg: f64) -> f64 {
        let angle_deg = if self.invert {
            180.0 - angle_deg
        } else {
            angle_deg
        };

        angle_deg + self.offset_deg
    }

    /// Command the joint, returning the angle sent to the actuator.
    pub fn set_angle(&mut self, angle_deg: f64) -> Result<f64, ServoError> {
        let commanded_deg = self.commanded_angle(angle_deg);
        self.actuator.set_angle(commanded_deg)?;
        Ok(commanded_deg)
    }

    pub fn pin(&self) -> u8 {
        self.actuator.pin()
    }
}

impl Leg {
    /// Command both joints.
    ///
    /// Actuator commands are fire-and-forget: a failing joint is reported and
    /// does not stop the other joint being commanded.
    pub fn apply(&mut self, angles: AnglePair) {
        trace!("{} -> {}", self.id, angles);

        let id = self.id;
        for &(kind, angle_deg) in [
            (JointKind::Hip, angles.hip_deg),
            (JointKind::Knee, angles.knee_deg),
        ]
        .iter()
        {
            let joint = match kind {
                JointKind::Hip => &mut self.hip,
                JointKind::Knee => &mut self.knee,
            };

            if let Err(e) = joint.set_angle(angle_deg as f64) {
                warn!(
                    "Failed to command the {} {} joint (pin {}): {}",
                    id,
                    kind,
                    joint.pin(),
                    e
                );
            }
        }
    }

    /// Drive both joints to their zero-reference angle.
    pub fn calibrate(&mut self) {
        let angle = CALIBRATION_ANGLE_DEG as i32;
        self.apply(AnglePair::new(angle, angle));
    }
}

impl LegRegistry {
    /// Build the registry from the leg definitions.
    ///
    /// Exactly one definition per leg identity must be given. `make_actuator`
    /// is called once per joint to create the actuator bound to it.
    pub fn new<F>(params: &[LegParams], mut make_actuator: F) -> Result<Self, LegRegError>
    where
        F: FnMut(LegId, JointKind, &JointParams) -> Result<Box<dyn Actuator>, ServoError>,
    {
        let mut slots: [Option<Leg>; NUM_LEGS] = [None, None, None, None];

        for leg_params in params {
            let id = leg_params.id;

            if slots[id.index()].is_some() {
                return Err(LegRegError::DuplicateLeg(id));
            }

            let mut joint = |kind, joint_params: &JointParams| {
                make_actuator(id, kind, joint_params)
                    .map(|actuator| Joint::new(actuator, joint_params))
                    .map_err(|source| LegRegError::ActuatorInit {
                        leg: id,
                        joint: kind,
                        source,
                    })
            };

            let hip = joint(JointKind::Hip, &leg_params.hip)?;
            let knee = joint(JointKind::Knee, &leg_params.knee)?;

            slots[id.index()] = Some(Leg {
                id,
                label: leg_params.label.clone(),
                origin: leg_params.origin,
                hip,
                knee,
            });
        }

        let mut legs = Vec::with_capacity(NUM_LEGS);
        for (slot, id) in slots.iter_mut().zip(LegId::ALL.iter()) {
            legs.push(slot.take().ok_or(LegRegError::MissingLeg(*id))?);
        }

        Ok(Self { legs })
    }

    pub fn leg(&self, id: LegId) -> &Leg {
        &self.legs[id.index()]
    }

    pub fn leg_mut(&mut self, id: LegId) -> &mut Leg {
        &mut self.legs[id.index()]
    }

    pub fn label(&self, id: LegId) -> &str {
        &self.leg(id).label
    }

    /// Hip origins of all legs, in the fixed leg order.
    pub fn origins(&self) -> [Point; NUM_LEGS] {
        let mut origins = [Point::default(); NUM_LEGS];
        for leg in self.legs.iter() {
            origins[leg.id.index()] = leg.origin;
        }
        origins
    }

    /// Command every leg to its angle pair.
    pub fn apply_all(&mut self, angles: &[AnglePair; NUM_LEGS]) {
        for leg in self.legs.iter_mut() {
            leg.apply(angles[leg.id.index()]);
        }
    }

    pub fn calibrate_all(&mut self) {
        for leg in self.legs.iter_mut() {
            leg.calibrate();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::servo_ctrl::{CommandLog, SimServo};
    use crate::test_support::{reference_params, sim_registry};

    fn commanded(log: &CommandLog) -> Vec<(u8, f64)> {
        log.borrow().iter().map(|c| (c.pin, c.angle_deg)).collect()
    }

    #[test]
    fn test_commanded_angle() {
        let plain = Joint::new(
            Box::new(SimServo::new(0)),
            &JointParams { pin: 0, offset_deg: 2.0, invert: false },
        );
        let inverted = Joint::new(
            Box::new(SimServo::new(1)),
            &JointParams { pin: 1, offset_deg: -4.0, invert: true },
        );

        assert_eq!(plain.commanded_angle(68.0), 70.0);
        assert_eq!(inverted.commanded_angle(139.0), 37.0);
        assert_eq!(inverted.commanded_angle(90.0), 86.0);
    }

    #[test]
    fn test_apply_all() {
        let (mut registry, log) = sim_registry();
        let params = reference_params();

        let angles = [
            AnglePair::new(68, 137),
            AnglePair::new(72, 139),
            AnglePair::new(68, 137),
            AnglePair::new(62, 136),
        ];
        registry.apply_all(&angles);

        let sent = commanded(&log);
        assert_eq!(sent.len(), 2 * NUM_LEGS);

        // Commands go out in leg order, hip then knee
        for (i, leg) in params.legs.iter().enumerate() {
            let leg_angles = angles[leg.id.index()];
            let hip = &leg.hip;
            let knee = &leg.knee;
            let flip = |invert: bool, a: i32| if invert { 180.0 - a as f64 } else { a as f64 };

            assert!(sent.contains(&(hip.pin, flip(hip.invert, leg_angles.hip_deg) + hip.offset_deg)), "leg {}", i);
            assert!(sent.contains(&(knee.pin, flip(knee.invert, leg_angles.knee_deg) + knee.offset_deg)), "leg {}", i);
        }
    }

    #[test]
    fn test_calibrate() {
        let (mut registry, log) = sim_registry();
        let params = reference_params();

        registry.calibrate_all();

        let sent = commanded(&log);
        for leg in params.legs.iter() {
            assert!(sent.contains(&(leg.hip.pin, 90.0 + leg.hip.offset_deg)));
            assert!(sent.contains(&(leg.knee.pin, 90.0 + leg.knee.offset_deg)));
        }
    }

    #[test]
    fn test_failing_actuator_does_not_stop_leg() {
        struct Broken;
        impl Actuator for Broken {
            fn set_angle(&mut self, _: f64) -> Result<(), ServoError> {
                Err(ServoError::Bus("disconnected".into()))
            }
            fn pin(&self) -> u8 {
                99
            }
        }

        let log = CommandLog::default();
        let params = reference_params();
        let mut registry = LegRegistry::new(&params.legs, |_, kind, joint| {
            let actuator: Box<dyn Actuator> = match kind {
                JointKind::Hip => Box::new(Broken),
                JointKind::Knee => Box::new(SimServo::with_log(joint.pin, log.clone())),
            };
            Ok(actuator)
        })
        .unwrap();

        registry.leg_mut(LegId::FrontRight).apply(AnglePair::new(68, 137));

        let knee = params.legs[0].knee;
        assert_eq!(commanded(&log), vec![(knee.pin, 137.0 + knee.offset_deg)]);
    }

    #[test]
    fn test_definition_errors() {
        let params = reference_params();
        let make = |_: LegId, _: JointKind, j: &JointParams| -> Result<Box<dyn Actuator>, ServoError> {
            Ok(Box::new(SimServo::new(j.pin)))
        };

        let missing: Vec<_> = params.legs.iter().skip(1).cloned().collect();
        assert!(matches!(
            LegRegistry::new(&missing, make),
            Err(LegRegError::MissingLeg(LegId::FrontRight))
        ));

        let mut duplicated = params.legs.clone();
        duplicated.push(params.legs[2].clone());
        assert!(matches!(
            LegRegistry::new(&duplicated, make),
            Err(LegRegError::DuplicateLeg(LegId::BackRight))
        ));

        let failing = |_: LegId, _: JointKind, j: &JointParams| -> Result<Box<dyn Actuator>, ServoError> {
            Err(ServoError::InvalidChannel(j.pin))
        };
        assert!(matches!(
            LegRegistry::new(&params.legs, failing),
            Err(LegRegError::ActuatorInit { leg: LegId::FrontRight, joint: JointKind::Hip, .. })
        ));
    }

    #[test]
    fn test_origins() {
        let (registry, _) = sim_registry();

        let origins = registry.origins();
        assert_eq!(origins[LegId::FrontLeft.index()], Point::new(15.0, 0.0));
        assert_eq!(origins[LegId::BackLeft.index()], Point::new(0.0, 0.0));
        assert_eq!(registry.label(LegId::FrontRight), "Front right");
    }
}
