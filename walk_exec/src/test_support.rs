//! Fixtures shared by the unit tests

use crate::{
    frame_sched::{Frame, FrameContext, PoseFrame},
    gait_cmp::GaitTable,
    kin::{AnglePair, LegSolver},
    leg_reg::{LegRegistry, NUM_LEGS},
    servo_ctrl::{Actuator, CommandLog, SimServo},
    traj::Point,
    walk_ctrl::Params,
};

/// The shipped walk control parameters.
pub(crate) fn reference_params() -> Params {
    util::params::parse(include_str!("../../params/walk_ctrl.toml"))
        .expect("Shipped walk_ctrl.toml does not parse")
}

pub(crate) fn trot_table() -> GaitTable {
    reference_params().gaits["forward"].clone()
}

pub(crate) fn reference_solver() -> LegSolver {
    let params = reference_params();
    let mut origins = [Point::default(); NUM_LEGS];
    for leg in params.legs.iter() {
        origins[leg.id.index()] = leg.origin;
    }

    LegSolver::new(params.geometry.femur, params.geometry.tibia, origins)
}

/// Registry of simulated servos, all logging to the returned log.
pub(crate) fn sim_registry() -> (LegRegistry, CommandLog) {
    let log = CommandLog::default();

    let registry = LegRegistry::new(&reference_params().legs, |_, _, joint| {
        let servo: Box<dyn Actuator> = Box::new(SimServo::with_log(joint.pin, log.clone()));
        Ok(servo)
    })
    .expect("Could not build the simulated registry");

    (registry, log)
}

/// `n` pose frames, frame `i` tagged as the stance of row `i`.
pub(crate) fn tagged_frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|row| {
            Frame::Pose(PoseFrame {
                angles: [AnglePair::new(90, 90); NUM_LEGS],
                points: [Point::default(); NUM_LEGS],
                context: FrameContext::Stance { row },
            })
        })
        .collect()
}
