//! # Walker motion library
//!
//! Motion core of a four legged walking robot. Gait tables are compiled into
//! timed frames of joint angles, which are played back onto the leg
//! actuators.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Frame scheduler - plays compiled schedules back onto the legs
pub mod frame_sched;

/// Gait compiler - compiles gait tables into stride cycles
pub mod gait_cmp;

/// Kinematics - inverse kinematics of the legs
pub mod kin;

/// Leg registry - the legs, their joints and topology
pub mod leg_reg;

/// Servo control - joint actuators
pub mod servo_ctrl;

/// Trajectory generation - linear and elliptical foot paths
pub mod traj;

/// Walk control - public walker operations
pub mod walk_ctrl;

#[cfg(test)]
mod test_support;
