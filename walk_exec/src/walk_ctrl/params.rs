//! Parameters structure for WalkCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;

use serde::Deserialize;

use super::WalkCtrlError;
use crate::{
    gait_cmp::{GaitTable, Geometry},
    leg_reg::{LegId, LegParams, NUM_LEGS},
    servo_ctrl::PulseParams,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for walk control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- TIMING ----

    /// Number of points per interpolated segment.
    pub granularity: usize,

    /// Delay between two frames.
    ///
    /// Units: milliseconds
    pub frame_period_ms: u64,

    // ---- GEOMETRY ----

    pub geometry: Geometry,

    /// Servo pulse characteristics, used when driving a PWM board.
    #[serde(default)]
    pub pulse: PulseParams,

    // ---- GAITS ----

    /// Gait tables by name.
    pub gaits: BTreeMap<String, GaitTable>,

    // ---- LEGS ----

    pub legs: Vec<LegParams>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Check the parameters are consistent.
    pub fn validate(&self) -> Result<(), WalkCtrlError> {
        let invalid = |msg: String| Err(WalkCtrlError::InvalidParams(msg));

        if self.granularity == 0 {
            return invalid("granularity must be at least 1".into());
        }
        if self.frame_period_ms == 0 {
            return invalid("frame_period_ms must be at least 1".into());
        }

        let g = &self.geometry;
        if !(g.femur > 0.0 && g.tibia > 0.0) {
            return invalid(format!(
                "leg segments must have positive lengths (femur {}, tibia {})",
                g.femur, g.tibia
            ));
        }
        if !(g.height > 0.0 && g.step_height >= 0.0 && g.step_width >= 0.0) {
            return invalid(format!(
                "height must be positive and step sizes non-negative \
                (height {}, step height {}, step width {})",
                g.height, g.step_height, g.step_width
            ));
        }

        for (name, table) in self.gaits.iter() {
            if let Err(e) = table.validate() {
                return invalid(format!("gait \"{}\": {}", name, e));
            }
        }

        let mut seen = [false; NUM_LEGS];
        let mut pins = Vec::with_capacity(2 * NUM_LEGS);
        for leg in self.legs.iter() {
            if seen[leg.id.index()] {
                return invalid(format!("the {} leg is defined more than once", leg.id));
            }
            seen[leg.id.index()] = true;

            for pin in [leg.hip.pin, leg.knee.pin].iter() {
                if pins.contains(pin) {
                    return invalid(format!("pin {} is used by more than one joint", pin));
                }
                pins.push(*pin);
            }
        }
        if let Some(missing) = LegId::ALL.iter().find(|id| !seen[id.index()]) {
            return invalid(format!("no definition was provided for the {} leg", missing));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::reference_params;

    #[test]
    fn test_reference_params() {
        let params = reference_params();
        params.validate().unwrap();

        assert_eq!(params.granularity, 3);
        assert_eq!(params.frame_period_ms, 40);
        assert_eq!(params.geometry.femur, 44.0);
        assert_eq!(params.legs.len(), 4);
        assert_eq!(params.gaits["forward"].len(), 4);
        assert!(params.legs[1].hip.invert);
    }

    #[test]
    fn test_invalid() {
        let mut params = reference_params();
        params.granularity = 0;
        assert!(matches!(params.validate(), Err(WalkCtrlError::InvalidParams(_))));

        let mut params = reference_params();
        params.geometry.tibia = -1.0;
        assert!(matches!(params.validate(), Err(WalkCtrlError::InvalidParams(_))));

        let mut params = reference_params();
        params.legs[3].knee.pin = params.legs[0].hip.pin;
        assert!(matches!(params.validate(), Err(WalkCtrlError::InvalidParams(_))));

        let mut params = reference_params();
        params.legs.pop();
        assert!(matches!(params.validate(), Err(WalkCtrlError::InvalidParams(_))));
    }

    #[test]
    fn test_gait_codes_checked_on_load() {
        let text = include_str!("../../../params/walk_ctrl.toml")
            .replace("[4, 1, 2, 3]", "[4, 1, 2, 5]");

        assert!(util::params::parse::<Params>(&text).is_err());
    }
}
