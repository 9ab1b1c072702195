//! Per-event input records.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::hit::Hit;

/// Recoil-particle kinematics sampled at one scoring plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneSample {
    /// Momentum at the plane (MeV).
    pub momentum: [f64; 3],
    /// Position at the plane (mm).
    pub position: [f64; 3],
}

impl PlaneSample {
    pub fn momentum_vec(&self) -> Vector3<f64> {
        Vector3::from(self.momentum)
    }

    pub fn position_vec(&self) -> Vector3<f64> {
        Vector3::from(self.position)
    }

    /// Momentum magnitude (MeV).
    pub fn p_mag(&self) -> f64 {
        self.momentum_vec().norm()
    }

    /// Transverse momentum (MeV).
    pub fn pt(&self) -> f64 {
        self.momentum[0].hypot(self.momentum[1])
    }

    /// Polar angle with the beam axis, in degrees. Zero for a zero momentum.
    pub fn theta_deg(&self) -> f64 {
        let p = self.p_mag();
        if p == 0.0 {
            0.0
        } else {
            (self.momentum[2] / p).clamp(-1.0, 1.0).acos().to_degrees()
        }
    }
}

/// Recoil-electron kinematics for one event.
///
/// The calorimeter-plane sample seeds the electron trajectory; the optional
/// target-plane sample seeds the back-projected photon trajectory. Events
/// where no recoil electron was identified carry no kinematics at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoilKinematics {
    /// Sample at the calorimeter front scoring plane.
    pub ecal_plane: PlaneSample,
    /// Sample at the target scoring plane, when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_plane: Option<PlaneSample>,
}

/// One calorimeter event: the hit list plus optional recoil kinematics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcalEvent {
    pub hits: Vec<Hit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoil: Option<RecoilKinematics>,
}
