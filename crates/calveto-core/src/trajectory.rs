//! Straight-line trajectory projection through the calorimeter layers.
//!
//! The recoil electron is projected from its calorimeter-plane kinematics;
//! the recoil photon is back-projected from the target-plane kinematics as
//! the beam-energy complement of the electron momentum. A missing
//! trajectory is represented as `None` and surfaces as the `-1.0` distance
//! sentinel in every downstream comparison.

use nalgebra::Vector3;

use crate::calorimeter::{LAYER_Z, N_LAYERS};
use crate::event::RecoilKinematics;
use crate::geom::Line;

/// Planar distance reported for a missing trajectory. Never matches a
/// containment-region test; always counts as "beyond" an outside test.
pub const NO_TRAJECTORY_DIST: f64 = -1.0;

/// Angular separation (degrees) reported when either trajectory is missing.
/// Kept clear of the angle veto threshold so such events are not cut.
pub const EP_ANG_FALLBACK: f64 = 4.0;

/// Planar separation (mm) reported when either trajectory is missing.
pub const EP_SEP_FALLBACK: f64 = 11.0;

/// Projected (x, y) impact points, one per calorimeter layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: [[f64; 2]; N_LAYERS],
}

impl Trajectory {
    /// Extrapolate a straight line from `position` with `momentum` to every
    /// layer z-position. `momentum.z` must be non-zero; callers only invoke
    /// this with a valid, non-degenerate recoil candidate.
    pub fn project(momentum: Vector3<f64>, position: Vector3<f64>) -> Self {
        let sx = momentum.x / momentum.z;
        let sy = momentum.y / momentum.z;
        let mut points = [[0.0; 2]; N_LAYERS];
        for (point, &z) in points.iter_mut().zip(LAYER_Z.iter()) {
            *point = [
                position.x + sx * (z - position.z),
                position.y + sy * (z - position.z),
            ];
        }
        Self { points }
    }

    /// Projected (x, y) at `layer`.
    pub fn point_at(&self, layer: usize) -> [f64; 2] {
        self.points[layer]
    }

    /// Infinite line through the first- and last-layer impact points.
    pub fn line(&self) -> Line {
        let [x0, y0] = self.points[0];
        let [x1, y1] = self.points[N_LAYERS - 1];
        Line::new(
            Vector3::new(x0, y0, LAYER_Z[0]),
            Vector3::new(x1, y1, LAYER_Z[N_LAYERS - 1]),
        )
    }
}

/// Momentum of the photon recoiling against the electron at the target:
/// the beam-energy complement of the electron momentum.
pub fn photon_momentum(electron_target_momentum: Vector3<f64>, beam_energy: f64) -> Vector3<f64> {
    Vector3::new(
        -electron_target_momentum.x,
        -electron_target_momentum.y,
        beam_energy - electron_target_momentum.z,
    )
}

/// Build the electron and photon trajectories for an event.
///
/// No recoil (or a recoil with zero longitudinal momentum) yields no
/// trajectories. The photon falls back to a beam-axis projection from the
/// origin when the target-plane sample is missing.
pub fn project_recoil(
    recoil: Option<&RecoilKinematics>,
    beam_energy: f64,
) -> (Option<Trajectory>, Option<Trajectory>) {
    let Some(recoil) = recoil else {
        return (None, None);
    };

    let e_mom = recoil.ecal_plane.momentum_vec();
    if e_mom.z == 0.0 {
        return (None, None);
    }
    let ele = Trajectory::project(e_mom, recoil.ecal_plane.position_vec());

    let (target_mom, target_pos) = match &recoil.target_plane {
        Some(sample) => (sample.momentum_vec(), sample.position_vec()),
        None => (Vector3::zeros(), Vector3::zeros()),
    };
    let p_mom = photon_momentum(target_mom, beam_energy);
    let pho = (p_mom.z != 0.0).then(|| Trajectory::project(p_mom, target_pos));

    (Some(ele), pho)
}

/// Planar distance from a cell center to the trajectory at `layer`;
/// [`NO_TRAJECTORY_DIST`] when the trajectory is absent.
pub fn planar_distance(traj: Option<&Trajectory>, x: f64, y: f64, layer: usize) -> f64 {
    match traj {
        Some(traj) => {
            let [tx, ty] = traj.point_at(layer);
            (x - tx).hypot(y - ty)
        }
        None => NO_TRAJECTORY_DIST,
    }
}

/// Gate lines used by the track finders. When either trajectory is missing,
/// both lines are placed far outside the detector so they do not restrict
/// the track search.
pub fn gate_lines(ele: Option<&Trajectory>, pho: Option<&Trajectory>) -> (Line, Line) {
    match (ele, pho) {
        (Some(ele), Some(pho)) => (ele.line(), pho.line()),
        _ => (
            Line::new(
                Vector3::new(999.0, 999.0, 0.0),
                Vector3::new(999.0, 999.0, 999.0),
            ),
            Line::new(
                Vector3::new(1000.0, 1000.0, 0.0),
                Vector3::new(1000.0, 1000.0, 1000.0),
            ),
        ),
    }
}

/// Electron-photon separation: angle between the trajectory lines (degrees)
/// and planar distance between their front-face impact points (mm).
/// Fallback values when either trajectory is missing.
pub fn ep_separation(ele: Option<&Trajectory>, pho: Option<&Trajectory>) -> (f64, f64) {
    match (ele, pho) {
        (Some(ele), Some(pho)) => {
            let e_dir = ele.line().direction().normalize();
            let p_dir = pho.line().direction().normalize();
            let ang = e_dir.dot(&p_dir).clamp(-1.0, 1.0).acos().to_degrees();
            let [ex, ey] = ele.point_at(0);
            let [px, py] = pho.point_at(0);
            (ang, (ex - px).hypot(ey - py))
        }
        _ => (EP_ANG_FALLBACK, EP_SEP_FALLBACK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PlaneSample;
    use approx::assert_relative_eq;

    fn sample(momentum: [f64; 3], position: [f64; 3]) -> PlaneSample {
        PlaneSample { momentum, position }
    }

    #[test]
    fn forward_momentum_projects_straight_through() {
        let traj = Trajectory::project(
            Vector3::new(0.0, 0.0, 1500.0),
            Vector3::new(7.0, -2.5, 220.0),
        );
        for layer in 0..N_LAYERS {
            let [x, y] = traj.point_at(layer);
            assert_relative_eq!(x, 7.0, epsilon = 1e-12);
            assert_relative_eq!(y, -2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn slope_scales_with_transverse_momentum() {
        let traj = Trajectory::project(
            Vector3::new(100.0, -50.0, 1000.0),
            Vector3::new(0.0, 0.0, 200.0),
        );
        let [x, y] = traj.point_at(0);
        let dz = LAYER_Z[0] - 200.0;
        assert_relative_eq!(x, 0.1 * dz, epsilon = 1e-12);
        assert_relative_eq!(y, -0.05 * dz, epsilon = 1e-12);
    }

    #[test]
    fn photon_momentum_is_beam_complement() {
        let p = photon_momentum(Vector3::new(30.0, -20.0, 1200.0), 4000.0);
        assert_relative_eq!(p.x, -30.0);
        assert_relative_eq!(p.y, 20.0);
        assert_relative_eq!(p.z, 2800.0);
    }

    #[test]
    fn missing_recoil_yields_no_trajectories() {
        let (ele, pho) = project_recoil(None, 4000.0);
        assert!(ele.is_none());
        assert!(pho.is_none());
    }

    #[test]
    fn missing_target_plane_projects_photon_from_origin() {
        let recoil = RecoilKinematics {
            ecal_plane: sample([10.0, 0.0, 2000.0], [5.0, 0.0, 220.0]),
            target_plane: None,
        };
        let (ele, pho) = project_recoil(Some(&recoil), 4000.0);
        assert!(ele.is_some());
        let pho = pho.expect("photon trajectory");
        for layer in 0..N_LAYERS {
            let [x, y] = pho.point_at(layer);
            assert_relative_eq!(x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn planar_distance_sentinel_for_missing_trajectory() {
        assert_eq!(planar_distance(None, 3.0, 4.0, 12), NO_TRAJECTORY_DIST);
    }

    #[test]
    fn planar_distance_at_layer() {
        let traj = Trajectory::project(
            Vector3::new(0.0, 0.0, 1000.0),
            Vector3::new(1.0, 2.0, 220.0),
        );
        assert_relative_eq!(
            planar_distance(Some(&traj), 4.0, 6.0, 20),
            5.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn gate_lines_fallback_is_far_and_parallel() {
        use crate::geom::{dist_two_lines, PARALLEL_LINE_DIST};
        let (e_line, p_line) = gate_lines(None, None);
        assert_eq!(dist_two_lines(&e_line, &p_line), PARALLEL_LINE_DIST);
        assert!(e_line.p1.x > 900.0 && p_line.p1.x > 900.0);
    }

    #[test]
    fn ep_separation_of_parallel_trajectories() {
        let ele = Trajectory::project(
            Vector3::new(0.0, 0.0, 1000.0),
            Vector3::new(0.0, 0.0, 220.0),
        );
        let pho = Trajectory::project(
            Vector3::new(0.0, 0.0, 4000.0),
            Vector3::new(10.0, 0.0, 220.0),
        );
        let (ang, sep) = ep_separation(Some(&ele), Some(&pho));
        assert_relative_eq!(ang, 0.0, epsilon = 1e-10);
        assert_relative_eq!(sep, 10.0, epsilon = 1e-10);
    }

    #[test]
    fn ep_separation_fallback() {
        let ele = Trajectory::project(
            Vector3::new(0.0, 0.0, 1000.0),
            Vector3::new(0.0, 0.0, 220.0),
        );
        assert_eq!(
            ep_separation(Some(&ele), None),
            (EP_ANG_FALLBACK, EP_SEP_FALLBACK)
        );
        assert_eq!(ep_separation(None, None), (EP_ANG_FALLBACK, EP_SEP_FALLBACK));
    }
}
