//! Per-event feature extraction pipeline.
//!
//! [`FeatureExtractor`] is the primary entry point: create once, extract on
//! many events. Each extraction is self-contained — trajectories, radius
//! tables, and every accumulator are rebuilt from the event, so batches of
//! events can be processed in any order.

use tracing::{debug, warn};

use crate::calorimeter::{BEAM_ENERGY, CELL_WIDTH, N_LAYERS};
use crate::containment;
use crate::event::EcalEvent;
use crate::features::FeatureRecord;
use crate::hit::Hit;
use crate::radius::{photon_radii, KinematicBin};
use crate::tracking::{self, find_linreg_tracks, find_straight_tracks};
use crate::trajectory;

/// Tunable pipeline parameters.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Beam energy (MeV) for photon-trajectory synthesis.
    pub beam_energy: f64,
    /// Transverse cell size (mm): the tolerance unit of the track gates.
    pub cell_width: f64,
    /// Minimum goodness of fit for an accepted triplet track.
    pub linreg_r_corr_min: f64,
    /// Planar distance (mm) defining "near the photon trajectory".
    pub near_photon_dist: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            beam_energy: BEAM_ENERGY,
            cell_width: CELL_WIDTH,
            linreg_r_corr_min: 0.6,
            near_photon_dist: CELL_WIDTH,
        }
    }
}

/// Per-event feature extraction interface.
pub struct FeatureExtractor {
    config: ExtractConfig,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            config: ExtractConfig::default(),
        }
    }

    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract the feature record for one event.
    pub fn extract(&self, event: &EcalEvent) -> FeatureRecord {
        extract_features(event, &self.config)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the full pipeline over one event.
pub fn extract_features(event: &EcalEvent, config: &ExtractConfig) -> FeatureRecord {
    let hits = usable_hits(event);

    let (ele, pho) = trajectory::project_recoil(event.recoil.as_ref(), config.beam_energy);

    let bin = event
        .recoil
        .as_ref()
        .map(|r| KinematicBin::select(r.ecal_plane.theta_deg(), r.ecal_plane.p_mag()))
        .unwrap_or_default();
    let ele_radii = bin.radii();
    let pho_radii = photon_radii();

    let stats = containment::compute(&hits, ele.as_ref(), pho.as_ref(), ele_radii, pho_radii);

    let mut pool = tracking::select_candidates(&hits, ele.as_ref(), ele_radii);
    let n_candidates = pool.len();
    let first_near_photon_layer =
        tracking::first_near_photon_layer(&pool, pho.as_ref(), config.near_photon_dist);

    let (e_line, p_line) = trajectory::gate_lines(ele.as_ref(), pho.as_ref());
    let (ep_ang, ep_sep) = trajectory::ep_separation(ele.as_ref(), pho.as_ref());

    // The straight finder must fully consume its share of the pool before
    // the linreg finder sees the remainder.
    let n_straight_tracks = find_straight_tracks(&mut pool, &e_line, &p_line, config.cell_width);
    let n_linreg_tracks = find_linreg_tracks(
        &mut pool,
        &e_line,
        &p_line,
        config.cell_width,
        config.linreg_r_corr_min,
    );

    debug!(
        n_hits = hits.len(),
        n_candidates,
        n_straight_tracks,
        n_linreg_tracks,
        first_near_photon_layer,
        "event features extracted"
    );

    FeatureRecord {
        containment: stats,
        n_straight_tracks,
        n_linreg_tracks,
        first_near_photon_layer,
        ep_ang,
        ep_sep,
    }
}

/// Drop hits the geometry tables cannot describe.
fn usable_hits(event: &EcalEvent) -> Vec<Hit> {
    event
        .hits
        .iter()
        .filter(|hit| {
            if hit.layer >= N_LAYERS {
                warn!(layer = hit.layer, "hit layer outside the calorimeter, skipped");
                false
            } else {
                true
            }
        })
        .copied()
        .collect()
}
