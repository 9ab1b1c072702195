//! Per-event feature record and tabular flattening.

use serde::{Deserialize, Serialize};

use crate::calorimeter::{N_LAYERS, N_REGIONS, N_SEGMENTS};
use crate::containment::{BucketStats, ContainmentStats};

/// The flat per-event feature record: containment statistics plus the
/// track-veto scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub containment: ContainmentStats,
    pub n_straight_tracks: u32,
    pub n_linreg_tracks: u32,
    /// First layer with a candidate hit near the photon trajectory;
    /// the last layer when none.
    pub first_near_photon_layer: usize,
    /// Electron-photon trajectory angle (degrees).
    pub ep_ang: f64,
    /// Electron-photon front-face separation (mm).
    pub ep_sep: f64,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            containment: ContainmentStats::default(),
            n_straight_tracks: 0,
            n_linreg_tracks: 0,
            first_near_photon_layer: N_LAYERS - 1,
            ep_ang: 0.0,
            ep_sep: 0.0,
        }
    }
}

type StatFn = fn(&BucketStats) -> f64;

/// The eight per-bucket statistics, in historical column order.
const STATS: [(&str, StatFn); 8] = [
    ("Energy", |b| b.energy),
    ("NHits", |b| f64::from(b.n_hits)),
    ("XMean", |b| b.x_mean),
    ("YMean", |b| b.y_mean),
    ("ZMean", |b| b.z_mean),
    ("XStd", |b| b.x_std),
    ("YStd", |b| b.y_std),
    ("ZStd", |b| b.z_std),
];

impl FeatureRecord {
    /// Flatten to `(column, value)` pairs using the historical tabular
    /// names: `totalEnergy_l1`, `electronContainmentEnergy_x1_l1`, … with
    /// 1-indexed regions (`x`) and segments (`l`).
    pub fn flatten(&self) -> Vec<(String, f64)> {
        let mut out = Vec::with_capacity(24 + 3 * 120 + 5);
        push_segments(&mut out, "total", &self.containment.total);
        push_category(&mut out, "electronContainment", &self.containment.electron);
        push_category(&mut out, "photonContainment", &self.containment.photon);
        push_category(&mut out, "outsideContainment", &self.containment.outside);
        out.push(("nStraightTracks".into(), f64::from(self.n_straight_tracks)));
        out.push(("nLinregTracks".into(), f64::from(self.n_linreg_tracks)));
        out.push((
            "firstNearPhLayer".into(),
            self.first_near_photon_layer as f64,
        ));
        out.push(("epAng".into(), self.ep_ang));
        out.push(("epSep".into(), self.ep_sep));
        out
    }
}

fn push_segments(out: &mut Vec<(String, f64)>, prefix: &str, buckets: &[BucketStats; N_SEGMENTS]) {
    for (suffix, get) in STATS {
        for (seg, bucket) in buckets.iter().enumerate() {
            out.push((format!("{prefix}{suffix}_l{}", seg + 1), get(bucket)));
        }
    }
}

fn push_category(
    out: &mut Vec<(String, f64)>,
    prefix: &str,
    buckets: &[[BucketStats; N_SEGMENTS]; N_REGIONS],
) {
    for (suffix, get) in STATS {
        for (region, segments) in buckets.iter().enumerate() {
            for (seg, bucket) in segments.iter().enumerate() {
                out.push((
                    format!("{prefix}{suffix}_x{}_l{}", region + 1, seg + 1),
                    get(bucket),
                ));
            }
        }
    }
}
