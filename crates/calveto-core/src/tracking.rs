//! MIP track finding over hits left outside the primary electron shower.
//!
//! Stages, strictly in order:
//! 1. **Candidate selection** — hits beyond the electron containment radius
//!    (or all hits when no electron trajectory exists).
//! 2. **Straight finder** — greedy consumption of same-cell chains across
//!    nearby layers ([`straight`]).
//! 3. **Linreg finder** — combinatorial triplet search with a
//!    total-least-squares line fit over whatever the straight finder left
//!    behind ([`linreg`]).
//!
//! Consumed hits leave the pool; a hit belongs to at most one track.

pub mod linreg;
pub mod straight;

pub use linreg::find_linreg_tracks;
pub use straight::find_straight_tracks;

use nalgebra::Vector3;

use crate::calorimeter::{LAYER_Z, N_LAYERS};
use crate::hit::Hit;
use crate::radius::RadiusTable;
use crate::trajectory::{planar_distance, Trajectory};

/// A hit eligible for track search.
///
/// `pos.z` comes from the layer z-position table; `index` is the original
/// hit index, kept as a deterministic ordering tie-break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackHit {
    pub pos: Vector3<f64>,
    pub layer: usize,
    pub index: usize,
}

/// Select the track-candidate hits: every energy-bearing hit at or beyond
/// the electron containment radius at its layer, or every hit when the
/// electron trajectory is missing. Sorted by descending layer, then by
/// ascending original index.
pub fn select_candidates(
    hits: &[Hit],
    ele: Option<&Trajectory>,
    ele_radii: &RadiusTable,
) -> Vec<TrackHit> {
    let mut pool = Vec::new();
    for (index, hit) in hits.iter().enumerate() {
        if hit.energy <= 0.0 || hit.layer >= N_LAYERS {
            continue;
        }
        let d_e = planar_distance(ele, hit.x, hit.y, hit.layer);
        if d_e >= ele_radii[hit.layer] || d_e < 0.0 {
            pool.push(TrackHit {
                pos: Vector3::new(hit.x, hit.y, LAYER_Z[hit.layer]),
                layer: hit.layer,
                index,
            });
        }
    }
    pool.sort_by(|a, b| b.layer.cmp(&a.layer).then(a.index.cmp(&b.index)));
    pool
}

/// First (shallowest) layer with a candidate hit within `near_dist` of the
/// photon trajectory. Defaults to the last layer (the calorimeter back)
/// when no such hit exists or the photon trajectory is missing.
pub fn first_near_photon_layer(
    candidates: &[TrackHit],
    pho: Option<&Trajectory>,
    near_dist: f64,
) -> usize {
    let mut first = N_LAYERS - 1;
    if let Some(pho) = pho {
        for hit in candidates {
            let d = planar_distance(Some(pho), hit.pos.x, hit.pos.y, hit.layer);
            if d < near_dist && hit.layer < first {
                first = hit.layer;
            }
        }
    }
    first
}

/// Remove the hits at `members` from the pool, preserving order. The scan
/// position of the caller stays valid: the next unconsumed hit slides into
/// the vacated slot.
pub(crate) fn consume(pool: &mut Vec<TrackHit>, members: &[usize]) {
    let mut keep = vec![true; pool.len()];
    for &m in members {
        keep[m] = false;
    }
    let mut it = keep.iter();
    pool.retain(|_| *it.next().unwrap());
}
