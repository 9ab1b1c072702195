//! Greedy straight-chain track finder.
//!
//! A MIP crossing the calorimeter at near-normal incidence leaves a chain
//! of hits in the same cell column over consecutive layers. The finder
//! seeds a chain at each unconsumed hit, collects every unconsumed hit in
//! the same (x, y) cell within three layers beyond the seed (the pool's
//! descending-layer order makes this pick up the whole column), and accepts
//! the chain when its end-to-end line points back toward the photon and
//! away from the electron.

use tracing::debug;

use super::{consume, TrackHit};
use crate::geom::{dist_two_lines, Line};

/// Find and consume straight same-cell chains. Returns the number of
/// accepted tracks; member hits of accepted tracks are removed from the
/// pool.
pub fn find_straight_tracks(
    pool: &mut Vec<TrackHit>,
    e_line: &Line,
    p_line: &Line,
    cell_width: f64,
) -> u32 {
    let mut n_tracks = 0;
    let mut i = 0;
    while i < pool.len() {
        let seed = pool[i];

        let mut members = vec![i];
        for (j, hit) in pool.iter().enumerate() {
            if j == i || hit.layer == seed.layer || hit.layer > seed.layer + 3 {
                continue;
            }
            if hit.pos.x == seed.pos.x && hit.pos.y == seed.pos.y {
                members.push(j);
            }
        }

        if members.len() < 2 {
            i += 1;
            continue;
        }

        let track_line = Line::new(seed.pos, pool[*members.last().unwrap()].pos);
        let closest_e = dist_two_lines(&track_line, e_line);
        let closest_p = dist_two_lines(&track_line, p_line);

        // The chain must point back toward the photon and away from the
        // electron; short chains must at least favor the photon.
        if closest_p > cell_width && closest_e < 2.0 * cell_width {
            i += 1;
            continue;
        }
        if members.len() < 4 && closest_e > closest_p {
            i += 1;
            continue;
        }

        debug!(
            len = members.len(),
            seed_layer = seed.layer,
            closest_p,
            closest_e,
            "straight track accepted"
        );
        consume(pool, &members);
        n_tracks += 1;
        // The seed slot now holds the next unconsumed hit; rescan from it.
    }
    n_tracks
}
