//! Least-squares triplet track finder.
//!
//! For each unconsumed seed hit, every pair of neighbors within two cell
//! widths forms a candidate triplet. The best-fit line through a triplet is
//! the direction of the largest singular value of the centered coordinate
//! matrix (a total-least-squares fit); a triplet becomes a track when the
//! line points back toward the photon, stays clear of the electron, and its
//! goodness of fit beats both the acceptance threshold and every other
//! triplet of the same seed.

use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use super::{consume, TrackHit};
use crate::geom::{dist_pt_to_line, dist_two_lines, Line};

/// Find and consume three-hit least-squares tracks. Returns the number of
/// accepted tracks; member hits are removed from the pool.
pub fn find_linreg_tracks(
    pool: &mut Vec<TrackHit>,
    e_line: &Line,
    p_line: &Line,
    cell_width: f64,
    r_corr_min: f64,
) -> u32 {
    let mut n_tracks = 0;
    let mut i = 0;
    while i < pool.len() {
        let seed = pool[i];

        // Local neighborhood: every other unconsumed hit within two cell
        // widths of the seed.
        let neighborhood: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(j, hit)| *j != i && (hit.pos - seed.pos).norm() <= 2.0 * cell_width)
            .map(|(j, _)| j)
            .collect();

        // Explicit floor so the first triplet over the acceptance threshold
        // always becomes the initial best.
        let mut best_r_corr = 0.0;
        let mut best: Option<[usize; 3]> = None;

        for (a, &j) in neighborhood.iter().enumerate() {
            for &k in &neighborhood[a + 1..] {
                let points = [seed.pos, pool[j].pos, pool[k].pos];
                let Some(r_corr) = fit_triplet(&points, e_line, p_line, cell_width) else {
                    continue;
                };
                if r_corr > r_corr_min && r_corr > best_r_corr {
                    best_r_corr = r_corr;
                    best = Some([i, j, k]);
                }
            }
        }

        if let Some(members) = best {
            debug!(
                seed_layer = seed.layer,
                r_corr = best_r_corr,
                "linreg track accepted"
            );
            consume(pool, &members);
            n_tracks += 1;
            // Rescan from the slot the next unconsumed hit slid into.
        } else {
            i += 1;
        }
    }
    n_tracks
}

/// Fit the total-least-squares line through three points and score it.
///
/// Returns the goodness of fit `1 − Σ residual / Σ spread` when the fitted
/// line passes the photon/electron gates; `None` for gated-out, degenerate,
/// or zero-spread triplets.
fn fit_triplet(
    points: &[Vector3<f64>; 3],
    e_line: &Line,
    p_line: &Line,
    cell_width: f64,
) -> Option<f64> {
    let centroid = (points[0] + points[1] + points[2]) / 3.0;
    let centered = Matrix3::from_rows(&[
        (points[0] - centroid).transpose(),
        (points[1] - centroid).transpose(),
        (points[2] - centroid).transpose(),
    ]);

    let svd = centered.svd(false, true);
    let v_t = svd.v_t?;
    let direction = Vector3::new(v_t[(0, 0)], v_t[(0, 1)], v_t[(0, 2)]);
    let fit_line = Line::new(centroid, centroid + direction);

    let closest_e = dist_two_lines(&fit_line, e_line);
    let closest_p = dist_two_lines(&fit_line, p_line);
    if closest_p > cell_width || closest_e < 1.5 * cell_width {
        return None;
    }

    let spread: f64 = points.iter().map(|p| (p - centroid).norm()).sum();
    if spread == 0.0 {
        return None;
    }
    let residual: f64 = points.iter().map(|p| dist_pt_to_line(p, &fit_line)).sum();
    let r_corr = 1.0 - residual / spread;
    r_corr.is_finite().then_some(r_corr)
}
