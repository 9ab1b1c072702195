//! Radial containment classification and energy-weighted shower statistics.
//!
//! Every energy-bearing hit is bucketed by longitudinal segment and, per
//! category, by radial containment region around the projected electron and
//! photon trajectories. Statistics are accumulated in two passes: first
//! energy-weighted sums for the means, then squared deviations about the
//! fixed means for the standard deviations — a bucket's mean is not known
//! until every contributing hit has been seen.

use serde::{Deserialize, Serialize};

use crate::calorimeter::{segment_of, N_LAYERS, N_REGIONS, N_SEGMENTS};
use crate::hit::Hit;
use crate::radius::RadiusTable;
use crate::trajectory::{planar_distance, Trajectory};

/// Energy-weighted statistics for one containment bucket.
///
/// `z_mean`/`z_std` use the layer index as the depth coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub energy: f64,
    pub n_hits: u32,
    pub x_mean: f64,
    pub y_mean: f64,
    pub z_mean: f64,
    pub x_std: f64,
    pub y_std: f64,
    pub z_std: f64,
}

/// All containment buckets for one event.
///
/// Categories overlap by construction: a hit can land in an electron region
/// and a photon region at once, and far-out hits land in several outside
/// regions. Only `total` partitions the hits exactly (by segment).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainmentStats {
    /// Per-segment totals; radial region ignored.
    pub total: [BucketStats; N_SEGMENTS],
    /// Electron-containment buckets, `[region][segment]`.
    pub electron: [[BucketStats; N_SEGMENTS]; N_REGIONS],
    /// Photon-containment buckets, `[region][segment]`.
    pub photon: [[BucketStats; N_SEGMENTS]; N_REGIONS],
    /// Outside-containment buckets, `[region][segment]`.
    pub outside: [[BucketStats; N_SEGMENTS]; N_REGIONS],
}

/// Hit is inside containment region `region`: within the annulus
/// `[region, region + 1) * radius`. A negative sentinel distance never
/// matches.
fn in_region(dist: f64, region: usize, radius: f64) -> bool {
    dist >= region as f64 * radius && dist < (region + 1) as f64 * radius
}

/// Hit is beyond radius `(region + 1) * radius`. A missing trajectory
/// (negative sentinel) always counts as beyond.
fn beyond(dist: f64, region: usize, radius: f64) -> bool {
    dist < 0.0 || dist > (region + 1) as f64 * radius
}

/// Classify hits and accumulate the two-pass statistics.
pub fn compute(
    hits: &[Hit],
    ele: Option<&Trajectory>,
    pho: Option<&Trajectory>,
    ele_radii: &RadiusTable,
    pho_radii: &RadiusTable,
) -> ContainmentStats {
    let mut stats = ContainmentStats::default();

    // Pass 1: energy totals, hit counts, energy-weighted position sums.
    sweep(hits, ele, pho, ele_radii, pho_radii, &mut stats, accumulate_sums);
    for_each_bucket(&mut stats, finalize_means);

    // Pass 2: energy-weighted squared deviations about the fixed means.
    sweep(hits, ele, pho, ele_radii, pho_radii, &mut stats, accumulate_deviations);
    for_each_bucket(&mut stats, finalize_stds);

    stats
}

/// One bucketing sweep over the hits, applying `accumulate` to every bucket
/// a hit belongs to.
fn sweep(
    hits: &[Hit],
    ele: Option<&Trajectory>,
    pho: Option<&Trajectory>,
    ele_radii: &RadiusTable,
    pho_radii: &RadiusTable,
    stats: &mut ContainmentStats,
    accumulate: fn(&mut BucketStats, &Hit),
) {
    for hit in hits {
        if hit.energy <= 0.0 || hit.layer >= N_LAYERS {
            continue;
        }
        let seg = segment_of(hit.layer);
        let d_e = planar_distance(ele, hit.x, hit.y, hit.layer);
        let d_p = planar_distance(pho, hit.x, hit.y, hit.layer);
        let r_e = ele_radii[hit.layer];
        let r_p = pho_radii[hit.layer];

        accumulate(&mut stats.total[seg], hit);
        for region in 0..N_REGIONS {
            if in_region(d_e, region, r_e) {
                accumulate(&mut stats.electron[region][seg], hit);
            }
            if in_region(d_p, region, r_p) {
                accumulate(&mut stats.photon[region][seg], hit);
            }
            if beyond(d_e, region, r_e) && beyond(d_p, region, r_p) {
                accumulate(&mut stats.outside[region][seg], hit);
            }
        }
    }
}

fn accumulate_sums(bucket: &mut BucketStats, hit: &Hit) {
    bucket.energy += hit.energy;
    bucket.n_hits += 1;
    bucket.x_mean += hit.x * hit.energy;
    bucket.y_mean += hit.y * hit.energy;
    bucket.z_mean += hit.layer as f64 * hit.energy;
}

fn accumulate_deviations(bucket: &mut BucketStats, hit: &Hit) {
    bucket.x_std += (hit.x - bucket.x_mean).powi(2) * hit.energy;
    bucket.y_std += (hit.y - bucket.y_mean).powi(2) * hit.energy;
    bucket.z_std += (hit.layer as f64 - bucket.z_mean).powi(2) * hit.energy;
}

fn finalize_means(bucket: &mut BucketStats) {
    if bucket.energy > 0.0 {
        bucket.x_mean /= bucket.energy;
        bucket.y_mean /= bucket.energy;
        bucket.z_mean /= bucket.energy;
    }
}

fn finalize_stds(bucket: &mut BucketStats) {
    if bucket.energy > 0.0 {
        bucket.x_std = (bucket.x_std / bucket.energy).sqrt();
        bucket.y_std = (bucket.y_std / bucket.energy).sqrt();
        bucket.z_std = (bucket.z_std / bucket.energy).sqrt();
    }
}

fn for_each_bucket(stats: &mut ContainmentStats, f: fn(&mut BucketStats)) {
    for bucket in &mut stats.total {
        f(bucket);
    }
    for category in [&mut stats.electron, &mut stats.photon, &mut stats.outside] {
        for region in category.iter_mut() {
            for bucket in region.iter_mut() {
                f(bucket);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radius::{photon_radii, KinematicBin};
    use crate::trajectory::Trajectory;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn beam_trajectory(x: f64, y: f64) -> Trajectory {
        Trajectory::project(Vector3::new(0.0, 0.0, 1000.0), Vector3::new(x, y, 220.0))
    }

    fn radii() -> &'static RadiusTable {
        KinematicBin::default().radii()
    }

    #[test]
    fn empty_hit_list_yields_all_zero() {
        let stats = compute(&[], None, None, radii(), photon_radii());
        assert_eq!(stats, ContainmentStats::default());
    }

    #[test]
    fn single_far_hit_lands_in_every_outside_region() {
        // Electron trajectory present but far away; no photon trajectory.
        let ele = beam_trajectory(500.0, 500.0);
        let hit = Hit::new(0.0, 0.0, 245.3, 5, 2.0);
        let stats = compute(&[hit], Some(&ele), None, radii(), photon_radii());

        // Layer 5 is in the first segment.
        assert_relative_eq!(stats.total[0].energy, 2.0);
        assert_eq!(stats.total[0].n_hits, 1);
        assert_relative_eq!(stats.total[0].x_mean, 0.0);
        assert_relative_eq!(stats.total[0].z_mean, 5.0);
        assert_relative_eq!(stats.total[0].x_std, 0.0);

        // Far beyond every electron radius, and the missing photon
        // trajectory always counts as beyond: outside in all five regions,
        // including the widest one.
        for region in 0..N_REGIONS {
            assert_relative_eq!(stats.outside[region][0].energy, 2.0);
            assert_eq!(stats.outside[region][0].n_hits, 1);
        }
        assert_relative_eq!(stats.outside[N_REGIONS - 1][0].energy, 2.0);

        // Not contained around either trajectory.
        for region in 0..N_REGIONS {
            assert_eq!(stats.electron[region][0].n_hits, 0);
            assert_eq!(stats.photon[region][0].n_hits, 0);
        }
    }

    #[test]
    fn on_axis_hit_is_in_innermost_regions() {
        let ele = beam_trajectory(0.0, 0.0);
        let pho = beam_trajectory(1.0, 0.0);
        let hit = Hit::new(0.0, 0.0, 245.3, 5, 1.5);
        let stats = compute(&[hit], Some(&ele), Some(&pho), radii(), photon_radii());

        assert_relative_eq!(stats.electron[0][0].energy, 1.5);
        // One mm off the photon axis: still inside the first radius there.
        assert_relative_eq!(stats.photon[0][0].energy, 1.5);
        // Inside both first radii, so never outside.
        for region in 0..N_REGIONS {
            assert_eq!(stats.outside[region][0].n_hits, 0);
        }
    }

    #[test]
    fn missing_trajectories_suppress_containment_categories() {
        let hit = Hit::new(10.0, -4.0, 291.3, 10, 3.0);
        let stats = compute(&[hit], None, None, radii(), photon_radii());

        assert_relative_eq!(stats.total[1].energy, 3.0);
        for region in 0..N_REGIONS {
            assert_eq!(stats.electron[region][1].n_hits, 0);
            assert_eq!(stats.photon[region][1].n_hits, 0);
            // Both sentinels count as beyond.
            assert_eq!(stats.outside[region][1].n_hits, 1);
        }
    }

    #[test]
    fn total_partitions_energy_by_segment() {
        let hits = vec![
            Hit::new(3.0, 0.0, 223.8, 0, 1.0),
            Hit::new(-2.0, 5.0, 245.3, 5, 2.5),
            Hit::new(0.0, 1.0, 291.3, 10, 4.0),
            Hit::new(8.0, 8.0, 344.2, 17, 0.5),
            Hit::new(-9.0, 3.0, 503.2, 33, 1.25),
        ];
        let ele = beam_trajectory(0.0, 0.0);
        let stats = compute(&hits, Some(&ele), None, radii(), photon_radii());

        assert_eq!(stats.total[0].energy, 3.5);
        assert_eq!(stats.total[1].energy, 4.0);
        assert_eq!(stats.total[2].energy, 1.75);
        assert_eq!(
            stats.total.iter().map(|b| u64::from(b.n_hits)).sum::<u64>(),
            hits.len() as u64
        );
    }

    #[test]
    fn weighted_mean_and_std_within_a_bucket() {
        // Two hits in the same segment, same layer, energies 1 and 3.
        let hits = vec![
            Hit::new(0.0, 0.0, 291.3, 10, 1.0),
            Hit::new(4.0, 0.0, 291.3, 10, 3.0),
        ];
        let stats = compute(&hits, None, None, radii(), photon_radii());

        // Energy-weighted mean: (0*1 + 4*3) / 4 = 3.
        assert_relative_eq!(stats.total[1].x_mean, 3.0, epsilon = 1e-12);
        // Weighted variance: (9*1 + 1*3) / 4 = 3.
        assert_relative_eq!(stats.total[1].x_std, 3.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stats.total[1].z_mean, 10.0, epsilon = 1e-12);
        assert_relative_eq!(stats.total[1].z_std, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn recomputation_is_deterministic() {
        let hits = vec![
            Hit::new(1.0, 2.0, 223.8, 0, 0.7),
            Hit::new(30.0, -12.0, 291.3, 10, 2.2),
            Hit::new(-45.0, 60.0, 470.8, 30, 1.9),
        ];
        let ele = beam_trajectory(2.0, 2.0);
        let pho = beam_trajectory(-15.0, 0.0);
        let a = compute(&hits, Some(&ele), Some(&pho), radii(), photon_radii());
        let b = compute(&hits, Some(&ele), Some(&pho), radii(), photon_radii());
        assert_eq!(a, b);
    }

    #[test]
    fn zero_energy_and_out_of_range_hits_are_ignored() {
        let hits = vec![
            Hit::new(1.0, 1.0, 223.8, 0, 0.0),
            Hit::new(1.0, 1.0, 0.0, 99, 5.0),
        ];
        let stats = compute(&hits, None, None, radii(), photon_radii());
        assert_eq!(stats, ContainmentStats::default());
    }
}
