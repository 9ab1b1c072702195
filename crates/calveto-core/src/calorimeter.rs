//! Immutable calorimeter geometry constants.
//!
//! All lengths in mm, energies in MeV. Layers are 0-indexed from the front
//! face; the three longitudinal segments partition the layers disjointly.

/// Number of sampling layers.
pub const N_LAYERS: usize = 34;

/// Number of radial containment regions around a projected trajectory.
pub const N_REGIONS: usize = 5;

/// Number of longitudinal segments.
pub const N_SEGMENTS: usize = 3;

/// Transverse size of one readout cell (mm). Tolerance unit for the
/// track-finder gates.
pub const CELL_WIDTH: f64 = 8.7;

/// Beam energy (MeV), used to synthesize the recoil-photon momentum.
pub const BEAM_ENERGY: f64 = 4000.0;

/// Layer boundaries of the longitudinal segments: segment `i` covers layers
/// `SEGMENT_BOUNDS[i] .. SEGMENT_BOUNDS[i + 1]`.
pub const SEGMENT_BOUNDS: [usize; N_SEGMENTS + 1] = [0, 6, 17, 34];

/// z position of each layer (mm).
pub const LAYER_Z: [f64; N_LAYERS] = [
    223.8000030517578,
    226.6999969482422,
    233.0500030517578,
    237.4499969482422,
    245.3000030517578,
    251.1999969482422,
    260.29998779296875,
    266.70001220703125,
    275.79998779296875,
    282.20001220703125,
    291.29998779296875,
    297.70001220703125,
    306.79998779296875,
    313.20001220703125,
    322.29998779296875,
    328.70001220703125,
    337.79998779296875,
    344.20001220703125,
    353.29998779296875,
    359.70001220703125,
    368.79998779296875,
    375.20001220703125,
    384.29998779296875,
    390.70001220703125,
    403.29998779296875,
    413.20001220703125,
    425.79998779296875,
    435.70001220703125,
    448.29998779296875,
    458.20001220703125,
    470.79998779296875,
    480.70001220703125,
    493.29998779296875,
    503.20001220703125,
];

/// Longitudinal segment containing `layer`. `layer` must be `< N_LAYERS`.
pub fn segment_of(layer: usize) -> usize {
    debug_assert!(layer < N_LAYERS);
    for seg in 0..N_SEGMENTS {
        if layer < SEGMENT_BOUNDS[seg + 1] {
            return seg;
        }
    }
    N_SEGMENTS - 1
}
