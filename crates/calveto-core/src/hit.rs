//! Calorimeter hit record.

use serde::{Deserialize, Serialize};

/// A single reconstructed calorimeter hit.
///
/// Positions are cell-center coordinates in mm (as provided by the detector
/// geometry service), `layer` is the 0-indexed sampling layer, `energy` the
/// reconstructed deposit in MeV (non-negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub layer: usize,
    pub energy: f64,
}

impl Hit {
    pub fn new(x: f64, y: f64, z: f64, layer: usize, energy: f64) -> Self {
        Self {
            x,
            y,
            z,
            layer,
            energy,
        }
    }
}
