//! calveto-core — shower-containment features and MIP-track veto for a
//! layered sampling calorimeter.
//!
//! Given one event's hit list and the recoil-electron kinematics, the
//! pipeline produces a flat per-event feature record:
//!
//! 1. **Trajectory** – straight-line projection of the recoil electron and
//!    the back-projected photon onto every layer.
//! 2. **Containment** – radial binning of energy deposits around the
//!    projected trajectories with two-pass energy-weighted statistics.
//! 3. **Candidate selection** – hits outside the electron shower core.
//! 4. **Straight finder** – greedy same-cell chain consumption.
//! 5. **Linreg finder** – combinatorial triplet search with an SVD
//!    total-least-squares line fit.
//!
//! Everything is recomputed per event; the only shared state is the
//! immutable geometry and radius tables. Missing inputs (no recoil, no
//! hits) degrade to sentinel outputs — nothing here fails an event.

pub mod calorimeter;
pub mod containment;
pub mod event;
pub mod features;
pub mod geom;
pub mod hit;
pub mod pipeline;
pub mod radius;
pub mod tracking;
pub mod trajectory;

pub use containment::{BucketStats, ContainmentStats};
pub use event::{EcalEvent, PlaneSample, RecoilKinematics};
pub use features::FeatureRecord;
pub use hit::Hit;
pub use pipeline::{extract_features, ExtractConfig, FeatureExtractor};
pub use trajectory::Trajectory;
