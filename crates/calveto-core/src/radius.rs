//! 68%-containment radii per layer, binned by recoil kinematics.
//!
//! Four precomputed tables cover the (polar angle, momentum magnitude)
//! plane; [`KinematicBin::select`] maps every kinematic point to exactly one
//! table. The photon trajectory always uses the default (low-angle,
//! low-momentum) table.

use crate::calorimeter::N_LAYERS;

/// Per-layer 68%-containment radius (mm).
pub type RadiusTable = [f64; N_LAYERS];

const RADIUS68_THETALT10_PLT500: RadiusTable = [
    4.045666158618167,
    4.086393662224346,
    4.359141107602775,
    4.666549994726691,
    5.8569181911416015,
    6.559716356124256,
    8.686967529043072,
    10.063482736354674,
    13.053528344041274,
    14.883496407943747,
    18.246694748611368,
    19.939799900443724,
    22.984795944506224,
    25.14745829663406,
    28.329169392203216,
    29.468032123356345,
    34.03271241527079,
    35.03747443690781,
    38.50748727211848,
    39.41576583301171,
    42.63622296033334,
    45.41123601592071,
    48.618139095742876,
    48.11801717451056,
    53.220539860213655,
    58.87753380915155,
    66.31550881539764,
    72.94685877928593,
    85.95506228335348,
    89.20607201266672,
    93.34370253818409,
    96.59471226749734,
    100.7323427930147,
    103.98335252232795,
];

const RADIUS68_THETALT10_PGT500: RadiusTable = [
    4.081926458777424,
    4.099431732299409,
    4.262428482867968,
    4.362017581473145,
    4.831341579961153,
    4.998346041276382,
    6.2633736512415705,
    6.588371889265881,
    8.359969947444522,
    9.015085558044309,
    11.262722588206483,
    12.250305471269183,
    15.00547660437276,
    16.187264014640103,
    19.573764900578503,
    20.68072032434797,
    24.13797140783321,
    25.62942209291236,
    29.027596514735617,
    30.215039667389316,
    33.929540248019585,
    36.12911729771914,
    39.184563500620946,
    42.02062468386282,
    46.972125628650204,
    47.78214816041894,
    55.88428562462974,
    59.15520134927332,
    63.31816666637158,
    66.58908239101515,
    70.75204770811342,
    74.022963432757,
    78.18592874985525,
    81.45684447449884,
];

const RADIUS68_THETA10TO20: RadiusTable = [
    4.0251896715647115,
    4.071661598616328,
    4.357690094817289,
    4.760224640141712,
    6.002480766325418,
    6.667318981016246,
    8.652513285172342,
    9.72379373302137,
    12.479492693251478,
    14.058548828317289,
    17.544872909347912,
    19.43616066939176,
    23.594162859513734,
    25.197329065282954,
    29.55995803074302,
    31.768946746958296,
    35.79247330197688,
    37.27810357669942,
    41.657281051476545,
    42.628141392692626,
    47.94208483539388,
    49.9289473559796,
    54.604030254423975,
    53.958762417361655,
    53.03339560920388,
    57.026277390001425,
    62.10810455035879,
    66.10098633115634,
    71.1828134915137,
    75.17569527231124,
    80.25752243266861,
    84.25040421346615,
    89.33223137382352,
    93.32511315462106,
];

const RADIUS68_THETAGT20: RadiusTable = [
    4.0754238481177705,
    4.193693485630508,
    5.14209420056253,
    6.114996249971468,
    7.7376807326481645,
    8.551663213602291,
    11.129110612057813,
    13.106293737495639,
    17.186617323282082,
    19.970887612094604,
    25.04088272634407,
    28.853696411302344,
    34.72538105333071,
    40.21218694947545,
    46.07344239520299,
    50.074953583805346,
    62.944045771758645,
    61.145621459396814,
    69.86940198299047,
    74.82378572939959,
    89.4528387422834,
    93.18228303096758,
    92.51751129204555,
    98.80228884380018,
    111.17537347472128,
    120.89712563907408,
    133.27021026999518,
    142.99196243434795,
    155.36504706526904,
    165.08679922962185,
    177.45988386054293,
    187.18163602489574,
    199.55472065581682,
    209.2764728201696,
];

/// Kinematic bin of the recoil electron at the calorimeter scoring plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KinematicBin {
    /// θ < 10°, |p| < 500 MeV. Default when no recoil is found.
    #[default]
    ThetaLt10PLt500,
    /// θ < 10°, |p| ≥ 500 MeV.
    ThetaLt10PGt500,
    /// 10° ≤ θ < 20°.
    Theta10To20,
    /// θ ≥ 20°.
    ThetaGt20,
}

impl KinematicBin {
    /// Map a polar angle (degrees) and momentum magnitude (MeV) to its bin.
    /// Total: every input pair selects exactly one bin.
    pub fn select(theta_deg: f64, p_mag: f64) -> Self {
        if theta_deg < 10.0 {
            if p_mag < 500.0 {
                Self::ThetaLt10PLt500
            } else {
                Self::ThetaLt10PGt500
            }
        } else if theta_deg < 20.0 {
            Self::Theta10To20
        } else {
            Self::ThetaGt20
        }
    }

    /// The containment-radius table for this bin.
    pub fn radii(self) -> &'static RadiusTable {
        match self {
            Self::ThetaLt10PLt500 => &RADIUS68_THETALT10_PLT500,
            Self::ThetaLt10PGt500 => &RADIUS68_THETALT10_PGT500,
            Self::Theta10To20 => &RADIUS68_THETA10TO20,
            Self::ThetaGt20 => &RADIUS68_THETAGT20,
        }
    }
}

/// Radius table used for the photon trajectory, independent of kinematics.
pub fn photon_radii() -> &'static RadiusTable {
    KinematicBin::default().radii()
}
