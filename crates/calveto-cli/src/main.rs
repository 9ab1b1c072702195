//! calveto CLI — extract shower-containment and MIP-track veto features
//! from calorimeter event files.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use calveto_core::calorimeter::{
    BEAM_ENERGY, CELL_WIDTH, LAYER_Z, N_LAYERS, SEGMENT_BOUNDS,
};
use calveto_core::radius::KinematicBin;
use calveto_core::{extract_features, EcalEvent, ExtractConfig, FeatureRecord};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "calveto")]
#[command(about = "Extract shower-containment and MIP-track veto features from calorimeter events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract per-event feature records from an event file.
    Extract(CliExtractArgs),

    /// Print calorimeter geometry and radius-table summary.
    DetectorInfo,
}

#[derive(Debug, Clone, Args)]
struct CliExtractArgs {
    /// Path to the input event file (JSON array of events).
    #[arg(long)]
    events: PathBuf,

    /// Path to write feature records (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Optional CSV output using the flat tabular column names.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Beam energy in MeV (photon-trajectory synthesis).
    #[arg(long, default_value_t = BEAM_ENERGY)]
    beam_energy: f64,

    /// Transverse cell width in mm (track-gate tolerance unit).
    #[arg(long, default_value_t = CELL_WIDTH)]
    cell_width: f64,

    /// Minimum goodness of fit for an accepted triplet track.
    #[arg(long, default_value = "0.6")]
    linreg_r_corr_min: f64,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => run_extract(&args),
        Commands::DetectorInfo => run_detector_info(),
    }
}

fn run_extract(args: &CliExtractArgs) -> CliResult<()> {
    tracing::info!("Loading events: {}", args.events.display());
    let data = fs::read_to_string(&args.events)?;
    let events: Vec<EcalEvent> = serde_json::from_str(&data)?;
    tracing::info!("Loaded {} events", events.len());

    let config = ExtractConfig {
        beam_energy: args.beam_energy,
        cell_width: args.cell_width,
        linreg_r_corr_min: args.linreg_r_corr_min,
        near_photon_dist: args.cell_width,
    };

    let records: Vec<FeatureRecord> = events
        .iter()
        .map(|event| extract_features(event, &config))
        .collect();

    let n_tracks: u32 = records
        .iter()
        .map(|r| r.n_straight_tracks + r.n_linreg_tracks)
        .sum();
    tracing::info!(
        "Extracted {} records ({} MIP tracks total)",
        records.len(),
        n_tracks
    );

    fs::write(&args.out, serde_json::to_string_pretty(&records)?)?;
    tracing::info!("Features written to {}", args.out.display());

    if let Some(csv_path) = &args.csv {
        fs::write(csv_path, to_csv(&records))?;
        tracing::info!("CSV written to {}", csv_path.display());
    }

    Ok(())
}

fn to_csv(records: &[FeatureRecord]) -> String {
    let mut out = String::new();
    let Some(first) = records.first() else {
        return out;
    };
    let header: Vec<String> = first.flatten().into_iter().map(|(name, _)| name).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for record in records {
        let row: Vec<String> = record
            .flatten()
            .into_iter()
            .map(|(_, value)| value.to_string())
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn run_detector_info() -> CliResult<()> {
    println!(
        "layers: {}   segment bounds: {:?}   cell width: {} mm",
        N_LAYERS, SEGMENT_BOUNDS, CELL_WIDTH
    );
    println!(
        "front face z: {} mm   back face z: {} mm",
        LAYER_Z[0],
        LAYER_Z[N_LAYERS - 1]
    );
    println!("beam energy: {} MeV", BEAM_ENERGY);
    println!("68% containment radii (front layer -> back layer):");
    for bin in [
        KinematicBin::ThetaLt10PLt500,
        KinematicBin::ThetaLt10PGt500,
        KinematicBin::Theta10To20,
        KinematicBin::ThetaGt20,
    ] {
        let radii = bin.radii();
        println!(
            "  {:?}: {:.2} mm -> {:.2} mm",
            bin,
            radii[0],
            radii[N_LAYERS - 1]
        );
    }
    Ok(())
}
