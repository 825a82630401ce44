use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use habspec::config::PipelineConfig;
use habspec::mission::{self, export};
use habspec::spectral::bands;
use habspec::track::time::now_utc;

/// Batch-process an aerial HAB survey: capture spectra in, one feature
/// table out.
#[derive(Parser)]
#[command(name = "habspec", version, about = "Hyperspectral HAB survey processing")]
struct Args {
    /// Mission directory (contains the flight-line subdirectories).
    mission_dir: PathBuf,

    /// GPS track file to interpolate positions from.
    #[arg(long)]
    gps: Option<PathBuf>,

    /// Output CSV path.
    #[arg(long, default_value = "captures.csv")]
    out: PathBuf,

    /// Also write the table as Parquet.
    #[arg(long)]
    parquet: Option<PathBuf>,

    /// JSON config overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    info!("habspec run started {}", now_utc());
    let records = mission::process_mission(&args.mission_dir, args.gps.as_deref(), &config)
        .with_context(|| format!("processing mission {}", args.mission_dir.display()))?;

    let water = records.iter().filter(|r| r.is_water).count();
    info!(
        "{} captures processed: {} water, {} land or glint (threshold {})",
        records.len(),
        water,
        records.len() - water,
        config.water_threshold
    );

    let band_names = bands::sentinel_band_names();
    export::write_csv(&records, &band_names, &args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!("wrote {}", args.out.display());

    if let Some(parquet) = &args.parquet {
        export::write_parquet(&records, &band_names, parquet)
            .with_context(|| format!("writing {}", parquet.display()))?;
        info!("wrote {}", parquet.display());
    }
    Ok(())
}
