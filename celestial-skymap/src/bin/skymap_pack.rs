use celestial_skymap::projection::normalize;
use celestial_skymap::{PackerConfig, RawProjection, SkyCatalog};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skymap-pack")]
#[command(about = "Pack sky projections into the on-chain mint tuple")]
struct Cli {
    /// Constellation figure catalog (constellationship.fab layout)
    #[arg(long)]
    figures: PathBuf,

    /// Named-star catalog, one id per line
    #[arg(long)]
    names: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print catalog sizes
    Info,
    /// Pack a projection JSON file
    Pack {
        /// Projection as returned by the sky service
        projection: PathBuf,
        /// Packer config JSON (overrides --mag-max)
        #[arg(long, conflicts_with = "mag_max")]
        config: Option<PathBuf>,
        /// Faintest magnitude still labelled as a named star
        #[arg(long)]
        mag_max: Option<f64>,
        /// Also print the normalized date string
        #[arg(long)]
        show_date: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = SkyCatalog::load(&cli.figures, &cli.names)?;

    match cli.command {
        Commands::Info => {
            println!("Constellations: {}", catalog.figures.len());
            println!("Star-edge bits: {}", catalog.figures.total_star_slots());
            println!("Named stars: {}", catalog.names.len());
        }
        Commands::Pack {
            projection,
            config,
            mag_max,
            show_date,
        } => {
            let config = match (config, mag_max) {
                (Some(path), _) => PackerConfig::from_file(path)?,
                (None, Some(named_star_max_magnitude)) => {
                    let config = PackerConfig {
                        named_star_max_magnitude,
                    };
                    config.validate()?;
                    config
                }
                (None, None) => PackerConfig::default(),
            };

            let raw = RawProjection::from_file(&projection)?;
            let sky = normalize(raw, &catalog.figures)?;
            if show_date {
                eprintln!("Date: {}", sky.format_date());
            }

            let packed = catalog.packer_with_config(config).pack(&sky)?;
            println!("{}", serde_json::to_string_pretty(&packed)?);
        }
    }

    Ok(())
}
