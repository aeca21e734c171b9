use clap::{Parser, ValueEnum};
use geotiepoints::{georeference_with, IfdLookup, Tiff};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Print the GeoTIFF tie points and pixel scale of a TIFF file.
#[derive(Parser, Debug)]
#[command(name = "geotiepoints", version, about)]
struct Cli {
    /// TIFF or BigTIFF file to read.
    #[arg(env = "GEOTIEPOINTS_PATH")]
    path: PathBuf,

    /// IFD the tag values are read from once any IFD reports the tag.
    #[arg(long, value_enum, default_value_t = Lookup::First, env = "GEOTIEPOINTS_LOOKUP")]
    lookup: Lookup,

    /// Skip listing the fields of IFD 0.
    #[arg(long)]
    no_dump_fields: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Lookup {
    /// Always read from IFD 0
    First,
    /// Read from the IFD that has the tag
    Matching,
}

impl From<Lookup> for IfdLookup {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::First => IfdLookup::First,
            Lookup::Matching => IfdLookup::Matching,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // File access
    let path = &cli.path;
    info!("Opening `{}`", path.display());
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Error opening file: {e}");
            return ExitCode::FAILURE;
        }
    };
    let reader = &mut BufReader::new(file);

    // TIFF indexing
    let t0 = Instant::now();
    let tiff = match Tiff::open(reader) {
        Ok(tiff) => tiff,
        Err(e) => {
            error!("Error parsing tiff: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!("Indexed TIFF in {}us", t0.elapsed().as_micros());

    if !cli.no_dump_fields {
        if let Some(ifd) = tiff.ifd0() {
            for tag in ifd.tags() {
                println!("{tag}");
            }
        }
    }

    match georeference_with(&tiff, cli.lookup.into()) {
        Ok(geo) => {
            println!("{geo}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error getting georeference: {e}");
            ExitCode::FAILURE
        }
    }
}
