use std::path::PathBuf;

/// Data utilities CLI
#[derive(clap::Parser, Debug)]
#[command(name = "datutils", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Fetch a URL and print the body, or download it to a file
    Fetch(FetchArgs),

    /// Distance and bearing between two (lat, lon) points
    Distance(DistanceArgs),

    /// Convert a data file between formats (csv, tsv, json, jsonl, geojson, txt)
    Convert(ConvertArgs),

    /// Print metadata (size, timestamps, uuid, sha256) of a file as JSON
    Info(InfoArgs),

    /// Flatten (or unflatten) a JSON document
    Flatten(FlattenArgs),
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    pub url: String,

    /// Download to this file instead of printing
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file, or bypass a fresh cache entry
    #[arg(short, long)]
    pub force: bool,

    /// Body decoding: json, text or bytes (inferred from the URL by default)
    #[arg(long)]
    pub stream: Option<String>,

    /// Cache responses in this directory
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub cache_dir: Option<PathBuf>,

    /// Cache lifetime in seconds (negative: never expires, 0: always refetch)
    #[arg(long, allow_hyphen_values = true)]
    pub expire: Option<i64>,

    /// Only check whether the resource exists
    #[arg(long, conflicts_with = "output")]
    pub check: bool,
}

#[derive(clap::Args, Debug)]
pub struct DistanceArgs {
    #[arg(allow_hyphen_values = true)]
    pub lat1: f64,
    #[arg(allow_hyphen_values = true)]
    pub lon1: f64,
    #[arg(allow_hyphen_values = true)]
    pub lat2: f64,
    #[arg(allow_hyphen_values = true)]
    pub lon2: f64,

    /// haversine or geodesic
    #[arg(short, long, default_value = "haversine")]
    pub method: String,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Input format, inferred from the extension by default
    #[arg(long)]
    pub from: Option<String>,

    /// Output format, inferred from the extension by default
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub path: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct FlattenArgs {
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Path separator
    #[arg(short, long, default_value = ".")]
    pub sep: String,

    /// Rebuild a nested document from a flat one
    #[arg(short, long)]
    pub unflatten: bool,
}
