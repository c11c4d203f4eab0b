use clap::Parser;
use exif_analyser::ExifAnalyser;
use exif_analyser::config::{DEFAULT_KEY_FILE, KeyConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// List the geotagged photos in a directory, oldest first, optionally with
/// the nearest point of interest for each.
#[derive(Parser, Debug)]
#[command(name = "exif-analyser", version)]
struct Args {
    /// Directory to load photos from.
    dir: PathBuf,

    /// JSON file holding the `google-key` entry.
    #[arg(long, default_value = DEFAULT_KEY_FILE)]
    config: PathBuf,

    /// Look up a point of interest for every photo.
    #[arg(long)]
    analyse: bool,

    /// Maximum number of lookups in flight at once (unlimited if unset).
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Seconds before a single lookup is abandoned.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Accepted file extensions.
    #[arg(long = "ext", value_delimiter = ',', default_values_t = ["jpg".to_string(), "png".to_string()])]
    extensions: Vec<String>,

    /// Print the records as JSON instead of one line each.
    #[arg(long)]
    json: bool,

    /// Open the photo at this position of the list on a map.
    #[arg(long)]
    plot: Option<usize>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api_key = match KeyConfig::load(&args.config) {
        Ok(config) => config.google_key,
        Err(err) => {
            warn!(path = %args.config.display(), error = %err, "no API key, point of interest lookups disabled");
            String::new()
        }
    };

    let mut analyser = ExifAnalyser::builder()
        .api_key(api_key)
        .extensions(args.extensions)
        .lookup_timeout(Duration::from_secs(args.timeout_secs))
        .maybe_max_concurrent_lookups(args.max_concurrent)
        .build()?;

    let count = analyser.load_directory(&args.dir)?.len();
    info!(count, "number of points");

    if args.analyse {
        if analyser.can_analyse() {
            let mut last = None;
            analyser
                .analyse(&mut |percent: u8| {
                    if last != Some(percent) {
                        info!(percent, "analysing");
                        last = Some(percent);
                    }
                })
                .await?;
        } else {
            warn!("--analyse ignored: no API key configured");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(analyser.records())?);
    } else {
        for record in analyser.records() {
            println!("{record}");
        }
    }

    if let Some(index) = args.plot {
        match analyser.record(index) {
            Some(record) => opener::open_browser(record.maps_url())?,
            None => warn!(index, count, "no photo at that position"),
        }
    }

    Ok(())
}
