use exif_analyser::ExifAnalyser;
use exif_analyser::config::{DEFAULT_KEY_FILE, KeyConfig};
use std::path::Path;

/// Load a folder of photos and look up what each one was taken next to.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().init();

    let config = KeyConfig::load(Path::new(DEFAULT_KEY_FILE)).unwrap_or_default();
    let mut analyser = ExifAnalyser::builder()
        .api_key(config.google_key)
        .max_concurrent_lookups(8)
        .build()?;

    let start_dir = Path::new("assets");
    let count = analyser.load_directory(start_dir)?.len();
    println!("Found {count} geotagged photos.");

    if analyser.can_analyse() {
        let summary = analyser
            .analyse(&mut |percent: u8| println!("\t{percent}%"))
            .await?;
        println!("{summary:?}");
    }

    for record in analyser.records() {
        println!("{record}");
    }

    Ok(())
}
