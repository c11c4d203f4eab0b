use exif_analyser::features::exif_reader::{ExifFileReader, MetadataSource};
use exif_analyser::features::metadata::extract_record;
use std::path::Path;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let path = Path::new("assets/sunset.jpg");
    let record = ExifFileReader
        .read_metadata_block(path)
        .and_then(|block| extract_record(&block, "sunset.jpg"));
    match record {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("{} has no usable GPS data", path.display()),
    }

    Ok(())
}
