//! Writes `hakone_data.js` from the easting, northing, depth, decimal year and
//! rupture diameter columns of `hakone.tsv` in the working directory.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tsv_converter::{convert, ConversionConfig};

#[derive(clap::Parser, Debug)]
#[command(
    name = "hakone-data",
    about = "Exports the Hakone earthquake columns as a JavaScript data file"
)]
struct Args {}

fn main() -> Result<()> {
    if let Err(err) = Args::try_parse() {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                // clap exits with 2 on argument errors; usage errors here exit with 1
                err.print().ok();
                std::process::exit(1);
            }
        }
    }

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).with_writer(std::io::stderr).init();

    let config = ConversionConfig::hakone();
    let summary = convert(&config)
        .with_context(|| format!("Failed to export {}", config.input.display()))?;

    println!("JavaScript data file saved to {}", summary.output.display());
    Ok(())
}
