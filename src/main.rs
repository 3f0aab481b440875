use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tsv_converter::{convert, ConversionConfig, JsonStyle, OutputFormat, RowPolicy, ValueMode};

#[derive(clap::Parser, Debug)]
#[command(
    name = "tsv-converter",
    version,
    about = "Converts tab-separated files to JSON or JavaScript data files",
    override_usage = "tsv-converter <input.tsv> <output.json> [OPTIONS]"
)]
struct Args {
    /// Input TSV file path
    input: PathBuf,

    /// Output file path (.json for JSON, .js for a script file)
    output: PathBuf,

    /// JSON config file providing defaults for the options below
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field delimiter (default: tab)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Columns to keep, in output order (comma-separated, e.g., "depth,easting")
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Force the output format instead of detecting it from the extension
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON whitespace style
    #[arg(short, long, value_enum)]
    style: Option<JsonStyle>,

    /// Variable name for script output (default: jsonData)
    #[arg(long)]
    variable_name: Option<String>,

    /// Emit numbers, booleans and nulls instead of strings
    #[arg(long)]
    infer_types: bool,

    /// Field names to keep as strings when inferring types (comma-separated)
    #[arg(long, value_delimiter = ',')]
    string_fields: Vec<String>,

    /// Pad or truncate rows whose field count differs from the header
    #[arg(long)]
    tolerant: bool,
}

impl Args {
    fn into_config(self) -> Result<ConversionConfig> {
        let mut config = match &self.config {
            Some(path) => ConversionConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConversionConfig::default(),
        };

        config.input = self.input;
        config.output = self.output;
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.columns.is_some() {
            config.columns = self.columns;
        }
        if self.format.is_some() {
            config.format = self.format;
        }
        if self.style.is_some() {
            config.style = self.style;
        }
        if let Some(name) = self.variable_name {
            config.variable_name = name;
        }
        if self.infer_types {
            config.values = ValueMode::Inferred;
        }
        if !self.string_fields.is_empty() {
            config.string_fields = self.string_fields;
        }
        if self.tolerant {
            config.row_policy = RowPolicy::Tolerant;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                // clap exits with 2 on argument errors; usage errors here exit with 1
                err.print().ok();
                std::process::exit(1);
            }
        },
    };

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).with_writer(std::io::stderr).init();

    let config = args.into_config()?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        format = ?config.output_format(),
        "converting"
    );

    let summary = convert(&config).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            config.input.display(),
            config.output.display()
        )
    })?;
    info!(rows = summary.rows, columns = summary.columns, "conversion complete");

    Ok(())
}
