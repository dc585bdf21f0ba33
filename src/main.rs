use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use stellar_census::Census;
use stellar_census::data::writer::write_file;
use stellar_census::figures::FigureBundle;

/// Classify Kepler catalog stars by surface gravity.
#[derive(Debug, Parser)]
#[command(name = "stellar-census", version, about)]
struct Cli {
    /// Catalog to read (.csv, .tsv, .json or .parquet).
    #[arg(env = "STELLAR_CENSUS_INPUT")]
    input: PathBuf,

    /// Write the classified catalog here (format from extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the figure bundle (theme, four scatter views) as JSON here.
    #[arg(short, long)]
    figures: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let census = Census::run(&cli.input)
        .with_context(|| format!("processing {}", cli.input.display()))?;

    if let Some(path) = &cli.output {
        write_file(&census.catalog, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if let Some(path) = &cli.figures {
        let bundle = FigureBundle::from_catalog(&census.catalog);
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &bundle)
            .context("writing figure bundle")?;
        info!("wrote {} figures to {}", bundle.figures.len(), path.display());
    }

    println!("{}", census.summary);
    Ok(())
}
