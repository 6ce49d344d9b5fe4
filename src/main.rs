use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use serde_json::json;

use spectral_swatch::chart::{bulb_spectrum_chart, table_chart};
use spectral_swatch::chromaticity::{spectral_locus, to_chromaticity};
use spectral_swatch::color::{to_hex, xyz_to_srgb8};
use spectral_swatch::config::PlotConfig;
use spectral_swatch::data::loader::load_file;
use spectral_swatch::stimulus::{blackbody_spectrum, cone_response, spectrum_to_xyz};
use spectral_swatch::swatch::spectral_gradient;
use spectral_swatch::{ColorMatchingFunctions, ConeFundamentals, GamutTriangle};

#[derive(Parser, Debug)]
#[command(
    name = "spectral-swatch",
    about = "Turn spectral tables into chart and swatch JSON documents"
)]
struct Cli {
    /// JSON plot configuration; missing keys keep their defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Spectral power of the configured bulb as a chart
    Bulb,
    /// Chart one column (default: all columns) of a table
    Curve {
        table: PathBuf,
        column: Option<String>,
    },
    /// Spectral gradient stops and locus from x̄ȳz̄ data
    Gradient {
        #[arg(value_name = "CMF_TABLE")]
        cmf_table: PathBuf,
    },
    /// Display colour of a black body at the given temperature
    SourceColor {
        #[arg(value_name = "CMF_TABLE")]
        cmf_table: PathBuf,
        /// Temperature in kelvin (default: the configured bulb's)
        kelvin: Option<f64>,
    },
    /// Mean L, M, S response to a black body at the given temperature
    Cones {
        #[arg(value_name = "CONE_TABLE")]
        cone_table: PathBuf,
        /// Temperature in kelvin (default: the configured bulb's)
        kelvin: Option<f64>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };

    match cli.command {
        Command::Bulb => emit(&bulb_spectrum_chart(&config)),
        Command::Curve { table, column } => {
            let table = load_file(&table)?;
            let names: Vec<&str> = match &column {
                Some(col) => vec![col.as_str()],
                None => table.column_names(),
            };
            let series = names
                .iter()
                .map(|&name| -> Result<_> { Ok((name, table.series(name)?)) })
                .collect::<Result<Vec<_>>>()?;
            emit(&table_chart(&series, &config))
        }
        Command::Gradient { cmf_table } => {
            let cmf = ColorMatchingFunctions::from_table(&load_file(&cmf_table)?)?;
            let locus: Vec<_> = spectral_locus(&cmf)
                .into_iter()
                .map(|p| {
                    json!({
                        "wavelength": p.wavelength,
                        "x": p.chromaticity.x,
                        "y": p.chromaticity.y,
                        "in_srgb": GamutTriangle::SRGB.contains(p.chromaticity),
                    })
                })
                .collect();
            emit(&json!({
                "stops": spectral_gradient(&cmf),
                "locus": locus,
                "srgb_gamut": GamutTriangle::SRGB.outline(),
            }))
        }
        Command::SourceColor { cmf_table, kelvin } => {
            let cmf = ColorMatchingFunctions::from_table(&load_file(&cmf_table)?)?;
            let temperature = kelvin.unwrap_or(config.bulb.temperature);
            let xyz = spectrum_to_xyz(&blackbody_spectrum(&cmf.y_bar, temperature), &cmf)?;
            let [x, y, z] = xyz.0;
            info!("{temperature} K → XYZ {xyz}");
            emit(&json!({
                "temperature": temperature,
                "xyz": xyz,
                "chromaticity": to_chromaticity(xyz),
                "color": to_hex(xyz_to_srgb8(x, y, z)),
            }))
        }
        Command::Cones { cone_table, kelvin } => {
            let cones = ConeFundamentals::from_table(&load_file(&cone_table)?)?;
            let temperature = kelvin.unwrap_or(config.bulb.temperature);
            let [lo, hi] = config.cone_band;
            let lms = cone_response(&blackbody_spectrum(&cones.l, temperature), &cones, lo, hi)?;
            emit(&json!({ "temperature": temperature, "band": [lo, hi], "lms": lms }))
        }
    }
}

fn emit<T: Serialize>(doc: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(doc)?);
    Ok(())
}
