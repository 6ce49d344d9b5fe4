use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use log::info;
use parquet::arrow::ArrowWriter;

use spectral_swatch::radiant::BulbModel;

/// Filament temperatures written as one column each.
const TEMPERATURES: [f64; 4] = [2700.0, 3000.0, 4000.0, 6500.0];

#[derive(Parser, Debug)]
#[command(name = "generate_sample", about = "Write a Parquet table of blackbody bulb spectra")]
struct Args {
    /// Output Parquet file
    #[arg(default_value = "bulb_spectra.parquet")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = Args::parse().output;

    // Wavelengths: 380 → 780 nm, step 5
    let wavelengths: Vec<f64> = (0..=80).map(|i| 380.0 + i as f64 * 5.0).collect();

    let mut fields = vec![Field::new("wavelength", DataType::Float64, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(Float64Array::from(wavelengths.clone()))];

    for &temperature in &TEMPERATURES {
        let bulb = BulbModel::default().with_temperature(temperature);
        let power: Vec<f64> = wavelengths.iter().map(|&nm| bulb.emission(nm * 1e-9)).collect();
        fields.push(Field::new(format!("T{temperature:.0}"), DataType::Float64, false));
        columns.push(Arc::new(Float64Array::from(power)));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    info!("wrote {} wavelengths x {} temperatures", wavelengths.len(), TEMPERATURES.len());
    println!(
        "Wrote {} bulb spectra ({} wavelengths each) to {}",
        TEMPERATURES.len(),
        wavelengths.len(),
        output_path.display()
    );
    Ok(())
}
