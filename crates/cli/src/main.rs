use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use trackershade::layout::Neighbor;
use trackershade::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "trackershade")]
#[command(about = "Shading of two-axis trackers in regular field layouts")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the neighbor set and shading bounds of a field as JSON
    Layout {
        #[arg(long)]
        config: PathBuf,
    },
    /// Evaluate one sun position and print the result as JSON
    Shade {
        #[arg(long)]
        config: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        elevation: f64,
        #[arg(long, allow_hyphen_values = true)]
        azimuth: f64,
        /// Include the unshaded residual and the candidate silhouettes
        #[arg(long)]
        geometries: bool,
    },
    /// Evaluate every row of a sun-position CSV and write a CSV or Parquet table
    Run {
        #[arg(long)]
        config: PathBuf,
        /// CSV with `elevation` and `azimuth` columns (degrees)
        #[arg(long)]
        input: String,
        /// Output path; `.parquet` writes Parquet, anything else CSV
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Layout { config } => layout(&config),
        Action::Shade {
            config,
            elevation,
            azimuth,
            geometries,
        } => shade(&config, SunPosition::new(elevation, azimuth), geometries),
        Action::Run { config, input, out } => run(&config, &input, &out),
    }
}

fn load_config(path: &Path) -> Result<(FieldConfig, TrackerField)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading field config {}", path.display()))?;
    let config: FieldConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing field config {}", path.display()))?;
    let field = TrackerField::from_config(&config)
        .with_context(|| format!("invalid field config {}", path.display()))?;
    Ok((config, field))
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    preset: Option<&'static str>,
    layout: LayoutParams,
    gcr: f64,
    neighbor_order: u32,
    min_tracker_spacing: f64,
    max_shading_elevation: f64,
    neighbors: &'a [Neighbor],
}

fn layout(config: &Path) -> Result<()> {
    let (_, field) = load_config(config)?;
    tracing::info!(
        config = %config.display(),
        neighbors = field.neighbors().len(),
        "layout"
    );
    let report = LayoutReport {
        preset: field.preset().map(LayoutPreset::name),
        layout: field.layout_params(),
        gcr: field.gcr(),
        neighbor_order: field.neighbor_order(),
        min_tracker_spacing: field.min_tracker_spacing(),
        max_shading_elevation: field.max_shading_elevation(),
        neighbors: field.neighbors().as_slice(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn shade(config: &Path, sun: SunPosition, geometries: bool) -> Result<()> {
    let (_, field) = load_config(config)?;
    let out = if geometries {
        let (fraction, geoms) = field.shaded_fraction_with_geometries(sun);
        serde_json::json!({
            "elevation": sun.elevation,
            "azimuth": sun.azimuth,
            "shaded_fraction": fraction,
            "unshaded_geometry": geoms.unshaded_geometry,
            "shading_geometries": geoms.shading_geometries,
        })
    } else {
        serde_json::json!({
            "elevation": sun.elevation,
            "azimuth": sun.azimuth,
            "shaded_fraction": field.shaded_fraction(sun),
        })
    };
    tracing::info!(elevation = sun.elevation, azimuth = sun.azimuth, "shade");
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run(config: &Path, input: &str, out: &str) -> Result<()> {
    let (field_config, field) = load_config(config)?;
    tracing::info!(config = %config.display(), input, out, "run");

    let mut df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening sun positions {input}"))?
        .with_columns([
            col("elevation").cast(DataType::Float64),
            col("azimuth").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("{input} needs numeric `elevation` and `azimuth` columns"))?;
    append_shaded_fraction(&field, &mut df)?;
    tracing::info!(rows = df.height(), cols = df.width(), "evaluated");

    write_frame(&mut df, Path::new(out))?;

    let payload = provenance::Payload::new(
        serde_json::to_value(&field_config)?,
        serde_json::json!({
            "input": input,
            "rows": df.height(),
        }),
    );
    let prov_path = provenance::write_sidecar(out, payload)?;
    tracing::info!(provenance = %prov_path.display(), "wrote provenance");
    Ok(())
}

/// Append a `shaded_fraction` column; rows with a null sun position get NaN.
fn append_shaded_fraction(field: &TrackerField, df: &mut DataFrame) -> Result<()> {
    let elevation = df.column("elevation")?.f64()?;
    let azimuth = df.column("azimuth")?.f64()?;
    let suns = elevation.into_iter().zip(azimuth).map(|(el, az)| {
        SunPosition::new(el.unwrap_or(f64::NAN), az.unwrap_or(f64::NAN))
    });
    let fractions = field.shaded_fractions(suns);
    if fractions.len() != df.height() {
        bail!(
            "evaluated {} rows, expected {}",
            fractions.len(),
            df.height()
        );
    }
    df.with_column(Series::new("shaded_fraction".into(), fractions))?;
    Ok(())
}

fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file =
        File::create(out).with_context(|| format!("creating output {}", out.display()))?;
    let parquet = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if parquet {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).finish(df)?;
    }
    Ok(())
}
