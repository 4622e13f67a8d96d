use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::model::{CellValue, Datasets, Table};
use super::schema::{self, DatasetFile};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every dataset the dashboard needs from `data_dir`.
///
/// Each file must carry the columns its chart reads; the sea-level table
/// gets its millimetre column derived right after load.
pub fn load_datasets(data_dir: &Path) -> Result<Datasets> {
    let hurricane_count = load_dataset(data_dir, &schema::HURRICANE_COUNT)?;
    let cyclone_energy = load_dataset(data_dir, &schema::CYCLONE_ENERGY)?;
    let continent_temperature = load_dataset(data_dir, &schema::CONTINENT_TEMPERATURE)?;
    let global_temperature = load_dataset(data_dir, &schema::GLOBAL_TEMPERATURE)?;
    let arctic_ice = load_dataset(data_dir, &schema::ARCTIC_ICE)?;

    let mut sea_levels = load_dataset(data_dir, &schema::SEA_LEVELS)?;
    sea_levels
        .derive_column(schema::SEA_LEVEL_MM, schema::SEA_LEVEL_INCHES, |inches| {
            inches * schema::MM_PER_INCH
        })
        .context("converting sea levels to millimetres")?;

    Ok(Datasets {
        hurricane_count,
        cyclone_energy,
        continent_temperature,
        global_temperature,
        arctic_ice,
        sea_levels,
    })
}

/// Load one delimited file into a [`Table`].
///
/// The header row becomes the column names verbatim (leading spaces are
/// significant); fields are trimmed before their type is inferred.
pub fn load_table(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Fields)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{} row {row_no}", path.display()))?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Table::from_rows(&source, headers, rows))
}

fn load_dataset(data_dir: &Path, file: &DatasetFile) -> Result<Table> {
    let path = data_dir.join(file.file_name);
    let table = load_table(&path, file.delimiter)?;
    table.require_columns(file.required)?;
    info!(
        "loaded {} ({} rows, columns {:?})",
        path.display(),
        table.len(),
        table.column_names()
    );
    Ok(table)
}
