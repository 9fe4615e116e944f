//! Loading XLSForm choice lists from CSV.

use std::path::Path;

use anyhow::{Context, Result, bail};
use coding_model::{Coding, split_choices};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

/// Read a choices CSV with every column as text.
pub fn read_choices(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open choices file {}", path.display()))?
        .finish()
        .with_context(|| format!("parse choices file {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = df.height(), "loaded choices");
    Ok(df)
}

/// Build one coding per choice list, optionally keeping only `list_name`.
pub fn load_codings(path: &Path, list_name: Option<&str>) -> Result<Vec<Coding>> {
    let df = read_choices(path)?;
    let codings = split_choices(&df).context("build codings from choices")?;
    let Some(wanted) = list_name else {
        return Ok(codings);
    };
    let selected: Vec<Coding> = codings
        .into_iter()
        .filter(|c| c.label() == Some(wanted))
        .collect();
    if selected.is_empty() {
        bail!("no choice list named '{wanted}' in {}", path.display());
    }
    Ok(selected)
}
