use std::fs::{self, File};
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::{OutputError, Result};

/// Write the transformed table as CSV with a header row.
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn write_processed_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(file).include_header(true).finish(df)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote processed dataset"
    );
    Ok(())
}
