// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::utils::date::to_db;
use crate::utils::formatting::sanitize_file_stem;
use chrono::NaiveDate;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Check whether a file may be created or overwritten.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask on stdin
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}

/// `report_<project>_<from>.<ext>`
pub fn report_file_name(project_name: &str, from: NaiveDate, ext: &str) -> String {
    format!(
        "report_{}_{}.{}",
        sanitize_file_stem(project_name),
        to_db(from),
        ext
    )
}

/// Write `bytes` to `dir/name`, creating `dir` if needed.
pub(crate) fn write_output(
    dir: &Path,
    name: &str,
    bytes: &[u8],
    force: bool,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    ensure_writable(&path, force)?;
    fs::write(&path, bytes)?;
    Ok(path)
}
