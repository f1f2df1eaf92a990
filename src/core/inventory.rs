//! Inventory collection: the file names under one side's root.
//!
//! Only file names are returned; directory layout plays no part in token
//! identity. Unlike the reconciliation passes this can fail, and any failure
//! is fatal for the run.

use std::fs;
use std::path::Path;

use glob_match::glob_match;

use crate::error::{Error, Result};

/// Recursively collect file names under `root`, skipping directories whose
/// name matches any of `skip_dirs`. Names are sorted.
pub fn collect_file_names(root: &Path, skip_dirs: &[String]) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(Error::inventory_not_found(root.display().to_string()));
    }

    log_status!("inventory", "Walking {}", root.display());

    let mut names = Vec::new();
    walk_recursive(root, skip_dirs, &mut names)?;
    names.sort();
    Ok(names)
}

fn walk_recursive(dir: &Path, skip_dirs: &[String], names: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", dir.display())))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", dir.display())))
        })?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("stat {}", path.display())))
        })?;

        if file_type.is_dir() {
            if is_skipped(&name, skip_dirs) {
                continue;
            }
            walk_recursive(&path, skip_dirs, names)?;
        } else if file_type.is_symlink() && path.is_dir() {
            // Linked directories are not descended into.
            continue;
        } else {
            names.push(name);
        }
    }

    Ok(())
}

fn is_skipped(dir_name: &str, skip_dirs: &[String]) -> bool {
    skip_dirs
        .iter()
        .any(|pattern| glob_match(pattern, dir_name))
}
