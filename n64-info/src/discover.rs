use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::MatchOptions;
use n64_core::ROM_EXTENSIONS;

/// Expand the command line paths into ROM files.
///
/// Files are taken as given; directories are searched for the known ROM
/// extensions, case-insensitively.
pub fn find_roms(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut roms = Vec::new();
    for path in paths {
        if path.is_dir() {
            roms.extend(scan_dir(path, recursive)?);
        } else if path.exists() {
            roms.push(path.clone());
        } else {
            bail!("no such file or directory: {:?}", path);
        }
    }
    Ok(roms)
}

fn scan_dir(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let prefix = if recursive {
        format!("{}/**/", escaped)
    } else {
        format!("{}/", escaped)
    };

    let mut found = Vec::new();
    for ext in ROM_EXTENSIONS {
        let pattern = format!("{}*.{}", prefix, ext);
        let matches = glob::glob_with(&pattern, options)
            .with_context(|| format!("invalid search pattern {}", pattern))?;
        found.extend(matches.flatten().filter(|path| path.is_file()));
    }
    found.sort();
    log::debug!("{:?}: found {} ROM files", dir, found.len());
    Ok(found)
}
