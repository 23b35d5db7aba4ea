//! Line-delimited coordinate lists
//!
//! Every list is rewritten in full: content goes to a sibling temp file which is
//! then renamed over the target, so a crash never leaves a half-written list.

use crate::error::CheckpointError;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read a list file, skipping blank lines and trimming the rest
pub fn read_lines(path: &Path) -> Result<Vec<String>, CheckpointError> {
    let content = fs::read_to_string(path).map_err(|e| CheckpointError::read_error(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Read a list file into a set; a missing file yields an empty set
pub fn read_set_if_exists(path: &Path) -> Result<BTreeSet<String>, CheckpointError> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    Ok(read_lines(path)?.into_iter().collect())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write lines to `path`, replacing any previous content
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), CheckpointError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CheckpointError::write_error(parent, e))?;
    }

    let tmp = temp_path(path);
    {
        let file = File::create(&tmp).map_err(|e| CheckpointError::write_error(&tmp, e))?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", line.as_ref())
                .map_err(|e| CheckpointError::write_error(&tmp, e))?;
        }
        writer
            .flush()
            .map_err(|e| CheckpointError::write_error(&tmp, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| CheckpointError::write_error(path, e))
}

/// Write lines to `path` in random order
pub fn write_shuffled<'a, I>(path: &Path, lines: I) -> Result<(), CheckpointError>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut shuffled: Vec<&String> = lines.into_iter().collect();
    shuffled.shuffle(&mut rand::thread_rng());
    write_lines(path, shuffled)
}
